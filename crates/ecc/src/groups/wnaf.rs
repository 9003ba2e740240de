// Windowed non-adjacent form encoding.
//
// Digits come out least-significant first. Every non-zero digit is odd and
// lies in (-2^window, 2^window); consecutive non-zero digits are separated
// by at least `window` zeros.

/// Compute the signed-window NAF of a scalar given as little-endian limbs.
pub fn find_wnaf(window: usize, scalar: &[u64]) -> Vec<i64> {
    assert!(window >= 1 && window <= 62, "unsupported wNAF window");

    let mut k = scalar.to_vec();
    // Spare limb: a negative digit correction can carry past the top limb.
    k.push(0);
    let width = 1i64 << (window + 1);

    let mut digits = Vec::with_capacity(scalar.len() * 64 + 1);
    while !limbs_are_zero(&k) {
        if k[0] & 1 == 1 {
            let mut digit = (k[0] & (width as u64 - 1)) as i64;
            if digit > width / 2 {
                digit -= width;
            }
            digits.push(digit);
            if digit > 0 {
                limbs_sub_small(&mut k, digit as u64);
            } else {
                limbs_add_small(&mut k, (-digit) as u64);
            }
        } else {
            digits.push(0);
        }
        limbs_shr1(&mut k);
    }
    digits
}

fn limbs_are_zero(limbs: &[u64]) -> bool {
    limbs.iter().all(|&l| l == 0)
}

fn limbs_sub_small(limbs: &mut [u64], value: u64) {
    let (low, borrow) = limbs[0].overflowing_sub(value);
    limbs[0] = low;
    let mut borrow = borrow;
    let mut i = 1;
    while borrow && i < limbs.len() {
        let (v, b) = limbs[i].overflowing_sub(1);
        limbs[i] = v;
        borrow = b;
        i += 1;
    }
}

fn limbs_add_small(limbs: &mut [u64], value: u64) {
    let (low, carry) = limbs[0].overflowing_add(value);
    limbs[0] = low;
    let mut carry = carry;
    let mut i = 1;
    while carry && i < limbs.len() {
        let (v, c) = limbs[i].overflowing_add(1);
        limbs[i] = v;
        carry = c;
        i += 1;
    }
}

fn limbs_shr1(limbs: &mut [u64]) {
    for i in 0..limbs.len() {
        limbs[i] >>= 1;
        if i + 1 < limbs.len() {
            limbs[i] |= limbs[i + 1] << 63;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reconstruct the scalar from its wNAF digits (valid for values that
    // fit in i128).
    fn reconstruct(digits: &[i64]) -> i128 {
        let mut acc = 0i128;
        for &d in digits.iter().rev() {
            acc = acc * 2 + d as i128;
        }
        acc
    }

    #[test]
    fn wnaf_reconstructs_small_scalars() {
        for value in [1u64, 2, 3, 7, 12, 0xFF, 0xDEAD_BEEF, 0x44E9_92B4_4A69_09F1] {
            for window in 2..=5 {
                let digits = find_wnaf(window, &[value]);
                assert_eq!(reconstruct(&digits), value as i128, "w={window} v={value:#x}");
            }
        }
    }

    #[test]
    fn wnaf_digits_are_odd_and_bounded() {
        let digits = find_wnaf(4, &[0x1234_5678_9ABC_DEF0, 0xFEDC_BA98]);
        for &d in &digits {
            if d != 0 {
                assert_eq!(d.abs() % 2, 1);
                assert!(d.abs() < (1 << 4) + 1);
            }
        }
    }

    #[test]
    fn wnaf_nonzero_digit_spacing() {
        let window = 3;
        let digits = find_wnaf(window, &[0xFFFF_FFFF_FFFF_FFFF, 0x1F]);
        let mut last_nonzero: Option<usize> = None;
        for (i, &d) in digits.iter().enumerate() {
            if d != 0 {
                if let Some(prev) = last_nonzero {
                    assert!(i - prev > window, "digits too close at {prev} and {i}");
                }
                last_nonzero = Some(i);
            }
        }
    }

    #[test]
    fn wnaf_zero_scalar_is_empty() {
        assert!(find_wnaf(4, &[0, 0, 0, 0]).is_empty());
    }
}
