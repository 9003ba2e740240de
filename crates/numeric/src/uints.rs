// Fixed-width unsigned integer types.
//
// Thin aliases over `crypto_bigint::Uint` at the widths used by the curve
// families (254-bit and 255-bit values live in U256, 298-bit in U320,
// 377/381-bit in U384, loop counts up to 149 bits in U256, extended final
// exponents in U768), plus the convenience methods the engine layers call
// that crypto-bigint does not expose directly.

use crypto_bigint::Uint;

/// 256-bit unsigned integer (4 limbs).
pub type U256 = Uint<4>;
/// 320-bit unsigned integer (5 limbs).
pub type U320 = Uint<5>;
/// 384-bit unsigned integer (6 limbs).
pub type U384 = Uint<6>;
/// 512-bit unsigned integer (8 limbs).
pub type U512 = Uint<8>;
/// 768-bit unsigned integer (12 limbs).
pub type U768 = Uint<12>;

/// Extension methods shared by all widths.
pub trait UintExt {
    /// Position of the most significant set bit (0-indexed).
    /// Returns 0 for zero input.
    fn get_msb(&self) -> u32;

    /// Extract a single bit at the given index.
    fn get_bit(&self, index: u32) -> bool;

    /// Extract a bit-range [start, end) as a u64. The range must fit in 64
    /// bits (end - start <= 64).
    fn slice(&self, start: u32, end: u32) -> u64;

    /// Construct from u64 limbs in little-endian limb order.
    fn from_limbs(limbs: &[u64]) -> Self;

    /// Access the raw u64 limbs in little-endian limb order.
    fn limbs(&self) -> &[u64];
}

impl<const L: usize> UintExt for Uint<L> {
    fn get_msb(&self) -> u32 {
        let bits = self.bits_vartime();
        if bits == 0 {
            0
        } else {
            bits - 1
        }
    }

    fn get_bit(&self, index: u32) -> bool {
        self.bit_vartime(index)
    }

    fn slice(&self, start: u32, end: u32) -> u64 {
        assert!(end > start, "end must be greater than start");
        assert!(end - start <= 64, "slice range must fit in u64");

        let shifted = self.wrapping_shr_vartime(start);
        let mask = if end - start == 64 {
            u64::MAX
        } else {
            (1u64 << (end - start)) - 1
        };
        shifted.as_words()[0] & mask
    }

    fn from_limbs(limbs: &[u64]) -> Self {
        let mut words = [0u64; L];
        words[..limbs.len()].copy_from_slice(limbs);
        Uint::from_words(words)
    }

    fn limbs(&self) -> &[u64] {
        self.as_words()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_limbs_roundtrip() {
        let limbs = [
            0x1111_2222_3333_4444u64,
            0x5555_6666_7777_8888,
            0x9999_aaaa_bbbb_cccc,
            0xdddd_eeee_ffff_0000,
        ];
        let val = U256::from_limbs(&limbs);
        assert_eq!(val.limbs(), &limbs);
    }

    #[test]
    fn from_limbs_zero_extends() {
        let val = U384::from_limbs(&[7, 8]);
        assert_eq!(val.limbs(), &[7, 8, 0, 0, 0, 0]);
    }

    #[test]
    fn get_msb_basic() {
        assert_eq!(U256::ZERO.get_msb(), 0);
        assert_eq!(U256::ONE.get_msb(), 0);
        assert_eq!(U256::from_limbs(&[0, 0, 0, 1]).get_msb(), 192);
        assert_eq!(U256::from_limbs(&[0, 0, 0, 1 << 63]).get_msb(), 255);
        assert_eq!(U384::from_limbs(&[0, 0, 0, 0, 0, 1]).get_msb(), 320);
    }

    #[test]
    fn get_bit_basic() {
        let val = U256::from_limbs(&[0b1010, 0, 0, 0]);
        assert!(val.get_bit(1));
        assert!(!val.get_bit(2));
        assert!(val.get_bit(3));
        assert!(!val.get_bit(4));
    }

    #[test]
    fn slice_basic() {
        let val = U256::from_limbs(&[0xABCD_EF01_2345_6789, 0, 0, 0]);
        assert_eq!(val.slice(0, 16), 0x6789);
        assert_eq!(val.slice(16, 32), 0x2345);
    }

    #[test]
    fn slice_cross_limb() {
        let val = U256::from_limbs(&[u64::MAX, 0x00FF, 0, 0]);
        // Bits [60, 72) cross the limb boundary.
        assert_eq!(val.slice(60, 72), 0xFF_F);
    }

    #[test]
    fn wide_widths_agree_on_small_values() {
        let a = U320::from_limbs(&[42]);
        let b = U768::from_limbs(&[42]);
        assert_eq!(a.limbs()[0], b.limbs()[0]);
        assert_eq!(a.get_msb(), b.get_msb());
    }

    #[test]
    fn from_be_hex_matches_limbs() {
        let hex_str = "00000000000000010000000000000002000000000000000300000000000000FF";
        let from_hex = U256::from_be_hex(hex_str);
        let from_limbs = U256::from_limbs(&[0xFF, 0x3, 0x2, 0x1]);
        assert_eq!(from_hex, from_limbs);
    }
}
