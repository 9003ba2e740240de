// MNT-family final exponentiation.
//
// Both MNT4 (GT in F_{p^4}) and MNT6 (GT in F_{p^6}, 2-over-3) reduce their
// Miller output with an easy unitary chunk followed by a two-sub-chunk
// exponentiation parameterized by (w0, w1, is_w0_neg):
//
//   result = (elt^(q))^w1 · elt^(±w0)
//
// evaluated in the cyclotomic subgroup. The routines are generic over any
// tower that exposes the cyclotomic operations.

use std::ops::Mul;

use crate::fields::field12::{Field12, Fq12Params};
use crate::fields::field4::{Field4, Fq4Params};
use crate::fields::field6x3::{Field6x3, Fq6x3Params};

/// The operations available on the order-r cyclotomic subgroup of a pairing
/// target field.
pub trait CyclotomicField: Copy + Eq + Mul<Output = Self> + Sized {
    fn one() -> Self;
    fn unitary_inverse(&self) -> Self;
    fn cyclotomic_squared(&self) -> Self;
    fn cyclotomic_exp(&self, exp: &[u64]) -> Self;
    fn frobenius_map(&self, power: usize) -> Self;
}

impl<P: Fq12Params<N>, const N: usize> CyclotomicField for Field12<P, N> {
    fn one() -> Self {
        Field12::one()
    }
    fn unitary_inverse(&self) -> Self {
        Field12::unitary_inverse(self)
    }
    fn cyclotomic_squared(&self) -> Self {
        Field12::cyclotomic_squared(self)
    }
    fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        Field12::cyclotomic_exp(self, exp)
    }
    fn frobenius_map(&self, power: usize) -> Self {
        Field12::frobenius_map(self, power)
    }
}

impl<P: Fq4Params<N>, const N: usize> CyclotomicField for Field4<P, N> {
    fn one() -> Self {
        Field4::one()
    }
    fn unitary_inverse(&self) -> Self {
        Field4::unitary_inverse(self)
    }
    fn cyclotomic_squared(&self) -> Self {
        Field4::cyclotomic_squared(self)
    }
    fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        Field4::cyclotomic_exp(self, exp)
    }
    fn frobenius_map(&self, power: usize) -> Self {
        Field4::frobenius_map(self, power)
    }
}

impl<P: Fq6x3Params<N>, const N: usize> CyclotomicField for Field6x3<P, N> {
    fn one() -> Self {
        Field6x3::one()
    }
    fn unitary_inverse(&self) -> Self {
        Field6x3::unitary_inverse(self)
    }
    fn cyclotomic_squared(&self) -> Self {
        Field6x3::cyclotomic_squared(self)
    }
    fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        Field6x3::cyclotomic_exp(self, exp)
    }
    fn frobenius_map(&self, power: usize) -> Self {
        Field6x3::frobenius_map(self, power)
    }
}

/// MNT4-shape easy chunk: elt^(q² - 1). The caller supplies elt⁻¹.
pub fn final_exponentiation_first_chunk_mnt4<F: CyclotomicField>(elt: &F, elt_inv: &F) -> F {
    elt.frobenius_map(2) * *elt_inv
}

/// MNT6-shape easy chunk: elt^((q³ - 1)(q + 1)). The caller supplies elt⁻¹.
pub fn final_exponentiation_first_chunk_mnt6<F: CyclotomicField>(elt: &F, elt_inv: &F) -> F {
    let elt_q3_over_elt = elt.frobenius_map(3) * *elt_inv;
    elt_q3_over_elt.frobenius_map(1) * elt_q3_over_elt
}

/// The parameterized hard chunk: (elt^q)^w1 · elt^w0, with elt⁻¹ standing in
/// for elt when w0 is negative. Inputs must already lie in the cyclotomic
/// subgroup (i.e. be outputs of a first chunk).
pub fn final_exponentiation_last_chunk<F: CyclotomicField>(
    elt: &F,
    elt_inv: &F,
    w0: &[u64],
    w1: &[u64],
    is_w0_neg: bool,
) -> F {
    let elt_q = elt.frobenius_map(1);
    let w1_part = elt_q.cyclotomic_exp(w1);
    let w0_part = if is_w0_neg {
        elt_inv.cyclotomic_exp(w0)
    } else {
        elt.cyclotomic_exp(w0)
    };
    w1_part * w0_part
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::bn254::Fq12;
    use crate::curves::mnt6_298;

    // A unitary element: x^(q⁶-1)(q²+1) of a random x.
    fn cyclotomic_element() -> Fq12 {
        let x = Fq12::random_element();
        let b = x.unitary_inverse() * x.inverse().unwrap();
        b.frobenius_map(2) * b
    }

    #[test]
    fn last_chunk_matches_generic_exponentiation() {
        let g = cyclotomic_element();
        let g_inv = g.unitary_inverse();

        let result = final_exponentiation_last_chunk(
            &g,
            &g_inv,
            &mnt6_298::FINAL_EXPONENT_LAST_CHUNK_ABS_OF_W0,
            &mnt6_298::FINAL_EXPONENT_LAST_CHUNK_W1,
            mnt6_298::FINAL_EXPONENT_LAST_CHUNK_IS_W0_NEG,
        );

        let expected = g
            .frobenius_map(1)
            .pow(&mnt6_298::FINAL_EXPONENT_LAST_CHUNK_W1)
            * g_inv.pow(&mnt6_298::FINAL_EXPONENT_LAST_CHUNK_ABS_OF_W0);
        assert_eq!(result, expected);
    }

    #[test]
    fn mnt4_first_chunk_is_q_squared_minus_one_power() {
        use crate::curves::bn254::Bn254FqParams;
        use crate::fields::field_params::FieldParams;
        use crypto_bigint::Uint;

        let q = Uint::<8>::from_words({
            let mut w = [0u64; 8];
            w[..4].copy_from_slice(&<Bn254FqParams as FieldParams<4>>::MODULUS);
            w
        });
        let exp = q.wrapping_mul(&q).wrapping_sub(&Uint::ONE);

        let x = Fq12::random_element();
        let x_inv = x.inverse().unwrap();
        let chunk = final_exponentiation_first_chunk_mnt4(&x, &x_inv);
        assert_eq!(chunk, x.pow(exp.as_words()));
    }
}
