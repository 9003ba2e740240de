// BLS12-377 parameter record: fields and the quadratic tower.
//
// The base field uses the non-residue ν = -5. Group generators and the
// remaining tower constants require validation against external test
// vectors before they can be recorded (the published fills are known to be
// unreliable), so this record stops at the Fp² level.
//
// TODO: wire G1/G2 and the sextic tower once validated generator and twist
// constants are available.

use crate::fields::field::Field;
use crate::fields::field2::{Field2, Fq2Params};
use crate::fields::field_params::FieldParams;

// ---------------------------------------------------------------------------
// Base field Fq (377 bits)
// ---------------------------------------------------------------------------

pub struct Bls12377FqParams;

impl FieldParams<6> for Bls12377FqParams {
    const MODULUS: [u64; 6] = [
        0x8508c00000000001,
        0x170b5d4430000000,
        0x1ef3622fba094800,
        0x1a22d9f300f5138f,
        0xc63b05c06ca1493b,
        0x01ae3a4617c510ea,
    ];
    const GENERATOR: u64 = 0;
}

pub type Fq = Field<Bls12377FqParams, 6>;

// ---------------------------------------------------------------------------
// Scalar field Fr (253 bits)
// ---------------------------------------------------------------------------

pub struct Bls12_377FrParams;

impl FieldParams<4> for Bls12_377FrParams {
    const MODULUS: [u64; 4] = [
        0x0a11800000000001,
        0x59aa76fed0000001,
        0x60b44d1e5c37b001,
        0x12ab655e9a2ca556,
    ];
    const GENERATOR: u64 = 22;
}

pub type Fr = Field<Bls12_377FrParams, 4>;

// ---------------------------------------------------------------------------
// Quadratic tower: Fq2 = Fq[u]/(u² + 5)
// ---------------------------------------------------------------------------

impl Fq2Params<6> for Bls12377FqParams {
    /// ν = -5 (i.e. p - 5).
    #[inline]
    fn mul_base_by_non_residue(a: &Fq) -> Fq {
        let two = *a + *a;
        let four = two + two;
        (four + *a).negate()
    }
}

pub type Fq2 = Field2<Bls12377FqParams, 6>;

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::Uint;

    #[test]
    fn scalar_field_modulus_and_generator() {
        let r = Uint::<4>::from_be_hex(
            "12AB655E9A2CA55660B44D1E5C37B00159AA76FED00000010A11800000000001",
        );
        assert_eq!(r.to_words(), <Bls12_377FrParams as FieldParams<4>>::MODULUS);
        assert_eq!(<Bls12_377FrParams as FieldParams<4>>::GENERATOR, 22);
    }

    #[test]
    fn fr_generator_is_non_residue() {
        // Euler's criterion: 22^((r-1)/2) = r - 1.
        let generator = Fr::from(22);
        let e = generator.pow(&Fr::MODULUS_MINUS_ONE_DIV_TWO);
        assert_eq!(e, Fr::one().negate());
    }

    #[test]
    fn two_adicity() {
        assert_eq!(Fq::TWO_ADICITY, 46);
        assert_eq!(Fr::TWO_ADICITY, 47);
    }

    #[test]
    fn fq2_non_residue_matches_record() {
        // ν = p - 5.
        let nu = Bls12377FqParams::mul_base_by_non_residue(&Fq::one());
        let expected = Uint::<6>::from_be_hex(
            "01AE3A4617C510EAC63B05C06CA1493B1A22D9F300F5138F1EF3622FBA094800170B5D44300000008508BFFFFFFFFFFC",
        );
        assert_eq!(nu.into_uint(), expected);
    }

    #[test]
    fn fq2_frobenius_is_pth_power() {
        // The Fp²-level Frobenius table is [1, p - 1]; conjugation realizes it.
        let p = <Bls12377FqParams as FieldParams<6>>::MODULUS;
        for _ in 0..5 {
            let a = Fq2::random_element();
            assert_eq!(a.frobenius_map(1), a.pow(&p));
        }
    }

    #[test]
    fn fq2_field_laws() {
        for _ in 0..50 {
            let a = Fq2::random_element();
            let b = Fq2::random_element();
            let c = Fq2::random_element();
            assert_eq!((a + b) * c, a * c + b * c);
            assert_eq!(a.sqr(), a * a);
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fq2::one());
            }
        }
    }

    #[test]
    fn fq_sqrt_of_square() {
        for _ in 0..5 {
            let a = Fq::random_element();
            let square = a.sqr();
            let root = square.sqrt().unwrap();
            assert_eq!(root.sqr(), square);
        }
    }

    #[test]
    fn fr_sqrt_uses_recorded_generator() {
        for _ in 0..5 {
            let a = Fr::random_element();
            let square = a.sqr();
            let root = square.sqrt().unwrap();
            assert_eq!(root.sqr(), square);
            assert_eq!(root.sgn0(), 0);
        }
    }
}
