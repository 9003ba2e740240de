// BLS12-381 parameter record.
//
// Base field at 6 limbs, scalar field at 4, the (1 + u) sextic tower, twist
// constants and generators, and the negative seed z = -0xD201000000010000.
// The Fp⁶ Frobenius tables are stored as raw Montgomery-form limbs; the
// Fp¹² level and the twist-Frobenius y constant are derived from the tower
// non-residue once at startup.

use std::sync::OnceLock;

use crate::fields::field::Field;
use crate::fields::field12::{Field12, Fq12Params};
use crate::fields::field2::{Field2, Fq2Params};
use crate::fields::field6::{Field6, Fq6Params};
use crate::fields::field_params::FieldParams;
use crate::fields::frobenius;
use crate::groups::affine_element::AffineElement;
use crate::groups::element::Element;
use crate::groups::group_params::GroupParams;
use crate::pairing::bls12::{Bls12, Bls12Params};

// ---------------------------------------------------------------------------
// Base field Fq
// ---------------------------------------------------------------------------

pub struct Bls12381FqParams;

impl FieldParams<6> for Bls12381FqParams {
    const MODULUS: [u64; 6] = [
        0xb9feffffffffaaab,
        0x1eabfffeb153ffff,
        0x6730d2a0f6b0f624,
        0x64774b84f38512bf,
        0x4b1ba7b6434bacd7,
        0x1a0111ea397fe69a,
    ];
    const GENERATOR: u64 = 0;
}

pub type Fq = Field<Bls12381FqParams, 6>;

// ---------------------------------------------------------------------------
// Scalar field Fr
// ---------------------------------------------------------------------------

pub struct Bls12_381FrParams;

impl FieldParams<4> for Bls12_381FrParams {
    const MODULUS: [u64; 4] = [
        0xffffffff00000001,
        0x53bda402fffe5bfe,
        0x3339d80809a1d805,
        0x73eda753299d7d48,
    ];
    const GENERATOR: u64 = 7;
}

pub type Fr = Field<Bls12_381FrParams, 4>;

// ---------------------------------------------------------------------------
// Tower: Fq2 = Fq[u]/(u² + 1), Fq6 = Fq2[v]/(v³ - (1 + u)), Fq12
// ---------------------------------------------------------------------------

impl Fq2Params<6> for Bls12381FqParams {
    /// ν = -1 (i.e. p - 1).
    #[inline]
    fn mul_base_by_non_residue(a: &Fq) -> Fq {
        a.negate()
    }
}

pub type Fq2 = Field2<Bls12381FqParams, 6>;
pub type Fq6 = Field6<Bls12381FqParams, 6>;
pub type Fq12 = Field12<Bls12381FqParams, 6>;

fn xi() -> Fq2 {
    Fq2::new(Fq::one(), Fq::one())
}

impl Fq6Params<6> for Bls12381FqParams {
    /// ξ = 1 + u: (a0 + a1·u)(1 + u) = (a0 - a1) + (a0 + a1)·u
    #[inline]
    fn mul_by_non_residue(a: &Fq2) -> Fq2 {
        Fq2::new(a.c0 - a.c1, a.c0 + a.c1)
    }

    fn frobenius_coeffs_c1_1() -> Fq2 {
        Fq2::new(
            Fq::zero(),
            Fq::from_raw([0x890dc9e4867545c3, 0x2af322533285a5d5, 0x50880866309b7e2c, 0xa20d1b8c7e881024, 0x14e4f04fe2db9068, 0x14e56d3f1564853a]),
        )
    }

    fn frobenius_coeffs_c1_2() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xcd03c9e48671f071, 0x5dab22461fcda5d2, 0x587042afd3851b95, 0x8eb60ebe01bacb9e, 0x03f97d6e83d050d2, 0x18f0206554638741]),
            Fq::zero(),
        )
    }

    fn frobenius_coeffs_c1_3() -> Fq2 {
        Fq2::new(
            Fq::zero(),
            Fq::from_raw([0x43f5fffffffcaaae, 0x32b7fff2ed47fffd, 0x07e83a49a2e99d69, 0xeca8f3318332bb7a, 0xef148d1ea0f4c069, 0x040ab3263eff0206]),
        )
    }

    // c2[k] = ξ^(2k(p-1)/3) = c1[k]².
    fn frobenius_coeffs_c2_1() -> Fq2 {
        Self::frobenius_coeffs_c1_1().sqr()
    }

    fn frobenius_coeffs_c2_2() -> Fq2 {
        Self::frobenius_coeffs_c1_2().sqr()
    }

    fn frobenius_coeffs_c2_3() -> Fq2 {
        Self::frobenius_coeffs_c1_3().sqr()
    }
}

static FROBENIUS_FP12_C1: OnceLock<[Fq2; 4]> = OnceLock::new();

fn fp12_frobenius_coeffs() -> &'static [Fq2; 4] {
    FROBENIUS_FP12_C1.get_or_init(|| {
        let chain = frobenius::fp2_coeff_chain(xi(), 6, 4);
        [chain[0], chain[1], chain[2], chain[3]]
    })
}

impl Fq12Params<6> for Bls12381FqParams {
    fn frobenius_coefficients_1() -> Fq2 {
        fp12_frobenius_coeffs()[1]
    }

    fn frobenius_coefficients_2() -> Fq2 {
        fp12_frobenius_coeffs()[2]
    }

    fn frobenius_coefficients_3() -> Fq2 {
        fp12_frobenius_coeffs()[3]
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// G1: y² = x³ + 4 over Fq.
pub struct Bls12381G1Params;

impl GroupParams for Bls12381G1Params {
    type Coord = Fq;

    const HAS_A: bool = false;

    fn coeff_a() -> Fq {
        Fq::zero()
    }

    fn coeff_b() -> Fq {
        Fq::from(4)
    }

    fn generator_x() -> Fq {
        Fq::from_raw([0x5cb38790fd530c16, 0x7817fc679976fff5, 0x154f95c7143ba1c1, 0xf0ae6acdf3d0e747, 0xedce6ecc21dbf440, 0x120177419e0bfb75])
    }

    fn generator_y() -> Fq {
        Fq::from_raw([0xbaac93d50ce72271, 0x8c22631a7918fd8e, 0xdd595f13570725ce, 0x51ac582950405194, 0x0e1c8c3fad0059c0, 0x0bbc3efc5008a26a])
    }
}

/// G2: y² = x³ + 4(1 + u) over Fq2.
pub struct Bls12381G2Params;

impl GroupParams for Bls12381G2Params {
    type Coord = Fq2;

    const HAS_A: bool = false;

    fn coeff_a() -> Fq2 {
        Fq2::zero()
    }

    fn coeff_b() -> Fq2 {
        Fq2::new(Fq::from(4), Fq::from(4))
    }

    fn generator_x() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xf5f28fa202940a10, 0xb3f5fb2687b4961a, 0xa1a893b53e2ae580, 0x9894999d1a3caee9, 0x6f67b7631863366b, 0x058191924350bcd7]),
            Fq::from_raw([0xa5a9c0759e23f606, 0xaaa0c59dbccd60c3, 0x3bb17e18e2867806, 0x1b1ab6cc8541b367, 0xc2b6ed0ef2158547, 0x11922a097360edf3]),
        )
    }

    fn generator_y() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x4c730af860494c4a, 0x597cfa1f5e369c5a, 0xe7e6856caa0a635a, 0xbbefb5e96e0d495f, 0x07d3a975f0ef25a2, 0x0083fd8e7e80dae5]),
            Fq::from_raw([0xadc0fc92df64b05d, 0x18aa270a2b1461dc, 0x86adac6a3be4eba0, 0x79495c4ec93da33a, 0xe7175850a43ccaed, 0x0b2bc2a163de1bf2]),
        )
    }
}

pub type G1Affine = AffineElement<Bls12381G1Params>;
pub type G1Element = Element<Bls12381G1Params>;
pub type G2Affine = AffineElement<Bls12381G2Params>;
pub type G2Element = Element<Bls12381G2Params>;

// ---------------------------------------------------------------------------
// Pairing engine wiring
// ---------------------------------------------------------------------------

static TWIST_MUL_BY_Q_X: OnceLock<Fq2> = OnceLock::new();
static TWIST_MUL_BY_Q_Y: OnceLock<Fq2> = OnceLock::new();

pub struct Bls12_381;

impl Bls12Params<6> for Bls12_381 {
    type FqParams = Bls12381FqParams;
    type G1 = Bls12381G1Params;
    type G2 = Bls12381G2Params;

    /// |z| = 0xD201000000010000; the seed itself is negative.
    const ATE_LOOP_COUNT: &'static [u64] = &[0xd201000000010000];
    const ATE_IS_LOOP_COUNT_NEG: bool = true;

    const FINAL_EXPONENT_Z: &'static [u64] = &[0xd201000000010000];
    const FINAL_EXPONENT_IS_Z_NEG: bool = true;

    fn twist_coeff_b() -> Fq2 {
        Fq2::new(Fq::from(4), Fq::from(4))
    }

    /// ξ^(-(p-1)/3); the twist here multiplies by ξ, so the untwist walks
    /// through the inverse root.
    fn twist_mul_by_q_x() -> Fq2 {
        *TWIST_MUL_BY_Q_X.get_or_init(|| {
            Bls12381FqParams::frobenius_coeffs_c1_1()
                .inverse()
                .expect("Frobenius coefficient is non-zero")
        })
    }

    /// ξ^(-(p-1)/2) = (ξ^((p-1)/6))⁻³.
    fn twist_mul_by_q_y() -> Fq2 {
        *TWIST_MUL_BY_Q_Y.get_or_init(|| {
            let c = Bls12381FqParams::frobenius_coefficients_1();
            (c.sqr() * c)
                .inverse()
                .expect("Frobenius coefficient is non-zero")
        })
    }
}

pub type Pairing = Bls12<Bls12_381, 6>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_field_modulus_and_generator() {
        use crypto_bigint::Uint;
        let r = Uint::<4>::from_be_hex(
            "73EDA753299D7D483339D80809A1D80553BDA402FFFE5BFEFFFFFFFF00000001",
        );
        assert_eq!(r.to_words(), <Bls12_381FrParams as FieldParams<4>>::MODULUS);
        assert_eq!(<Bls12_381FrParams as FieldParams<4>>::GENERATOR, 7);
    }

    #[test]
    fn fr_generator_is_non_residue() {
        // Euler's criterion: 7^((r-1)/2) = r - 1.
        let seven = Fr::from(7);
        let e = seven.pow(&Fr::MODULUS_MINUS_ONE_DIV_TWO);
        assert_eq!(e, Fr::one().negate());
        assert_eq!(seven.legendre(), -1);
    }

    #[test]
    fn fr_two_adicity() {
        assert_eq!(Fr::TWO_ADICITY, 32);
    }

    #[test]
    fn fq2_non_residue_is_minus_one() {
        // ν = p - 1.
        let nu = Bls12381FqParams::mul_base_by_non_residue(&Fq::one());
        assert_eq!(nu, Fq::one().negate());
    }

    #[test]
    fn fq_field_laws() {
        for _ in 0..50 {
            let a = Fq::random_element();
            let b = Fq::random_element();
            let c = Fq::random_element();
            assert_eq!(a + b, b + a);
            assert_eq!((a + b) * c, a * c + b * c);
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fq::one());
            }
        }
    }

    #[test]
    fn fq_sqrt_of_square() {
        for _ in 0..10 {
            let a = Fq::random_element();
            let square = a.sqr();
            let root = square.sqrt().unwrap();
            assert_eq!(root.sqr(), square);
            assert_eq!(root.sgn0(), 0);
        }
    }

    #[test]
    fn stored_fq6_frobenius_tables_match_computed() {
        use crate::fields::frobenius;
        let chain = frobenius::fp2_coeff_chain(xi(), 3, 4);
        assert_eq!(chain[1], Bls12381FqParams::frobenius_coeffs_c1_1());
        assert_eq!(chain[2], Bls12381FqParams::frobenius_coeffs_c1_2());
        assert_eq!(chain[3], Bls12381FqParams::frobenius_coeffs_c1_3());
        assert_eq!(chain[1].sqr(), Bls12381FqParams::frobenius_coeffs_c2_1());
        assert_eq!(chain[2].sqr(), Bls12381FqParams::frobenius_coeffs_c2_2());
        assert_eq!(chain[3].sqr(), Bls12381FqParams::frobenius_coeffs_c2_3());
    }

    #[test]
    fn fp12_frobenius_coefficient_squares_to_fp6_level() {
        // (ξ^((p-1)/6))² = ξ^((p-1)/3).
        let c = Bls12381FqParams::frobenius_coefficients_1();
        assert_eq!(c.sqr(), Bls12381FqParams::frobenius_coeffs_c1_1());
    }

    #[test]
    fn fq12_frobenius_is_pth_power() {
        let p = <Bls12381FqParams as FieldParams<6>>::MODULUS;
        let a = Fq12::random_element();
        assert_eq!(a.frobenius_map(1), a.pow(&p));
    }

    #[test]
    fn generators_are_on_curve() {
        assert!(G1Affine::one().on_curve());
        assert!(G2Affine::one().on_curve());
    }

    #[test]
    fn subgroup_order_annihilates() {
        let r = <Bls12_381FrParams as FieldParams<4>>::MODULUS;
        assert_eq!(G1Element::one().mul_bits(&r), G1Element::infinity());
        assert_eq!(G2Element::one().mul_bits(&r), G2Element::infinity());
    }

    #[test]
    fn mul_by_q_is_multiplication_by_p() {
        // Frobenius acts as multiplication by p on the r-order subgroup.
        let p = <Bls12381FqParams as FieldParams<6>>::MODULUS;
        let q = G2Element::one();
        assert_eq!(Pairing::mul_by_q(&q), q.mul_bits(&p));
    }

    #[test]
    fn reduced_pairing_is_deterministic_and_nondegenerate() {
        let p = G1Affine::one();
        let q = G2Affine::one();

        let gt = Pairing::reduced_pairing(&p, &q).unwrap();
        assert_ne!(gt, Fq12::one(), "e(G1, G2) must not be 1");

        let gt_again = Pairing::reduced_pairing(&p, &q).unwrap();
        assert_eq!(gt, gt_again, "recomputation must be bit-identical");

        // GT has order r.
        let r = <Bls12_381FrParams as FieldParams<4>>::MODULUS;
        assert_eq!(gt.pow(&r), Fq12::one());
    }

    #[test]
    fn pairing_bilinearity() {
        let a: u64 = 12345;
        let b: u64 = 67890;

        let ap = G1Element::one().mul_bits(&[a]).to_affine();
        let bq = G2Element::one().mul_bits(&[b]).to_affine();

        let lhs = Pairing::reduced_pairing(&ap, &bq).unwrap();

        let base = Pairing::reduced_pairing(&G1Affine::one(), &G2Affine::one()).unwrap();
        let ab = Fr::from(a) * Fr::from(b);
        let rhs = base.pow(&ab.from_montgomery_form().data);

        assert_eq!(lhs, rhs);
    }

    #[test]
    fn final_exponentiation_is_idempotent() {
        let f = Pairing::pairing(&G1Affine::one(), &G2Affine::one()).unwrap();
        let once = Pairing::final_exponentiation(&f).unwrap();
        let twice = Pairing::final_exponentiation(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn double_miller_loop_matches_two_single_loops() {
        let p1 = G1Element::random_element().to_affine();
        let q1 = G2Element::one().mul_bits(&[97]).to_affine();
        let p2 = G1Element::random_element().to_affine();
        let q2 = G2Element::one().mul_bits(&[31]).to_affine();

        let prec_p1 = Pairing::precompute_g1(&p1).unwrap();
        let prec_q1 = Pairing::precompute_g2(&q1).unwrap();
        let prec_p2 = Pairing::precompute_g1(&p2).unwrap();
        let prec_q2 = Pairing::precompute_g2(&q2).unwrap();

        let combined =
            Pairing::double_miller_loop(&prec_p1, &prec_q1, &prec_p2, &prec_q2).unwrap();
        let separate = Pairing::miller_loop(&prec_p1, &prec_q1).unwrap()
            * Pairing::miller_loop(&prec_p2, &prec_q2).unwrap();
        assert_eq!(combined, separate);
    }

    #[test]
    fn precompute_rejects_bad_inputs() {
        use crate::errors::AlgebraError;

        let inf = G1Affine::infinity();
        assert!(matches!(
            Pairing::precompute_g1(&inf),
            Err(AlgebraError::InvalidInput(_))
        ));

        let off_curve = G2Affine::new(Fq2::one(), Fq2::one());
        assert!(matches!(
            Pairing::precompute_g2(&off_curve),
            Err(AlgebraError::InvalidInput(_))
        ));
    }

    #[test]
    fn miller_loop_rejects_truncated_precomputation() {
        use crate::errors::AlgebraError;

        let p = Pairing::precompute_g1(&G1Affine::one()).unwrap();
        let mut q = Pairing::precompute_g2(&G2Affine::one()).unwrap();
        q.coeffs.pop();
        assert!(matches!(
            Pairing::miller_loop(&p, &q),
            Err(AlgebraError::PrecomputationMismatch { .. })
        ));
    }
}
