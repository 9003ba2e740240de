// alt_bn128-254 parameter record.
//
// Base and scalar fields at 4 limbs, the (9 + u) sextic tower, the twist
// constants of the ate pairing and the group generators. Frobenius and
// twist constants are stored as raw Montgomery-form limbs.

use crate::fields::field::Field;
use crate::fields::field12::{Field12, Fq12Params};
use crate::fields::field2::{Field2, Fq2Params};
use crate::fields::field6::{Field6, Fq6Params};
use crate::fields::field_params::FieldParams;
use crate::groups::affine_element::AffineElement;
use crate::groups::element::Element;
use crate::groups::group_params::GroupParams;

// ---------------------------------------------------------------------------
// Base field Fq
// ---------------------------------------------------------------------------

pub struct Bn254FqParams;

impl FieldParams<4> for Bn254FqParams {
    const MODULUS: [u64; 4] = [
        0x3C208C16D87CFD47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const GENERATOR: u64 = 0;
}

pub type Fq = Field<Bn254FqParams, 4>;

// ---------------------------------------------------------------------------
// Scalar field Fr
// ---------------------------------------------------------------------------

pub struct Bn254FrParams;

impl FieldParams<4> for Bn254FrParams {
    const MODULUS: [u64; 4] = [
        0x43E1F593F0000001,
        0x2833E84879B97091,
        0xB85045B68181585D,
        0x30644E72E131A029,
    ];
    const GENERATOR: u64 = 0;
}

pub type Fr = Field<Bn254FrParams, 4>;

// ---------------------------------------------------------------------------
// Tower: Fq2 = Fq[u]/(u² + 1), Fq6 = Fq2[v]/(v³ - (9 + u)), Fq12
// ---------------------------------------------------------------------------

impl Fq2Params<4> for Bn254FqParams {
    /// ν = -1.
    #[inline]
    fn mul_base_by_non_residue(a: &Fq) -> Fq {
        a.negate()
    }
}

pub type Fq2 = Field2<Bn254FqParams, 4>;
pub type Fq6 = Field6<Bn254FqParams, 4>;
pub type Fq12 = Field12<Bn254FqParams, 4>;

impl Fq6Params<4> for Bn254FqParams {
    /// ξ = 9 + u: (a0 + a1·u)(9 + u) = (9·a0 - a1) + (9·a1 + a0)·u
    fn mul_by_non_residue(a: &Fq2) -> Fq2 {
        let mut t0 = a.c0 + a.c0;
        t0 += t0; // 4·a0
        t0 += t0; // 8·a0
        t0 += a.c0; // 9·a0
        let mut t1 = a.c1 + a.c1;
        t1 += t1;
        t1 += t1;
        t1 += a.c1; // 9·a1
        Fq2::new(t0 - a.c1, t1 + a.c0)
    }

    fn frobenius_coeffs_c1_1() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xb5773b104563ab30, 0x347f91c8a9aa6454, 0x7a007127242e0991, 0x1956bcd8118214ec]),
            Fq::from_raw([0x6e849f1ea0aa4757, 0xaa1c7b6d89f89141, 0xb6e713cdfae0ca3a, 0x26694fbb4e82ebc3]),
        )
    }

    fn frobenius_coeffs_c1_2() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x3350c88e13e80b9c, 0x7dce557cdb5e56b9, 0x6001b4b8b615564a, 0x2682e617020217e0]),
            Fq::zero(),
        )
    }

    fn frobenius_coeffs_c1_3() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xc9af22f716ad6bad, 0xb311782a4aa662b2, 0x19eeaf64e248c7f4, 0x20273e77e3439f82]),
            Fq::from_raw([0xacc02860f7ce93ac, 0x3933d5817ba76b4c, 0x69e6188b446c8467, 0x0a46036d4417cc55]),
        )
    }

    fn frobenius_coeffs_c2_1() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x7361d77f843abe92, 0xa5bb2bd3273411fb, 0x9c941f314b3e2399, 0x15df9cddbb9fd3ec]),
            Fq::from_raw([0x5dddfd154bd8c949, 0x62cb29a5a4445b60, 0x37bc870a0c7dd2b9, 0x24830a9d3171f0fd]),
        )
    }

    fn frobenius_coeffs_c2_2() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x71930c11d782e155, 0xa6bb947cffbe3323, 0xaa303344d4741444, 0x2c3b3f0d26594943]),
            Fq::zero(),
        )
    }

    fn frobenius_coeffs_c2_3() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x448a93a57b6762df, 0xbfd62df528fdeadf, 0xd858f5d00e9bd47a, 0x06b03d4d3476ec58]),
            Fq::from_raw([0x2b19daf4bcc936d1, 0xa1a54e7a56f4299f, 0xb533eee05adeaef1, 0x170c812b84dda0b2]),
        )
    }
}

impl Fq12Params<4> for Bn254FqParams {
    fn frobenius_coefficients_1() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xaf9ba69633144907, 0xca6b1d7387afb78a, 0x11bded5ef08a2087, 0x02f34d751a1f3a7c]),
            Fq::from_raw([0xa222ae234c492d72, 0xd00f02a4565de15b, 0xdc2ff3a253dfc926, 0x10a75716b3899551]),
        )
    }

    fn frobenius_coefficients_2() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0xca8d800500fa1bf2, 0xf0c5d61468b39769, 0x0e201271ad0d4418, 0x04290f65bad856e6]),
            Fq::zero(),
        )
    }

    fn frobenius_coefficients_3() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x365316184e46d97d, 0x0af7129ed4c96d9f, 0x659da72fca1009b5, 0x08116d8983a20d23]),
            Fq::from_raw([0xb1df4af7c39c1939, 0x3d9f02878a73bf7f, 0x9b2220928caf0ae0, 0x26684515eff054a6]),
        )
    }
}

// ---------------------------------------------------------------------------
// Twist constants
// ---------------------------------------------------------------------------

impl Field2<Bn254FqParams, 4> {
    /// Twist coefficient b' = b / ξ = 3 / (9 + u) for the G2 curve.
    pub fn twist_coeff_b() -> Self {
        Self::new(
            Fq::from_raw([0x3bf938e377b802a8, 0x020b1b273633535d, 0x26b7edf049755260, 0x2514c6324384a86d]),
            Fq::from_raw([0x38e7ecccd1dcff67, 0x65f0b37d93ce0d3e, 0xd749d0dd22ac00aa, 0x0141b9ce4a688d4d]),
        )
    }

    /// Twist-Frobenius constant for the G2 x-coordinate.
    pub fn twist_mul_by_q_x() -> Self {
        Self::new(
            Fq::from_raw([0xb5773b104563ab30, 0x347f91c8a9aa6454, 0x7a007127242e0991, 0x1956bcd8118214ec]),
            Fq::from_raw([0x6e849f1ea0aa4757, 0xaa1c7b6d89f89141, 0xb6e713cdfae0ca3a, 0x26694fbb4e82ebc3]),
        )
    }

    /// Twist-Frobenius constant for the G2 y-coordinate.
    pub fn twist_mul_by_q_y() -> Self {
        Self::new(
            Fq::from_raw([0xe4bbdd0c2936b629, 0xbb30f162e133bacb, 0x31a9d1b6f9645366, 0x253570bea500f8dd]),
            Fq::from_raw([0xa1d77ce45ffe77c7, 0x07affd117826d1db, 0x6d16bd27bb7edc6b, 0x2c87200285defecc]),
        )
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// G1: y² = x³ + 3 over Fq, generator (1, y).
pub struct Bn254G1Params;

impl GroupParams for Bn254G1Params {
    type Coord = Fq;

    const HAS_A: bool = false;

    fn coeff_a() -> Fq {
        Fq::zero()
    }

    /// b = 3 in Montgomery form.
    fn coeff_b() -> Fq {
        Fq::from_raw([0x7a17caa950ad28d7, 0x1f6ac17ae15521b9, 0x334bea4e696bd284, 0x2a1f6744ce179d8e])
    }

    fn generator_x() -> Fq {
        Fq::one()
    }

    fn generator_y() -> Fq {
        Fq::from_raw([0xa6ba871b8b1e1b3a, 0x14f1d651eb8e167b, 0xccdd46def0f28c58, 0x1c14ef83340fbe5e])
    }
}

/// G2: y² = x³ + b/ξ over Fq2.
pub struct Bn254G2Params;

impl GroupParams for Bn254G2Params {
    type Coord = Fq2;

    const HAS_A: bool = false;

    fn coeff_a() -> Fq2 {
        Fq2::zero()
    }

    fn coeff_b() -> Fq2 {
        Fq2::twist_coeff_b()
    }

    fn generator_x() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x8e83b5d102bc2026, 0xdceb1935497b0172, 0xfbb8264797811adf, 0x19573841af96503b]),
            Fq::from_raw([0xafb4737da84c6140, 0x6043dd5a5802d8c4, 0x09e950fc52a02f86, 0x14fef0833aea7b6b]),
        )
    }

    fn generator_y() -> Fq2 {
        Fq2::new(
            Fq::from_raw([0x619dfa9d886be9f6, 0xfe7fd297f59e9b78, 0xff9e1a62231b7dfe, 0x28fd7eebae9e4206]),
            Fq::from_raw([0x64095b56c71856ee, 0xdc57f922327d3cbb, 0x55f935be33351076, 0x0da4a0e693fd6482]),
        )
    }
}

pub type G1Affine = AffineElement<Bn254G1Params>;
pub type G1Element = Element<Bn254G1Params>;
pub type G2Affine = AffineElement<Bn254G2Params>;
pub type G2Element = Element<Bn254G2Params>;

// ---------------------------------------------------------------------------
// Pairing constants
// ---------------------------------------------------------------------------

/// 6z + 2 = 29793968203157093288, the optimal ate loop count.
pub const ATE_LOOP_COUNT: [u64; 2] = [0x9D797039BE763BA8, 0x1];
pub const ATE_IS_LOOP_COUNT_NEG: bool = false;

/// z = 4965661367192848881, the curve seed (positive; the hard part of the
/// final exponentiation exponentiates by -z).
pub const FINAL_EXPONENT_Z: [u64; 1] = [0x44E992B44A6909F1];
pub const FINAL_EXPONENT_IS_Z_NEG: bool = false;
