// Ate-pairing machinery shared by the curve families.
//
// The Miller loop works against precomputed line coefficients: all G2
// arithmetic happens once in `precompute_g2`-style routines, and the loop
// itself touches only the F_{p^12} accumulator and two base-field scalars
// of the G1 point. The doubling and mixed-addition steps below run on the
// twist in homogeneous projective coordinates and emit one `EllCoeffs`
// record each.

pub mod alt_bn128;
pub mod bls12;
pub mod mnt;

use crate::fields::field::Field;
use crate::fields::field2::Field2;
use crate::fields::field6::Fq6Params;
use pst_numeric::bitop::get_msb64;

/// Line-evaluation coefficients: the sparse (0, 2, 4) coordinates of a
/// Miller-loop line in the tower basis.
pub struct EllCoeffs<P: Fq6Params<N>, const N: usize> {
    pub ell_0: Field2<P, N>,
    pub ell_vw: Field2<P, N>,
    pub ell_vv: Field2<P, N>,
}

impl<P: Fq6Params<N>, const N: usize> Clone for EllCoeffs<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq6Params<N>, const N: usize> Copy for EllCoeffs<P, N> {}

impl<P: Fq6Params<N>, const N: usize> std::fmt::Debug for EllCoeffs<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EllCoeffs({:?}, {:?}, {:?})",
            self.ell_0, self.ell_vw, self.ell_vv
        )
    }
}

/// Precomputed G1 input: the affine coordinates, which enter the loop only
/// as scalars on the line coefficients.
pub struct G1Precomp<P: Fq6Params<N>, const N: usize> {
    pub px: Field<P, N>,
    pub py: Field<P, N>,
}

impl<P: Fq6Params<N>, const N: usize> Clone for G1Precomp<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq6Params<N>, const N: usize> Copy for G1Precomp<P, N> {}

/// Precomputed G2 input: the affine coordinates plus the ordered line
/// coefficients produced by one walk of the ate loop.
pub struct G2Precomp<P: Fq6Params<N>, const N: usize> {
    pub qx: Field2<P, N>,
    pub qy: Field2<P, N>,
    pub coeffs: Vec<EllCoeffs<P, N>>,
}

/// The ate-loop working point on the twist, in homogeneous projective
/// coordinates (x = X/Z, y = Y/Z).
pub(crate) struct TwistPoint<P: Fq6Params<N>, const N: usize> {
    pub x: Field2<P, N>,
    pub y: Field2<P, N>,
    pub z: Field2<P, N>,
}

impl<P: Fq6Params<N>, const N: usize> TwistPoint<P, N> {
    pub fn from_affine(x: Field2<P, N>, y: Field2<P, N>) -> Self {
        Self {
            x,
            y,
            z: Field2::one(),
        }
    }
}

/// Doubling step of the flipped Miller loop: R <- 2R, emitting the tangent
/// line at R.
pub(crate) fn doubling_step_for_flipped_miller_loop<P: Fq6Params<N>, const N: usize>(
    two_inv: Field<P, N>,
    twist_coeff_b: &Field2<P, N>,
    current: &mut TwistPoint<P, N>,
) -> EllCoeffs<P, N> {
    let x = current.x;
    let y = current.y;
    let z = current.z;

    let a = (x * y).mul_by_fq(two_inv); // A = X·Y / 2
    let b = y.sqr(); // B = Y²
    let c = z.sqr(); // C = Z²
    let d = c + c + c; // D = 3C
    let e = *twist_coeff_b * d; // E = b'·D
    let f = e + e + e; // F = 3E
    let g = (b + f).mul_by_fq(two_inv); // G = (B + F)/2
    let h = (y + z).sqr() - (b + c); // H = (Y + Z)² - (B + C)
    let i = e - b; // I = E - B
    let j = x.sqr(); // J = X²
    let e_squared = e.sqr();

    current.x = a * (b - f);
    current.y = g.sqr() - (e_squared + e_squared + e_squared);
    current.z = b * h;

    EllCoeffs {
        ell_0: P::mul_by_non_residue(&i),
        ell_vw: -h,
        ell_vv: j + j + j,
    }
}

/// Mixed addition step of the flipped Miller loop: R <- R + Q for an affine
/// Q, emitting the chord line through R and Q.
pub(crate) fn mixed_addition_step_for_flipped_miller_loop<P: Fq6Params<N>, const N: usize>(
    base_x: &Field2<P, N>,
    base_y: &Field2<P, N>,
    current: &mut TwistPoint<P, N>,
) -> EllCoeffs<P, N> {
    let x1 = current.x;
    let y1 = current.y;
    let z1 = current.z;

    let d = x1 - *base_x * z1; // D = X1 - X2·Z1
    let e = y1 - *base_y * z1; // E = Y1 - Y2·Z1
    let f = d.sqr();
    let g = e.sqr();
    let h = d * f;
    let i = x1 * f;
    let j = h + z1 * g - (i + i);

    current.x = d * j;
    current.y = e * (i - j) - (h * y1);
    current.z = z1 * h;

    EllCoeffs {
        ell_0: P::mul_by_non_residue(&(e * *base_x - d * *base_y)),
        ell_vv: -e,
        ell_vw: d,
    }
}

/// The ate-loop bit sequence: all bits of the loop count below the most
/// significant one, MSB-first.
pub(crate) fn ate_loop_bits(loop_count: &[u64]) -> Vec<bool> {
    let mut msb = 0u32;
    for i in (0..loop_count.len()).rev() {
        if loop_count[i] != 0 {
            msb = i as u32 * 64 + get_msb64(loop_count[i]);
            break;
        }
    }

    let mut bits = Vec::with_capacity(msb as usize);
    for i in (0..msb).rev() {
        bits.push((loop_count[(i / 64) as usize] >> (i % 64)) & 1 == 1);
    }
    bits
}

/// The coefficient count one walk of the loop produces (a doubling per bit
/// plus an addition per set bit), before any family-specific closing steps.
pub(crate) fn loop_coeff_count(bits: &[bool]) -> usize {
    bits.len() + bits.iter().filter(|&&b| b).count()
}
