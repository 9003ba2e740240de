// Optimal ate pairing for the BLS12 curve family.
//
// e: G1 x G2 -> GT with GT the order-r cyclotomic subgroup of F_{p^12}.
// The ate loop runs over the bits of the curve seed z; for negative seeds
// the Miller output is inverted after the bit scan. The hard part of the
// final exponentiation computes f^((q⁴ - q² + 1)/r) with five
// exponentiations by z, two cyclotomic squarings and Frobenius maps of
// degree one, two and three.

use std::marker::PhantomData;

use super::{
    ate_loop_bits, doubling_step_for_flipped_miller_loop, loop_coeff_count,
    mixed_addition_step_for_flipped_miller_loop, G1Precomp, G2Precomp, TwistPoint,
};
use crate::errors::{AlgebraError, AlgebraResult};
use crate::fields::field::Field;
use crate::fields::field12::{Field12, Fq12Params};
use crate::fields::field2::Field2;
use crate::groups::affine_element::AffineElement;
use crate::groups::element::Element;
use crate::groups::group_params::GroupParams;

/// Parameters tying a BLS12 curve's tower, groups and loop constants
/// together.
pub trait Bls12Params<const N: usize>: 'static + Send + Sync + Sized {
    type FqParams: Fq12Params<N>;
    type G1: GroupParams<Coord = Field<Self::FqParams, N>>;
    type G2: GroupParams<Coord = Field2<Self::FqParams, N>>;

    /// |z|, the absolute value of the curve seed driving the ate loop.
    const ATE_LOOP_COUNT: &'static [u64];
    const ATE_IS_LOOP_COUNT_NEG: bool;

    /// |z| again, as the final-exponentiation seed.
    const FINAL_EXPONENT_Z: &'static [u64];
    const FINAL_EXPONENT_IS_Z_NEG: bool;

    /// b' of the twist curve y² = x³ + b'.
    fn twist_coeff_b() -> Field2<Self::FqParams, N>;

    /// Twist-Frobenius constants for the untwist-Frobenius-retwist map.
    fn twist_mul_by_q_x() -> Field2<Self::FqParams, N>;
    fn twist_mul_by_q_y() -> Field2<Self::FqParams, N>;
}

pub type Fq12Of<P, const N: usize> = Field12<<P as Bls12Params<N>>::FqParams, N>;

pub struct Bls12<P: Bls12Params<N>, const N: usize>(PhantomData<P>);

impl<P: Bls12Params<N>, const N: usize> Bls12<P, N> {
    /// Frobenius endomorphism on G2 through the twist isomorphism.
    pub fn mul_by_q(a: &Element<P::G2>) -> Element<P::G2> {
        Element::new(
            P::twist_mul_by_q_x() * a.x.frobenius_map(1),
            P::twist_mul_by_q_y() * a.y.frobenius_map(1),
            a.z.frobenius_map(1),
        )
    }

    pub fn precompute_g1(
        p: &AffineElement<P::G1>,
    ) -> AlgebraResult<G1Precomp<P::FqParams, N>> {
        if p.is_point_at_infinity() {
            return Err(AlgebraError::InvalidInput("pairing input is the identity"));
        }
        if !p.on_curve() {
            return Err(AlgebraError::InvalidInput("pairing input is off-curve"));
        }
        Ok(G1Precomp { px: p.x, py: p.y })
    }

    /// Run the ate loop once over Q, storing the line coefficients.
    pub fn precompute_g2(
        q: &AffineElement<P::G2>,
    ) -> AlgebraResult<G2Precomp<P::FqParams, N>> {
        if q.is_point_at_infinity() {
            return Err(AlgebraError::InvalidInput("pairing input is the identity"));
        }
        if !q.on_curve() {
            return Err(AlgebraError::InvalidInput("pairing input is off-curve"));
        }

        let two_inv = Field::<P::FqParams, N>::from(2).inverse()?;
        let twist_coeff_b = P::twist_coeff_b();

        let bits = ate_loop_bits(P::ATE_LOOP_COUNT);
        let mut coeffs = Vec::with_capacity(loop_coeff_count(&bits));
        let mut r = TwistPoint::from_affine(q.x, q.y);

        for bit in bits {
            coeffs.push(doubling_step_for_flipped_miller_loop(
                two_inv,
                &twist_coeff_b,
                &mut r,
            ));
            if bit {
                coeffs.push(mixed_addition_step_for_flipped_miller_loop(
                    &q.x, &q.y, &mut r,
                ));
            }
        }

        Ok(G2Precomp {
            qx: q.x,
            qy: q.y,
            coeffs,
        })
    }

    pub fn miller_loop(
        prec_p: &G1Precomp<P::FqParams, N>,
        prec_q: &G2Precomp<P::FqParams, N>,
    ) -> AlgebraResult<Fq12Of<P, N>> {
        let bits = ate_loop_bits(P::ATE_LOOP_COUNT);
        let expected = loop_coeff_count(&bits);
        if prec_q.coeffs.len() != expected {
            return Err(AlgebraError::PrecomputationMismatch {
                available: prec_q.coeffs.len(),
                consumed: expected,
            });
        }

        let mut f = Fq12Of::<P, N>::one();
        let mut idx = 0;

        for bit in bits {
            f = f.sqr();
            let c = &prec_q.coeffs[idx];
            idx += 1;
            f.mul_by_024(c.ell_0, c.ell_vw.mul_by_fq(prec_p.py), c.ell_vv.mul_by_fq(prec_p.px));

            if bit {
                let c = &prec_q.coeffs[idx];
                idx += 1;
                f.mul_by_024(c.ell_0, c.ell_vw.mul_by_fq(prec_p.py), c.ell_vv.mul_by_fq(prec_p.px));
            }
        }

        if P::ATE_IS_LOOP_COUNT_NEG {
            f = f.inverse()?;
        }
        Ok(f)
    }

    /// Two precomputed coefficient streams against one shared squaring per
    /// iteration.
    pub fn double_miller_loop(
        prec_p1: &G1Precomp<P::FqParams, N>,
        prec_q1: &G2Precomp<P::FqParams, N>,
        prec_p2: &G1Precomp<P::FqParams, N>,
        prec_q2: &G2Precomp<P::FqParams, N>,
    ) -> AlgebraResult<Fq12Of<P, N>> {
        let bits = ate_loop_bits(P::ATE_LOOP_COUNT);
        let expected = loop_coeff_count(&bits);
        for prec_q in [prec_q1, prec_q2] {
            if prec_q.coeffs.len() != expected {
                return Err(AlgebraError::PrecomputationMismatch {
                    available: prec_q.coeffs.len(),
                    consumed: expected,
                });
            }
        }

        let mut f = Fq12Of::<P, N>::one();
        let mut idx = 0;

        for bit in bits {
            f = f.sqr();

            let c1 = &prec_q1.coeffs[idx];
            let c2 = &prec_q2.coeffs[idx];
            idx += 1;
            f.mul_by_024(c1.ell_0, c1.ell_vw.mul_by_fq(prec_p1.py), c1.ell_vv.mul_by_fq(prec_p1.px));
            f.mul_by_024(c2.ell_0, c2.ell_vw.mul_by_fq(prec_p2.py), c2.ell_vv.mul_by_fq(prec_p2.px));

            if bit {
                let c1 = &prec_q1.coeffs[idx];
                let c2 = &prec_q2.coeffs[idx];
                idx += 1;
                f.mul_by_024(c1.ell_0, c1.ell_vw.mul_by_fq(prec_p1.py), c1.ell_vv.mul_by_fq(prec_p1.px));
                f.mul_by_024(c2.ell_0, c2.ell_vw.mul_by_fq(prec_p2.py), c2.ell_vv.mul_by_fq(prec_p2.px));
            }
        }

        if P::ATE_IS_LOOP_COUNT_NEG {
            f = f.inverse()?;
        }
        Ok(f)
    }

    /// z-power in the cyclotomic subgroup.
    fn exp_by_z(elt: &Fq12Of<P, N>) -> Fq12Of<P, N> {
        let mut result = elt.cyclotomic_exp(P::FINAL_EXPONENT_Z);
        if P::FINAL_EXPONENT_IS_Z_NEG {
            result = result.unitary_inverse();
        }
        result
    }

    /// Easy part: f^((q⁶ - 1)(q² + 1)) lifts f into the cyclotomic subgroup.
    fn final_exponentiation_first_chunk(
        elt: &Fq12Of<P, N>,
    ) -> AlgebraResult<Fq12Of<P, N>> {
        let a = elt.unitary_inverse();
        let b = elt.inverse()?;
        let c = a * b;
        let d = c.frobenius_map(2);
        Ok(d * c)
    }

    /// Hard part: f^((q⁴ - q² + 1)/r) via the fixed addition chain.
    fn final_exponentiation_last_chunk(elt: &Fq12Of<P, N>) -> Fq12Of<P, N> {
        let a = elt.cyclotomic_squared(); // elt^2
        let b = a.unitary_inverse(); // elt^(-2)
        let c = Self::exp_by_z(elt); // elt^z
        let d = c.cyclotomic_squared(); // elt^(2z)
        let e = b * c; // elt^(z-2)
        let f = Self::exp_by_z(&e); // elt^(z²-2z)
        let g = Self::exp_by_z(&f); // elt^(z³-2z²)
        let h = Self::exp_by_z(&g); // elt^(z⁴-2z³)
        let i = h * d; // elt^(z⁴-2z³+2z)
        let j = Self::exp_by_z(&i); // elt^(z⁵-2z⁴+2z²)
        let k = e.unitary_inverse(); // elt^(-z+2)
        let l = k * j;
        let m = *elt * l;
        let n = elt.unitary_inverse();
        let o = f * *elt;
        let p = o.frobenius_map(3);
        let q = i * n;
        let r = q.frobenius_map(1);
        let s = c * g;
        let t = s.frobenius_map(2);
        let u = t * p;
        let v = u * r;
        v * m
    }

    pub fn final_exponentiation(elt: &Fq12Of<P, N>) -> AlgebraResult<Fq12Of<P, N>> {
        let lifted = Self::final_exponentiation_first_chunk(elt)?;
        Ok(Self::final_exponentiation_last_chunk(&lifted))
    }

    pub fn pairing(
        p: &AffineElement<P::G1>,
        q: &AffineElement<P::G2>,
    ) -> AlgebraResult<Fq12Of<P, N>> {
        let prec_p = Self::precompute_g1(p)?;
        let prec_q = Self::precompute_g2(q)?;
        Self::miller_loop(&prec_p, &prec_q)
    }

    pub fn reduced_pairing(
        p: &AffineElement<P::G1>,
        q: &AffineElement<P::G2>,
    ) -> AlgebraResult<Fq12Of<P, N>> {
        let f = Self::pairing(p, q)?;
        Self::final_exponentiation(&f)
    }
}
