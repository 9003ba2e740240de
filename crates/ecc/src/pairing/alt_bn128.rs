// Optimal ate pairing for alt_bn128 (BN254).
//
// Same flipped-Miller-loop structure as the BLS12 family, plus the two
// closing addition steps of the BN ate pairing against Q1 = π(Q) and
// Q2 = -π²(Q). The hard part of the final exponentiation follows the
// Fuentes-Castaneda "Faster hashing to G2" chain with three exponentiations
// by -z.

use super::{
    ate_loop_bits, doubling_step_for_flipped_miller_loop, loop_coeff_count,
    mixed_addition_step_for_flipped_miller_loop, G1Precomp, G2Precomp, TwistPoint,
};
use crate::curves::bn254::{
    Bn254FqParams, Bn254G1Params, Bn254G2Params, Fq, Fq12, Fq2, ATE_IS_LOOP_COUNT_NEG,
    ATE_LOOP_COUNT, FINAL_EXPONENT_IS_Z_NEG, FINAL_EXPONENT_Z,
};
use crate::errors::{AlgebraError, AlgebraResult};
use crate::groups::affine_element::AffineElement;
use crate::groups::element::Element;

pub type G1Affine = AffineElement<Bn254G1Params>;
pub type G2Affine = AffineElement<Bn254G2Params>;
pub type AteG1Precomp = G1Precomp<Bn254FqParams, 4>;
pub type AteG2Precomp = G2Precomp<Bn254FqParams, 4>;

/// Frobenius endomorphism on G2 through the twist isomorphism.
pub fn mul_by_q(a: &Element<Bn254G2Params>) -> Element<Bn254G2Params> {
    Element::new(
        Fq2::twist_mul_by_q_x() * a.x.frobenius_map(1),
        Fq2::twist_mul_by_q_y() * a.y.frobenius_map(1),
        a.z.frobenius_map(1),
    )
}

fn mul_by_q_affine(x: &Fq2, y: &Fq2) -> (Fq2, Fq2) {
    (
        Fq2::twist_mul_by_q_x() * x.frobenius_map(1),
        Fq2::twist_mul_by_q_y() * y.frobenius_map(1),
    )
}

pub fn precompute_g1(p: &G1Affine) -> AlgebraResult<AteG1Precomp> {
    if p.is_point_at_infinity() {
        return Err(AlgebraError::InvalidInput("pairing input is the identity"));
    }
    if !p.on_curve() {
        return Err(AlgebraError::InvalidInput("pairing input is off-curve"));
    }
    Ok(G1Precomp { px: p.x, py: p.y })
}

/// Run the ate loop once over Q, storing the line coefficients, then close
/// with the Q1 = π(Q) and Q2 = -π²(Q) addition steps.
pub fn precompute_g2(q: &G2Affine) -> AlgebraResult<AteG2Precomp> {
    if q.is_point_at_infinity() {
        return Err(AlgebraError::InvalidInput("pairing input is the identity"));
    }
    if !q.on_curve() {
        return Err(AlgebraError::InvalidInput("pairing input is off-curve"));
    }

    let two_inv = Fq::from(2).inverse()?;
    let twist_coeff_b = Fq2::twist_coeff_b();

    let bits = ate_loop_bits(&ATE_LOOP_COUNT);
    let mut coeffs = Vec::with_capacity(loop_coeff_count(&bits) + 2);
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

    let (q1_x, q1_y) = mul_by_q_affine(&q.x, &q.y);
    let (q2_x, q2_y) = mul_by_q_affine(&q1_x, &q1_y);

    if ATE_IS_LOOP_COUNT_NEG {
        r.y = -r.y;
    }
    let q2_y = -q2_y;

    coeffs.push(mixed_addition_step_for_flipped_miller_loop(
        &q1_x, &q1_y, &mut r,
    ));
    coeffs.push(mixed_addition_step_for_flipped_miller_loop(
        &q2_x, &q2_y, &mut r,
    ));

    Ok(G2Precomp {
        qx: q.x,
        qy: q.y,
        coeffs,
    })
}

pub fn miller_loop(prec_p: &AteG1Precomp, prec_q: &AteG2Precomp) -> AlgebraResult<Fq12> {
    let bits = ate_loop_bits(&ATE_LOOP_COUNT);
    let expected = loop_coeff_count(&bits) + 2;
    if prec_q.coeffs.len() != expected {
        return Err(AlgebraError::PrecomputationMismatch {
            available: prec_q.coeffs.len(),
            consumed: expected,
        });
    }

    let mut f = Fq12::one();
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

    if ATE_IS_LOOP_COUNT_NEG {
        f = f.inverse()?;
    }

    let c = &prec_q.coeffs[idx];
    idx += 1;
    f.mul_by_024(c.ell_0, c.ell_vw.mul_by_fq(prec_p.py), c.ell_vv.mul_by_fq(prec_p.px));

    let c = &prec_q.coeffs[idx];
    f.mul_by_024(c.ell_0, c.ell_vw.mul_by_fq(prec_p.py), c.ell_vv.mul_by_fq(prec_p.px));

    Ok(f)
}

/// Two precomputed coefficient streams against one shared squaring per
/// iteration.
pub fn double_miller_loop(
    prec_p1: &AteG1Precomp,
    prec_q1: &AteG2Precomp,
    prec_p2: &AteG1Precomp,
    prec_q2: &AteG2Precomp,
) -> AlgebraResult<Fq12> {
    let bits = ate_loop_bits(&ATE_LOOP_COUNT);
    let expected = loop_coeff_count(&bits) + 2;
    for prec_q in [prec_q1, prec_q2] {
        if prec_q.coeffs.len() != expected {
            return Err(AlgebraError::PrecomputationMismatch {
                available: prec_q.coeffs.len(),
                consumed: expected,
            });
        }
    }

    let mut f = Fq12::one();
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

    if ATE_IS_LOOP_COUNT_NEG {
        f = f.inverse()?;
    }

    for _ in 0..2 {
        let c1 = &prec_q1.coeffs[idx];
        let c2 = &prec_q2.coeffs[idx];
        idx += 1;
        f.mul_by_024(c1.ell_0, c1.ell_vw.mul_by_fq(prec_p1.py), c1.ell_vv.mul_by_fq(prec_p1.px));
        f.mul_by_024(c2.ell_0, c2.ell_vw.mul_by_fq(prec_p2.py), c2.ell_vv.mul_by_fq(prec_p2.px));
    }

    Ok(f)
}

/// (-z)-power in the cyclotomic subgroup. The alt_bn128 seed is positive,
/// so the unitary inversion applies.
fn exp_by_neg_z(elt: &Fq12) -> Fq12 {
    let mut result = elt.cyclotomic_exp(&FINAL_EXPONENT_Z);
    if !FINAL_EXPONENT_IS_Z_NEG {
        result = result.unitary_inverse();
    }
    result
}

/// Easy part: f^((q⁶ - 1)(q² + 1)).
fn final_exponentiation_first_chunk(elt: &Fq12) -> AlgebraResult<Fq12> {
    let a = elt.unitary_inverse();
    let b = elt.inverse()?;
    let c = a * b;
    let d = c.frobenius_map(2);
    Ok(d * c)
}

/// Hard part, following Fuentes-Castaneda et al. "Faster hashing to G2":
/// f^(q³·(12z³ + 6z² + 4z - 1) + q²·(12z³ + 6z² + 6z) +
///   q·(12z³ + 6z² + 4z) + (12z³ + 12z² + 6z + 1)).
fn final_exponentiation_last_chunk(elt: &Fq12) -> Fq12 {
    let a = exp_by_neg_z(elt); // elt^(-z)
    let b = a.cyclotomic_squared(); // elt^(-2z)
    let c = b.cyclotomic_squared(); // elt^(-4z)
    let d = c * b; // elt^(-6z)
    let e = exp_by_neg_z(&d); // elt^(6z²)
    let f = e.cyclotomic_squared(); // elt^(12z²)
    let g = exp_by_neg_z(&f); // elt^(-12z³)
    let h = d.unitary_inverse(); // elt^(6z)
    let i = g.unitary_inverse(); // elt^(12z³)
    let j = i * e; // elt^(12z³ + 6z²)
    let k = j * h; // elt^(12z³ + 6z² + 6z)
    let l = k * b; // elt^(12z³ + 6z² + 4z)
    let m = k * e; // elt^(12z³ + 12z² + 6z)
    let n = m * *elt; // elt^(12z³ + 12z² + 6z + 1)
    let o = l.frobenius_map(1);
    let p = o * n;
    let q = k.frobenius_map(2);
    let r = q * p;
    let s = elt.unitary_inverse();
    let t = s * l;
    let u = t.frobenius_map(3);
    u * r
}

pub fn final_exponentiation(elt: &Fq12) -> AlgebraResult<Fq12> {
    let lifted = final_exponentiation_first_chunk(elt)?;
    Ok(final_exponentiation_last_chunk(&lifted))
}

pub fn pairing(p: &G1Affine, q: &G2Affine) -> AlgebraResult<Fq12> {
    let prec_p = precompute_g1(p)?;
    let prec_q = precompute_g2(q)?;
    miller_loop(&prec_p, &prec_q)
}

pub fn reduced_pairing(p: &G1Affine, q: &G2Affine) -> AlgebraResult<Fq12> {
    let f = pairing(p, q)?;
    final_exponentiation(&f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::bn254::{Bn254FrParams, Fr, G1Element, G2Element};
    use crate::fields::field_params::FieldParams;

    #[test]
    fn pairing_nondegeneracy() {
        let result = reduced_pairing(&G1Affine::one(), &G2Affine::one()).unwrap();
        assert_ne!(result, Fq12::one(), "e(G1, G2) must not be 1");

        let r = <Bn254FrParams as FieldParams<4>>::MODULUS;
        assert_eq!(result.pow(&r), Fq12::one(), "e(G1, G2) must have order r");
    }

    #[test]
    fn pairing_is_additive_in_g1() {
        // e(a·P, Q) · e(b·P, Q) == e((a+b)·P, Q)
        let a = Fr::from(7);
        let b = Fr::from(13);
        let sum = a + b;

        let g = G1Element::one();
        let q = G2Affine::one();

        let ap = g.mul_bits(&a.from_montgomery_form().data).to_affine();
        let bp = g.mul_bits(&b.from_montgomery_form().data).to_affine();
        let abp = g.mul_bits(&sum.from_montgomery_form().data).to_affine();

        let lhs = reduced_pairing(&ap, &q).unwrap() * reduced_pairing(&bp, &q).unwrap();
        let rhs = reduced_pairing(&abp, &q).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn pairing_bilinearity_in_both_arguments() {
        let a: u64 = 12345;
        let b: u64 = 67890;

        let ap = G1Element::one().mul_bits(&[a]).to_affine();
        let bq = G2Element::one().mul_bits(&[b]).to_affine();

        let lhs = reduced_pairing(&ap, &bq).unwrap();
        let base = reduced_pairing(&G1Affine::one(), &G2Affine::one()).unwrap();
        let ab = Fr::from(a) * Fr::from(b);
        assert_eq!(lhs, base.pow(&ab.from_montgomery_form().data));
    }

    #[test]
    fn double_miller_loop_matches_two_single_loops() {
        let p1 = G1Element::random_element().to_affine();
        let q1 = G2Element::one().mul_bits(&[101]).to_affine();
        let p2 = G1Element::random_element().to_affine();
        let q2 = G2Element::one().mul_bits(&[57]).to_affine();

        let prec_p1 = precompute_g1(&p1).unwrap();
        let prec_q1 = precompute_g2(&q1).unwrap();
        let prec_p2 = precompute_g1(&p2).unwrap();
        let prec_q2 = precompute_g2(&q2).unwrap();

        let combined = double_miller_loop(&prec_p1, &prec_q1, &prec_p2, &prec_q2).unwrap();
        let separate =
            miller_loop(&prec_p1, &prec_q1).unwrap() * miller_loop(&prec_p2, &prec_q2).unwrap();
        assert_eq!(combined, separate);
    }

    #[test]
    fn final_exponentiation_is_idempotent() {
        let f = pairing(&G1Affine::one(), &G2Affine::one()).unwrap();
        let once = final_exponentiation(&f).unwrap();
        let twice = final_exponentiation(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn precompute_rejects_identity_and_off_curve_points() {
        use crate::errors::AlgebraError;

        assert!(matches!(
            precompute_g1(&G1Affine::infinity()),
            Err(AlgebraError::InvalidInput(_))
        ));
        assert!(matches!(
            precompute_g2(&G2Affine::infinity()),
            Err(AlgebraError::InvalidInput(_))
        ));

        let off_curve = G1Affine::new(Fq::from(2), Fq::from(2));
        assert!(matches!(
            precompute_g1(&off_curve),
            Err(AlgebraError::InvalidInput(_))
        ));
    }

    #[test]
    fn coefficient_stream_length_is_checked() {
        use crate::errors::AlgebraError;

        let prec_p = precompute_g1(&G1Affine::one()).unwrap();
        let mut prec_q = precompute_g2(&G2Affine::one()).unwrap();
        prec_q.coeffs.pop();
        assert!(matches!(
            miller_loop(&prec_p, &prec_q),
            Err(AlgebraError::PrecomputationMismatch { .. })
        ));
    }
}
