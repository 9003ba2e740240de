// Frobenius coefficient construction.
//
// A degree-d extension built as F[x]/(x^d - ξ) has Frobenius coefficients
// c1[k] = ξ^((p^k - 1)/d). Tables are built once at startup from the
// modulus:
//
// - coefficients living in F_p satisfy c1[k] = c1[1]^k (p ≡ 1 mod d, so the
//   geometric sum 1 + p + … + p^(k-1) reduces to k modulo p - 1);
// - coefficients living in F_p² follow the chain c1[k+1] = c1[k]^p · c1[1],
//   where the p-power is the F_p² conjugation.
//
// Curve records that carry transcribed tables keep them; the computed chain
// is cross-checked against those tables in tests.

use crypto_bigint::{NonZero, Uint};

use super::field::Field;
use super::field2::{Field2, Fq2Params};
use super::field_params::FieldParams;

/// (p - 1) / divisor as little-endian exponent limbs.
///
/// Requires divisor | p - 1, which holds for every tower degree in use
/// (the base primes are all ≡ 1 mod 12 or are used only at degrees that
/// divide their p - 1).
pub(crate) fn power_exponent<P: FieldParams<N>, const N: usize>(divisor: u64) -> [u64; N] {
    let p = Uint::<N>::from_words(P::MODULUS);
    let pm1 = p.wrapping_sub(&Uint::ONE);
    let nz = NonZero::new(Uint::<N>::from_u64(divisor)).expect("divisor is non-zero");
    let (quotient, _) = pm1.div_rem(&nz);
    quotient.to_words()
}

/// Frobenius coefficients in the base field: [1, b, b², …] with
/// b = ξ^((p-1)/degree).
pub(crate) fn fp_coeff_chain<P: FieldParams<N>, const N: usize>(
    xi: Field<P, N>,
    degree: u64,
    count: usize,
) -> Vec<Field<P, N>> {
    let base = xi.pow(&power_exponent::<P, N>(degree));
    let mut coeffs = Vec::with_capacity(count);
    let mut current = Field::one();
    for _ in 0..count {
        coeffs.push(current);
        current = current * base;
    }
    coeffs
}

/// Frobenius coefficients in F_p²: c1[0] = 1, c1[1] = ξ^((p-1)/degree),
/// c1[k+1] = c1[k]^p · c1[1].
pub(crate) fn fp2_coeff_chain<P: Fq2Params<N>, const N: usize>(
    xi: Field2<P, N>,
    degree: u64,
    count: usize,
) -> Vec<Field2<P, N>> {
    let base = xi.pow(&power_exponent::<P, N>(degree));
    let mut coeffs = Vec::with_capacity(count);
    let mut current = Field2::one();
    for k in 0..count {
        coeffs.push(current);
        if k + 1 < count {
            current = current.frobenius_map(1) * base;
        }
    }
    coeffs
}
