// Cubic extension field F_{p^3} = F_p[v] / (v^3 - ν)
//
// The G2 coordinate field of the MNT6 and Edwards curve families. Elements
// are triples (c0, c1, c2) of base-field elements.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field::Field;
use super::field_params::FieldParams;
use crate::errors::AlgebraResult;

/// Extends a base field with its cubic non-residue and the Frobenius
/// coefficients of the cubic tower.
pub trait Fq3Params<const N: usize>: FieldParams<N> {
    /// Multiply a base-field element by the non-residue ν with v³ = ν.
    fn mul_base_by_cubic_non_residue(a: &Field<Self, N>) -> Field<Self, N>;

    /// ν^(k·(p-1)/3), the coefficient on c1 of the p^k power map.
    fn frobenius_coeff_c1(k: usize) -> Field<Self, N>;

    /// ν^(2k·(p-1)/3), the coefficient on c2 of the p^k power map.
    fn frobenius_coeff_c2(k: usize) -> Field<Self, N>;
}

pub struct Field3<P: Fq3Params<N>, const N: usize> {
    pub c0: Field<P, N>,
    pub c1: Field<P, N>,
    pub c2: Field<P, N>,
}

impl<P: Fq3Params<N>, const N: usize> Clone for Field3<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq3Params<N>, const N: usize> Copy for Field3<P, N> {}

impl<P: Fq3Params<N>, const N: usize> std::fmt::Debug for Field3<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field3({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<P: Fq3Params<N>, const N: usize> Field3<P, N> {
    #[inline]
    pub const fn new(c0: Field<P, N>, c1: Field<P, N>, c2: Field<P, N>) -> Self {
        Self { c0, c1, c2 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Field::zero(), Field::zero(), Field::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Field::one(), Field::zero(), Field::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    /// Multiply each component by a base field element.
    #[inline]
    pub fn mul_by_fq(&self, a: Field<P, N>) -> Self {
        Self::new(a * self.c0, a * self.c1, a * self.c2)
    }

    /// Squaring via CH-SQR2 (Devegili et al.).
    pub fn sqr(&self) -> Self {
        let s0 = self.c0.sqr();
        let mut s1 = self.c0 * self.c1;
        s1 += s1;
        let s2 = (self.c0 + self.c2 - self.c1).sqr();
        let mut s3 = self.c1 * self.c2;
        s3 += s3;
        let s4 = self.c2.sqr();
        Self::new(
            P::mul_base_by_cubic_non_residue(&s3) + s0,
            P::mul_base_by_cubic_non_residue(&s4) + s1,
            s1 + s2 + s3 - s0 - s4,
        )
    }

    /// Inversion via the norm trick (Algorithm 17 shape, one level down).
    pub fn inverse(&self) -> AlgebraResult<Self> {
        let cap_c0 = self.c0.sqr() - P::mul_base_by_cubic_non_residue(&(self.c1 * self.c2));
        let cap_c1 = P::mul_base_by_cubic_non_residue(&self.c2.sqr()) - self.c0 * self.c1;
        let cap_c2 = self.c1.sqr() - self.c0 * self.c2;

        let t = (self.c0 * cap_c0
            + P::mul_base_by_cubic_non_residue(&(self.c2 * cap_c1 + self.c1 * cap_c2)))
        .inverse()?;

        Ok(Self::new(t * cap_c0, t * cap_c1, t * cap_c2))
    }

    /// The p^k power map: component-wise base Frobenius (identity) plus the
    /// precomputed coefficients.
    pub fn frobenius_map(&self, power: usize) -> Self {
        let k = power % 3;
        if k == 0 {
            return *self;
        }
        Self::new(
            self.c0,
            self.c1 * P::frobenius_coeff_c1(k),
            self.c2 * P::frobenius_coeff_c2(k),
        )
    }

    /// Exponentiation via left-to-right square-and-multiply.
    pub fn pow(&self, exp: &[u64]) -> Self {
        let mut msb = None;
        for i in (0..exp.len()).rev() {
            if exp[i] != 0 {
                msb = Some(i as u32 * 64 + (63 - exp[i].leading_zeros()));
                break;
            }
        }
        let msb = match msb {
            Some(m) => m,
            None => return Self::one(),
        };

        let mut accumulator = *self;
        for i in (0..msb).rev() {
            accumulator = accumulator.sqr();
            if (exp[(i / 64) as usize] >> (i % 64)) & 1 == 1 {
                accumulator = accumulator * *self;
            }
        }
        accumulator
    }

    pub fn random_element() -> Self {
        Self::new(
            Field::random_element(),
            Field::random_element(),
            Field::random_element(),
        )
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: Fq3Params<N>, const N: usize> Add for Field3<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl<P: Fq3Params<N>, const N: usize> AddAssign for Field3<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Fq3Params<N>, const N: usize> Sub for Field3<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl<P: Fq3Params<N>, const N: usize> SubAssign for Field3<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: Fq3Params<N>, const N: usize> Mul for Field3<P, N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Karatsuba (Devegili et al., Section 4).
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c2 * rhs.c2;

        let t3 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2);
        let t4 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        let t5 = (self.c1 + self.c2) * (rhs.c1 + rhs.c2);

        Self::new(
            t0 + P::mul_base_by_cubic_non_residue(&(t5 - (t1 + t2))),
            t4 - (t0 + t1) + P::mul_base_by_cubic_non_residue(&t2),
            t3 + t1 - (t0 + t2),
        )
    }
}

impl<P: Fq3Params<N>, const N: usize> MulAssign for Field3<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: Fq3Params<N>, const N: usize> Neg for Field3<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl<P: Fq3Params<N>, const N: usize> PartialEq for Field3<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<P: Fq3Params<N>, const N: usize> Eq for Field3<P, N> {}

#[cfg(test)]
mod tests {
    use crate::curves::bls12_381::Bls12_381FrParams;
    use crate::fields::field_params::FieldParams;
    use crate::fields::test_tower::Fr3;

    #[test]
    fn fr3_sqr_matches_mul() {
        for _ in 0..50 {
            let a = Fr3::random_element();
            assert_eq!(a.sqr(), a * a);
        }
    }

    #[test]
    fn fr3_distributivity() {
        for _ in 0..50 {
            let a = Fr3::random_element();
            let b = Fr3::random_element();
            let c = Fr3::random_element();
            assert_eq!((a + b) * c, a * c + b * c);
        }
    }

    #[test]
    fn fr3_inverse() {
        for _ in 0..50 {
            let a = Fr3::random_element();
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fr3::one());
            }
        }
    }

    #[test]
    fn fr3_frobenius_is_pth_power() {
        let p = <Bls12_381FrParams as FieldParams<4>>::MODULUS;
        for _ in 0..5 {
            let a = Fr3::random_element();
            assert_eq!(a.frobenius_map(1), a.pow(&p));
        }
    }

    #[test]
    fn fr3_frobenius_composes_to_identity() {
        let a = Fr3::random_element();
        assert_eq!(a.frobenius_map(1).frobenius_map(1), a.frobenius_map(2));
        assert_eq!(a.frobenius_map(1).frobenius_map(2), a);
    }
}
