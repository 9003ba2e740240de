// Quadratic extension field F_{p^2} = F_p[u] / (u^2 - ν)
//
// Elements are pairs (c0, c1) representing c0 + c1·u. The non-residue ν is
// supplied by the parameter trait, so the same type covers u² = -1 towers
// (alt_bn128, BLS12-381) and u² = -5 (BLS12-377).

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field::Field;
use super::field_params::FieldParams;
use crate::errors::AlgebraResult;

/// Extends a base field with its quadratic non-residue.
pub trait Fq2Params<const N: usize>: FieldParams<N> {
    /// Multiply a base-field element by the non-residue ν with u² = ν.
    fn mul_base_by_non_residue(a: &Field<Self, N>) -> Field<Self, N>;
}

pub struct Field2<P: Fq2Params<N>, const N: usize> {
    pub c0: Field<P, N>,
    pub c1: Field<P, N>,
}

impl<P: Fq2Params<N>, const N: usize> Clone for Field2<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq2Params<N>, const N: usize> Copy for Field2<P, N> {}

impl<P: Fq2Params<N>, const N: usize> std::fmt::Debug for Field2<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field2({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: Fq2Params<N>, const N: usize> Field2<P, N> {
    #[inline]
    pub const fn new(c0: Field<P, N>, c1: Field<P, N>) -> Self {
        Self { c0, c1 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Field::zero(), Field::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Field::one(), Field::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    /// Multiply each component by a base field element.
    #[inline]
    pub fn mul_by_fq(&self, a: Field<P, N>) -> Self {
        Self::new(a * self.c0, a * self.c1)
    }

    /// Squaring: (c0 + c1·u)² = (c0² + ν·c1²) + 2·c0·c1·u
    #[inline]
    pub fn sqr(&self) -> Self {
        let t0 = self.c0.sqr();
        let t1 = self.c1.sqr();
        let mut t2 = self.c0 * self.c1;
        t2 += t2;
        Self::new(t0 + P::mul_base_by_non_residue(&t1), t2)
    }

    /// Inversion through the norm: 1/(c0 + c1·u) = (c0 - c1·u)/(c0² - ν·c1²)
    pub fn inverse(&self) -> AlgebraResult<Self> {
        let norm = self.c0.sqr() - P::mul_base_by_non_residue(&self.c1.sqr());
        let t = norm.inverse()?;
        Ok(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    /// The p^k power map. u^p = ν^((p-1)/2)·u = -u, so odd powers conjugate.
    #[inline]
    pub fn frobenius_map(&self, power: usize) -> Self {
        if power % 2 == 1 {
            Self::new(self.c0, -self.c1)
        } else {
            *self
        }
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

    /// Generate a random element.
    pub fn random_element() -> Self {
        Self::new(Field::random_element(), Field::random_element())
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: Fq2Params<N>, const N: usize> Add for Field2<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<P: Fq2Params<N>, const N: usize> AddAssign for Field2<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Fq2Params<N>, const N: usize> Sub for Field2<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<P: Fq2Params<N>, const N: usize> SubAssign for Field2<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: Fq2Params<N>, const N: usize> Mul for Field2<P, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Karatsuba: (c0 + c1·u)(d0 + d1·u)
        // = (c0·d0 + ν·c1·d1) + ((c0+c1)(d0+d1) - c0·d0 - c1·d1)·u
        let t1 = self.c0 * rhs.c0;
        let t2 = self.c1 * rhs.c1;
        let t3 = self.c0 + self.c1;
        let t4 = rhs.c0 + rhs.c1;
        Self::new(
            t1 + P::mul_base_by_non_residue(&t2),
            t3 * t4 - (t1 + t2),
        )
    }
}

impl<P: Fq2Params<N>, const N: usize> MulAssign for Field2<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: Fq2Params<N>, const N: usize> Neg for Field2<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<P: Fq2Params<N>, const N: usize> PartialEq for Field2<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: Fq2Params<N>, const N: usize> Eq for Field2<P, N> {}

#[cfg(test)]
mod tests {
    use crate::curves::bn254::{Fq, Fq2};

    #[test]
    fn fq2_mul_check_against_constants() {
        let a = Fq2::new(Fq::from(3), Fq::from(5));
        let b = Fq2::new(Fq::from(7), Fq::from(11));
        let c = a * b;
        // (3+5u)(7+11u) = (21 - 55) + (33+35)u = -34 + 68u
        let expected = Fq2::new(Fq::from(34).negate(), Fq::from(68));
        assert_eq!(c, expected);
    }

    #[test]
    fn fq2_sqr_matches_mul() {
        for _ in 0..100 {
            let a = Fq2::random_element();
            assert_eq!(a.sqr(), a * a);
        }
    }

    #[test]
    fn fq2_add_mul_consistency() {
        for _ in 0..100 {
            let a = Fq2::random_element();
            let b = Fq2::random_element();
            let c = Fq2::random_element();
            assert_eq!((a + b) * c, a * c + b * c);
        }
    }

    #[test]
    fn fq2_sub_mul_consistency() {
        for _ in 0..100 {
            let a = Fq2::random_element();
            let b = Fq2::random_element();
            let c = Fq2::random_element();
            assert_eq!((a - b) * c, a * c - b * c);
        }
    }

    #[test]
    fn fq2_inverse() {
        for _ in 0..100 {
            let a = Fq2::random_element();
            if !a.is_zero() {
                let a_inv = a.inverse().unwrap();
                assert_eq!(a * a_inv, Fq2::one());
            }
        }
    }

    #[test]
    fn fq2_frobenius_is_pth_power() {
        use crate::curves::bn254::Bn254FqParams;
        use crate::fields::field_params::FieldParams;
        let p = <Bn254FqParams as FieldParams<4>>::MODULUS;
        for _ in 0..10 {
            let a = Fq2::random_element();
            assert_eq!(a.frobenius_map(1), a.pow(&p));
        }
    }

    #[test]
    fn fq2_frobenius_composes() {
        let a = Fq2::random_element();
        let f1 = a.frobenius_map(1);
        assert_eq!(f1.frobenius_map(1), a.frobenius_map(2));
        assert_eq!(a.frobenius_map(2), a);
    }
}
