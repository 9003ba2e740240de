// Quartic extension field F_{p^4} = F_{p^2}[w] / (w^2 - u)
//
// The pairing target field of the MNT4 family. Elements are pairs (c0, c1)
// of Field2 elements. The Frobenius coefficients ν^(k·(p-1)/4) land in the
// base field because p ≡ 1 mod 4 for the supported towers.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field::Field;
use super::field2::{Field2, Fq2Params};
use crate::errors::AlgebraResult;

/// Extends the quadratic tower to degree four.
pub trait Fq4Params<const N: usize>: Fq2Params<N> {
    /// Multiply an F_{p^2} element by the quartic non-residue u (w² = u):
    /// (a0 + a1·u)·u = ν·a1 + a0·u.
    fn mul_fq2_by_non_residue(a: &Field2<Self, N>) -> Field2<Self, N>;

    /// ν^(k·(p-1)/4), the coefficient on c1 of the p^k power map.
    fn frobenius_coeff_c1(k: usize) -> Field<Self, N>;
}

pub struct Field4<P: Fq4Params<N>, const N: usize> {
    pub c0: Field2<P, N>,
    pub c1: Field2<P, N>,
}

impl<P: Fq4Params<N>, const N: usize> Clone for Field4<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq4Params<N>, const N: usize> Copy for Field4<P, N> {}

impl<P: Fq4Params<N>, const N: usize> std::fmt::Debug for Field4<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field4({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: Fq4Params<N>, const N: usize> Field4<P, N> {
    #[inline]
    pub const fn new(c0: Field2<P, N>, c1: Field2<P, N>) -> Self {
        Self { c0, c1 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Field2::zero(), Field2::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Field2::one(), Field2::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    pub fn sqr(&self) -> Self {
        let t0 = self.c0 + self.c1;
        let t1 = P::mul_fq2_by_non_residue(&self.c1) + self.c0;

        let t0 = t0 * t1;
        let t1 = self.c0 * self.c1;

        Self::new(t0 - (t1 + P::mul_fq2_by_non_residue(&t1)), t1 + t1)
    }

    pub fn inverse(&self) -> AlgebraResult<Self> {
        let t = (self.c0.sqr() - P::mul_fq2_by_non_residue(&self.c1.sqr())).inverse()?;
        Ok(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    /// Conjugation; inversion on the cyclotomic subgroup.
    #[inline]
    pub fn unitary_inverse(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// The p^k power map.
    pub fn frobenius_map(&self, power: usize) -> Self {
        let k = power % 4;
        if k == 0 {
            return *self;
        }
        Self::new(
            self.c0.frobenius_map(k),
            self.c1.frobenius_map(k).mul_by_fq(P::frobenius_coeff_c1(k)),
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

    /// Cyclotomic squaring. Delegates to the generic squaring, which is
    /// valid everywhere.
    #[inline]
    pub fn cyclotomic_squared(&self) -> Self {
        self.sqr()
    }

    /// Left-to-right exponentiation with cyclotomic squarings.
    pub fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
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
            accumulator = accumulator.cyclotomic_squared();
            if (exp[(i / 64) as usize] >> (i % 64)) & 1 == 1 {
                accumulator = accumulator * *self;
            }
        }
        accumulator
    }

    pub fn random_element() -> Self {
        Self::new(Field2::random_element(), Field2::random_element())
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: Fq4Params<N>, const N: usize> Add for Field4<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<P: Fq4Params<N>, const N: usize> AddAssign for Field4<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Fq4Params<N>, const N: usize> Sub for Field4<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<P: Fq4Params<N>, const N: usize> SubAssign for Field4<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: Fq4Params<N>, const N: usize> Mul for Field4<P, N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c0 + self.c1;
        let t3 = rhs.c0 + rhs.c1;
        Self::new(
            P::mul_fq2_by_non_residue(&t1) + t0,
            t2 * t3 - (t0 + t1),
        )
    }
}

impl<P: Fq4Params<N>, const N: usize> MulAssign for Field4<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: Fq4Params<N>, const N: usize> Neg for Field4<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<P: Fq4Params<N>, const N: usize> PartialEq for Field4<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: Fq4Params<N>, const N: usize> Eq for Field4<P, N> {}

#[cfg(test)]
mod tests {
    use crate::curves::bls12_381::Bls12_381FrParams;
    use crate::fields::field_params::FieldParams;
    use crate::fields::test_tower::Fr4;

    // Lift a random element into the cyclotomic subgroup via x^(q² - 1).
    fn cyclotomic_element() -> Fr4 {
        let x = Fr4::random_element();
        x.frobenius_map(2) * x.inverse().unwrap()
    }

    #[test]
    fn fr4_sqr_matches_mul() {
        for _ in 0..50 {
            let a = Fr4::random_element();
            assert_eq!(a.sqr(), a * a);
        }
    }

    #[test]
    fn fr4_inverse() {
        for _ in 0..50 {
            let a = Fr4::random_element();
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fr4::one());
            }
        }
    }

    #[test]
    fn fr4_frobenius_is_pth_power() {
        let p = <Bls12_381FrParams as FieldParams<4>>::MODULUS;
        for _ in 0..5 {
            let a = Fr4::random_element();
            assert_eq!(a.frobenius_map(1), a.pow(&p));
        }
    }

    #[test]
    fn fr4_unitary_inverse_inverts_on_subgroup() {
        for _ in 0..5 {
            let g = cyclotomic_element();
            assert_eq!(g.unitary_inverse(), g.inverse().unwrap());
        }
    }

    #[test]
    fn fr4_cyclotomic_exp_matches_pow() {
        let g = cyclotomic_element();
        let exp = [0xDEAD_BEEF_0123_4567u64, 0x89AB];
        assert_eq!(g.cyclotomic_exp(&exp), g.pow(&exp));
    }
}
