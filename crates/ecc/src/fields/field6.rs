// Sextic extension field F_{p^6} = F_{p^2}[v] / (v^3 - ξ)
//
// Elements are triples (c0, c1, c2) of Field2 elements. ξ is a non-residue
// in F_{p^2} supplied by the parameter trait (9 + u for alt_bn128, 1 + u for
// BLS12-381).

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::field2::{Field2, Fq2Params};
use crate::errors::AlgebraResult;

/// Extends the quadratic tower with the sextic non-residue and the
/// F_{p^6}-level Frobenius coefficient tables.
pub trait Fq6Params<const N: usize>: Fq2Params<N> {
    /// Multiply an F_{p^2} element by the non-residue ξ with v³ = ξ.
    fn mul_by_non_residue(a: &Field2<Self, N>) -> Field2<Self, N>;

    fn frobenius_coeffs_c1_1() -> Field2<Self, N>;
    fn frobenius_coeffs_c1_2() -> Field2<Self, N>;
    fn frobenius_coeffs_c1_3() -> Field2<Self, N>;
    fn frobenius_coeffs_c2_1() -> Field2<Self, N>;
    fn frobenius_coeffs_c2_2() -> Field2<Self, N>;
    fn frobenius_coeffs_c2_3() -> Field2<Self, N>;
}

pub struct Field6<P: Fq6Params<N>, const N: usize> {
    pub c0: Field2<P, N>,
    pub c1: Field2<P, N>,
    pub c2: Field2<P, N>,
}

impl<P: Fq6Params<N>, const N: usize> Clone for Field6<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq6Params<N>, const N: usize> Copy for Field6<P, N> {}

impl<P: Fq6Params<N>, const N: usize> std::fmt::Debug for Field6<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field6({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<P: Fq6Params<N>, const N: usize> Field6<P, N> {
    #[inline]
    pub const fn new(c0: Field2<P, N>, c1: Field2<P, N>, c2: Field2<P, N>) -> Self {
        Self { c0, c1, c2 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Field2::zero(), Field2::zero(), Field2::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Field2::one(), Field2::zero(), Field2::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    /// Multiply an F_{p^2} element by the non-residue (delegates to params).
    #[inline]
    pub fn mul_by_non_residue(a: &Field2<P, N>) -> Field2<P, N> {
        P::mul_by_non_residue(a)
    }

    /// Multiply each component by an F_{p^2} scalar.
    #[inline]
    pub fn mul_by_fq2(&self, other: &Field2<P, N>) -> Self {
        Self::new(*other * self.c0, *other * self.c1, *other * self.c2)
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
            Self::mul_by_non_residue(&s3) + s0,
            Self::mul_by_non_residue(&s4) + s1,
            s1 + s2 + s3 - s0 - s4,
        )
    }

    /// Inversion via Algorithm 17 from "High-Speed Software Implementation
    /// of the Optimal Ate Pairing over Barreto-Naehrig Curves".
    pub fn inverse(&self) -> AlgebraResult<Self> {
        let cap_c0 = self.c0.sqr() - Self::mul_by_non_residue(&(self.c1 * self.c2));
        let cap_c1 = Self::mul_by_non_residue(&self.c2.sqr()) - self.c0 * self.c1;
        let cap_c2 = self.c1.sqr() - self.c0 * self.c2;

        let t = (self.c0 * cap_c0
            + Self::mul_by_non_residue(&(self.c2 * cap_c1 + self.c1 * cap_c2)))
        .inverse()?;

        Ok(Self::new(t * cap_c0, t * cap_c1, t * cap_c2))
    }

    /// The p^k power map.
    pub fn frobenius_map(&self, power: usize) -> Self {
        match power % 6 {
            0 => *self,
            1 => Self::new(
                self.c0.frobenius_map(1),
                P::frobenius_coeffs_c1_1() * self.c1.frobenius_map(1),
                P::frobenius_coeffs_c2_1() * self.c2.frobenius_map(1),
            ),
            2 => Self::new(
                self.c0,
                P::frobenius_coeffs_c1_2() * self.c1,
                P::frobenius_coeffs_c2_2() * self.c2,
            ),
            3 => Self::new(
                self.c0.frobenius_map(1),
                P::frobenius_coeffs_c1_3() * self.c1.frobenius_map(1),
                P::frobenius_coeffs_c2_3() * self.c2.frobenius_map(1),
            ),
            k => {
                // Remaining powers compose from the direct maps.
                self.frobenius_map(3).frobenius_map(k - 3)
            }
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

    pub fn random_element() -> Self {
        Self::new(
            Field2::random_element(),
            Field2::random_element(),
            Field2::random_element(),
        )
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: Fq6Params<N>, const N: usize> Add for Field6<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl<P: Fq6Params<N>, const N: usize> AddAssign for Field6<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Fq6Params<N>, const N: usize> Sub for Field6<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl<P: Fq6Params<N>, const N: usize> SubAssign for Field6<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: Fq6Params<N>, const N: usize> Mul for Field6<P, N> {
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
            t0 + Self::mul_by_non_residue(&(t5 - (t1 + t2))),
            t4 - (t0 + t1) + Self::mul_by_non_residue(&t2),
            t3 + t1 - (t0 + t2),
        )
    }
}

impl<P: Fq6Params<N>, const N: usize> MulAssign for Field6<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: Fq6Params<N>, const N: usize> Neg for Field6<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl<P: Fq6Params<N>, const N: usize> PartialEq for Field6<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<P: Fq6Params<N>, const N: usize> Eq for Field6<P, N> {}

#[cfg(test)]
mod tests {
    use crate::curves::bn254::Fq6;

    #[test]
    fn fq6_sqr_matches_mul() {
        for _ in 0..50 {
            let a = Fq6::random_element();
            assert_eq!(a.sqr(), a * a);
        }
    }

    #[test]
    fn fq6_inverse() {
        for _ in 0..50 {
            let a = Fq6::random_element();
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fq6::one());
            }
        }
    }

    #[test]
    fn fq6_distributivity() {
        for _ in 0..50 {
            let a = Fq6::random_element();
            let b = Fq6::random_element();
            let c = Fq6::random_element();
            assert_eq!((a + b) * c, a * c + b * c);
        }
    }

    #[test]
    fn fq6_frobenius_composes() {
        let a = Fq6::random_element();
        assert_eq!(a.frobenius_map(1).frobenius_map(1), a.frobenius_map(2));
        assert_eq!(a.frobenius_map(2).frobenius_map(1), a.frobenius_map(3));
        assert_eq!(a.frobenius_map(3).frobenius_map(3), a);
    }
}
