// Dodecic extension field F_{p^12} = F_{p^6}[w] / (w^2 - v)
//
// The target group of the BLS12 and BN pairings lives in the order-r
// cyclotomic subgroup of this field. After the easy part of a final
// exponentiation, squaring and inversion must go through
// `cyclotomic_squared` / `unitary_inverse`; the generic routines remain
// correct but the compressed forms are valid only on that subgroup.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use super::field2::Field2;
use super::field6::{Field6, Fq6Params};
use crate::errors::AlgebraResult;

/// Extends the sextic tower with the F_{p^12}-level Frobenius coefficients.
pub trait Fq12Params<const N: usize>: Fq6Params<N> {
    fn frobenius_coefficients_1() -> Field2<Self, N>;
    fn frobenius_coefficients_2() -> Field2<Self, N>;
    fn frobenius_coefficients_3() -> Field2<Self, N>;
}

pub struct Field12<P: Fq12Params<N>, const N: usize> {
    pub c0: Field6<P, N>,
    pub c1: Field6<P, N>,
}

impl<P: Fq12Params<N>, const N: usize> Clone for Field12<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Fq12Params<N>, const N: usize> Copy for Field12<P, N> {}

impl<P: Fq12Params<N>, const N: usize> std::fmt::Debug for Field12<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field12({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: Fq12Params<N>, const N: usize> Field12<P, N> {
    #[inline]
    pub const fn new(c0: Field6<P, N>, c1: Field6<P, N>) -> Self {
        Self { c0, c1 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Field6::zero(), Field6::zero())
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(Field6::one(), Field6::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    /// The quadratic non-residue map on F_{p^6}: (c0, c1, c2) -> (ξ·c2, c0, c1).
    #[inline]
    fn mul_by_non_residue(a: &Field6<P, N>) -> Field6<P, N> {
        Field6::new(Field6::<P, N>::mul_by_non_residue(&a.c2), a.c0, a.c1)
    }

    /// Squaring in F_{p^6}[w] / (w² - v).
    pub fn sqr(&self) -> Self {
        let t0 = self.c0 + self.c1;
        let t1 = Self::mul_by_non_residue(&self.c1) + self.c0;

        let t0 = t0 * t1;
        let t1 = self.c0 * self.c1;

        Self::new(t0 - (t1 + Self::mul_by_non_residue(&t1)), t1 + t1)
    }

    /// Inversion via Algorithm 8 from "High-Speed Software Implementation
    /// of the Optimal Ate Pairing over Barreto-Naehrig Curves".
    pub fn inverse(&self) -> AlgebraResult<Self> {
        let t = (self.c0.sqr() - Self::mul_by_non_residue(&self.c1.sqr())).inverse()?;
        Ok(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    /// Conjugation. On the cyclotomic subgroup this equals inversion.
    #[inline]
    pub fn unitary_inverse(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// The p^k power map.
    pub fn frobenius_map(&self, power: usize) -> Self {
        match power % 12 {
            0 => *self,
            1 => Self::new(
                self.c0.frobenius_map(1),
                self.c1
                    .frobenius_map(1)
                    .mul_by_fq2(&P::frobenius_coefficients_1()),
            ),
            2 => Self::new(
                self.c0.frobenius_map(2),
                self.c1
                    .frobenius_map(2)
                    .mul_by_fq2(&P::frobenius_coefficients_2()),
            ),
            3 => Self::new(
                self.c0.frobenius_map(3),
                self.c1
                    .frobenius_map(3)
                    .mul_by_fq2(&P::frobenius_coefficients_3()),
            ),
            k => self.frobenius_map(3).frobenius_map(k - 3),
        }
    }

    /// (a + b·w)² inside the degree-4 subtower F_{p^2}[w]/(w² - v·…):
    /// returns (a² + ξ·b², 2ab).
    #[inline]
    fn fp4_square(a: Field2<P, N>, b: Field2<P, N>) -> (Field2<P, N>, Field2<P, N>) {
        let t = a * b;
        let c0 = (a + b) * (a + P::mul_by_non_residue(&b)) - t - P::mul_by_non_residue(&t);
        (c0, t + t)
    }

    /// Granger-Scott compressed squaring, valid on the cyclotomic subgroup.
    pub fn cyclotomic_squared(&self) -> Self {
        let z0 = self.c0.c0;
        let z4 = self.c0.c1;
        let z3 = self.c0.c2;
        let z2 = self.c1.c0;
        let z1 = self.c1.c1;
        let z5 = self.c1.c2;

        let (t0, t1) = Self::fp4_square(z0, z1);
        let (t2, t3) = Self::fp4_square(z2, z3);
        let (t4, t5) = Self::fp4_square(z4, z5);

        // z0 = 3·t0 - 2·z0, z1 = 3·t1 + 2·z1
        let mut z0 = t0 - z0;
        z0 += z0;
        z0 += t0;
        let mut z1 = t1 + z1;
        z1 += z1;
        z1 += t1;

        // z2 = 3·ξ·t5 + 2·z2, z3 = 3·t4 - 2·z3
        let tmp = P::mul_by_non_residue(&t5);
        let mut z2 = tmp + z2;
        z2 += z2;
        z2 += tmp;
        let mut z3 = t4 - z3;
        z3 += z3;
        z3 += t4;

        // z4 = 3·t2 - 2·z4, z5 = 3·t3 + 2·z5
        let mut z4 = t2 - z4;
        z4 += z4;
        z4 += t2;
        let mut z5 = t3 + z5;
        z5 += z5;
        z5 += t3;

        Self::new(Field6::new(z0, z4, z3), Field6::new(z2, z1, z5))
    }

    /// Left-to-right exponentiation with compressed squarings. The input
    /// must lie in the cyclotomic subgroup.
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

    /// Generic left-to-right exponentiation (no subgroup assumption).
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

    /// Sparse in-place multiplication by a Miller-loop line evaluation.
    ///
    /// The multiplicand has only the (0, 2, 4) coefficients of the
    /// six-tuple over F_{p^2} non-zero: (ell_0, 0, ell_vv) + w·(0, ell_vw, 0).
    pub fn mul_by_024(
        &mut self,
        ell_0: Field2<P, N>,
        ell_vw: Field2<P, N>,
        ell_vv: Field2<P, N>,
    ) {
        let d0 = self.c0.c0 * ell_0;
        let d2 = self.c0.c2 * ell_vv;
        let d4 = self.c1.c1 * ell_vw;
        let t2 = self.c0.c0 + self.c1.c1;
        let t1 = self.c0.c0 + self.c0.c2;
        let mut s0 = self.c0.c1 + self.c1.c0;
        s0 += self.c1.c2;

        let mut s1 = self.c0.c1 * ell_vv;
        let mut t3 = s1 + d4;
        let t4 = Field6::<P, N>::mul_by_non_residue(&t3);
        self.c0.c0 = t4 + d0;

        t3 = self.c1.c2 * ell_vw;
        s1 += t3;
        t3 = t3 + d2;
        let t4 = Field6::<P, N>::mul_by_non_residue(&t3);
        t3 = self.c0.c1 * ell_0;
        s1 += t3;
        self.c0.c1 = t4 + t3;

        let t0 = ell_0 + ell_vv;
        t3 = t1 * t0;
        t3 = t3 - d0;
        t3 = t3 - d2;
        let t4 = self.c1.c0 * ell_vw;
        s1 += t4;

        let t0 = self.c0.c2 + self.c1.c1;
        self.c0.c2 = t3 + t4;

        let t1 = ell_vv + ell_vw;
        t3 = t0 * t1;
        t3 = t3 - d2;
        t3 = t3 - d4;
        let t4 = Field6::<P, N>::mul_by_non_residue(&t3);
        t3 = self.c1.c0 * ell_0;
        s1 += t3;
        self.c1.c0 = t3 + t4;

        t3 = self.c1.c2 * ell_vv;
        s1 += t3;
        let t4 = Field6::<P, N>::mul_by_non_residue(&t3);
        let t0 = ell_0 + ell_vw;
        t3 = t0 * t2;
        t3 = t3 - d0;
        t3 = t3 - d4;
        self.c1.c1 = t3 + t4;

        let t0 = ell_0 + ell_vv + ell_vw;
        t3 = s0 * t0;
        self.c1.c2 = t3 - s1;
    }

    pub fn random_element() -> Self {
        Self::new(Field6::random_element(), Field6::random_element())
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: Fq12Params<N>, const N: usize> Add for Field12<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<P: Fq12Params<N>, const N: usize> AddAssign for Field12<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: Fq12Params<N>, const N: usize> Sub for Field12<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<P: Fq12Params<N>, const N: usize> SubAssign for Field12<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: Fq12Params<N>, const N: usize> Mul for Field12<P, N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c0 + self.c1;
        let t3 = rhs.c0 + rhs.c1;
        Self::new(
            Self::mul_by_non_residue(&t1) + t0,
            t2 * t3 - (t0 + t1),
        )
    }
}

impl<P: Fq12Params<N>, const N: usize> MulAssign for Field12<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: Fq12Params<N>, const N: usize> std::ops::Neg for Field12<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<P: Fq12Params<N>, const N: usize> PartialEq for Field12<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: Fq12Params<N>, const N: usize> Eq for Field12<P, N> {}
