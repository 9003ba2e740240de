use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::Uint;

use super::arith;
use super::field_params::FieldParams;
use crate::errors::{AlgebraError, AlgebraResult};

/// A prime field element in Montgomery form, generic over parameters `P`
/// and limb count `N`.
///
/// Limbs are little-endian u64 and the representation is kept canonical in
/// [0, p). The Montgomery radix is R = 2^(64N).
#[repr(C)]
pub struct Field<P: FieldParams<N>, const N: usize> {
    pub data: [u64; N],
    _phantom: PhantomData<P>,
}

// Manual Clone/Copy because PhantomData<P> doesn't require P: Copy.
impl<P: FieldParams<N>, const N: usize> Clone for Field<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams<N>, const N: usize> Copy for Field<P, N> {}

impl<P: FieldParams<N>, const N: usize> std::fmt::Debug for Field<P, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.from_montgomery_form();
        write!(f, "Field(0x")?;
        for limb in r.data.iter().rev() {
            write!(f, "{limb:016x}")?;
        }
        write!(f, ")")
    }
}

// Constants derived from the modulus at compile time.
impl<P: FieldParams<N>, const N: usize> Field<P, N> {
    pub(crate) const MODULUS: [u64; N] = P::MODULUS;

    /// R mod p: the Montgomery form of one.
    pub(crate) const R: [u64; N] = arith::compute_montgomery_r(&P::MODULUS);

    /// R² mod p: converts standard form into Montgomery form.
    pub(crate) const R_SQUARED: [u64; N] = arith::compute_montgomery_r_squared(&P::MODULUS);

    /// -(p⁻¹) mod 2⁶⁴, the Montgomery reduction factor.
    pub(crate) const R_INV: u64 = arith::compute_montgomery_inv(P::MODULUS[0]);

    /// s with p - 1 = t·2^s, t odd.
    pub const TWO_ADICITY: u32 = arith::compute_two_adicity(&P::MODULUS);

    /// The odd trace t.
    pub const TRACE: [u64; N] = arith::compute_trace(&P::MODULUS);

    const TRACE_PLUS_ONE_DIV_TWO: [u64; N] = arith::compute_trace_plus_one_div_two(&P::MODULUS);

    pub(crate) const MODULUS_MINUS_ONE_DIV_TWO: [u64; N] =
        arith::compute_modulus_minus_one_div_two(&P::MODULUS);
}

// ---------------------------------------------------------------------------
// Constructors and conversions
// ---------------------------------------------------------------------------

impl<P: FieldParams<N>, const N: usize> Field<P, N> {
    /// Zero element. 0·R = 0, so no conversion is needed.
    #[inline]
    pub const fn zero() -> Self {
        Self {
            data: [0u64; N],
            _phantom: PhantomData,
        }
    }

    /// One element (R mod p).
    #[inline]
    pub const fn one() -> Self {
        Self::from_raw(Self::R)
    }

    /// Construct from a u64, converting to Montgomery form.
    #[inline]
    pub fn from(val: u64) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = val;
        Self::from_limbs(limbs)
    }

    /// Construct from raw limbs already in Montgomery form.
    #[inline]
    pub const fn from_raw(data: [u64; N]) -> Self {
        Self {
            data,
            _phantom: PhantomData,
        }
    }

    /// Construct from standard-form limbs, reducing and converting to
    /// Montgomery form.
    pub fn from_limbs(data: [u64; N]) -> Self {
        let mut raw = Self::from_raw(data);
        while raw.ge_modulus() {
            raw = Self::from_raw(arith::sub_limbs(&raw.data, &Self::MODULUS));
        }
        raw.montgomery_mul(&Self::from_raw(Self::R_SQUARED))
    }

    /// Construct from a fixed-width integer (standard form).
    #[inline]
    pub fn from_uint(val: &Uint<N>) -> Self {
        Self::from_limbs(val.to_words())
    }

    /// The canonical integer value as a fixed-width integer.
    #[inline]
    pub fn into_uint(&self) -> Uint<N> {
        Uint::from_words(self.from_montgomery_form().data)
    }

    /// Convert from standard form to Montgomery form: self · R² / R.
    #[inline]
    pub fn to_montgomery_form(&self) -> Self {
        self.montgomery_mul(&Self::from_raw(Self::R_SQUARED))
    }

    /// Convert from Montgomery form to standard form: self · 1 / R.
    #[inline]
    pub fn from_montgomery_form(&self) -> Self {
        let mut one_raw = [0u64; N];
        one_raw[0] = 1;
        self.montgomery_mul(&Self::from_raw(one_raw))
    }
}

// ---------------------------------------------------------------------------
// Core arithmetic
// ---------------------------------------------------------------------------

impl<P: FieldParams<N>, const N: usize> Field<P, N> {
    #[inline]
    fn ge_modulus(&self) -> bool {
        arith::geq(&self.data, &Self::MODULUS)
    }

    /// Conditional subtraction of p, restoring canonical form after an add.
    #[inline]
    fn reduce_once(data: [u64; N]) -> Self {
        if arith::geq(&data, &Self::MODULUS) {
            Self::from_raw(arith::sub_limbs(&data, &Self::MODULUS))
        } else {
            Self::from_raw(data)
        }
    }

    /// Modular addition. Both operands are < p < 2^(64N-1), so the limb sum
    /// cannot carry out of the top limb.
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        Self::reduce_once(arith::add_limbs(&self.data, &other.data))
    }

    /// Modular subtraction.
    #[inline]
    pub fn subtract(&self, other: &Self) -> Self {
        if arith::geq(&self.data, &other.data) {
            Self::from_raw(arith::sub_limbs(&self.data, &other.data))
        } else {
            let diff = arith::sub_limbs(&self.data, &other.data);
            Self::from_raw(arith::add_limbs(&diff, &Self::MODULUS))
        }
    }

    /// Negate: p - self for non-zero self.
    #[inline]
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            *self
        } else {
            Self::from_raw(arith::sub_limbs(&Self::MODULUS, &self.data))
        }
    }

    /// Montgomery multiplication: interleaved no-carry CIOS.
    ///
    /// The single trailing conditional subtraction is valid because the
    /// modulus leaves a spare top bit.
    pub fn montgomery_mul(&self, other: &Self) -> Self {
        let m = Self::MODULUS;
        let r_inv = Self::R_INV;
        let mut r = [0u64; N];

        for i in 0..N {
            let (t0, mut carry1) = arith::mac_mini(r[0], self.data[i], other.data[0]);
            let k = t0.wrapping_mul(r_inv);
            let mut carry2 = arith::mac_discard_lo(t0, k, m[0]);
            for j in 1..N {
                let (tj, c1) = arith::mac(r[j], self.data[i], other.data[j], carry1);
                carry1 = c1;
                let (out, c2) = arith::mac(tj, k, m[j], carry2);
                carry2 = c2;
                r[j - 1] = out;
            }
            r[N - 1] = carry1.wrapping_add(carry2);
        }

        Self::reduce_once(r)
    }

    /// Montgomery squaring. Delegates to the generic multiply.
    #[inline]
    pub fn sqr(&self) -> Self {
        self.montgomery_mul(self)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&limb| limb == 0)
    }

    /// Exponentiation via left-to-right square-and-multiply over raw
    /// little-endian exponent limbs.
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
        if self.is_zero() {
            return Self::zero();
        }

        let mut accumulator = *self;
        for i in (0..msb).rev() {
            accumulator = accumulator.sqr();
            if (exp[(i / 64) as usize] >> (i % 64)) & 1 == 1 {
                accumulator = accumulator.montgomery_mul(self);
            }
        }
        accumulator
    }

    /// Modular inverse via the binary extended GCD on the standard-form
    /// value, re-entering Montgomery form through an R² multiplication.
    pub fn inverse(&self) -> AlgebraResult<Self> {
        if self.is_zero() {
            return Err(AlgebraError::InvalidInput("inverse of zero"));
        }

        let modulus = Uint::<N>::from_words(Self::MODULUS);
        let one = Uint::<N>::ONE;
        let mut u = Uint::<N>::from_words(self.from_montgomery_form().data);
        let mut v = modulus;
        let mut b = one;
        let mut c = Uint::<N>::ZERO;

        while u != one && v != one {
            while u.as_words()[0] & 1 == 0 {
                u = u.wrapping_shr_vartime(1);
                if b.as_words()[0] & 1 == 1 {
                    b = b.wrapping_add(&modulus);
                }
                b = b.wrapping_shr_vartime(1);
            }
            while v.as_words()[0] & 1 == 0 {
                v = v.wrapping_shr_vartime(1);
                if c.as_words()[0] & 1 == 1 {
                    c = c.wrapping_add(&modulus);
                }
                c = c.wrapping_shr_vartime(1);
            }
            if u >= v {
                u = u.wrapping_sub(&v);
                b = if b >= c {
                    b.wrapping_sub(&c)
                } else {
                    b.wrapping_add(&modulus).wrapping_sub(&c)
                };
            } else {
                v = v.wrapping_sub(&u);
                c = if c >= b {
                    c.wrapping_sub(&b)
                } else {
                    c.wrapping_add(&modulus).wrapping_sub(&b)
                };
            }
        }

        let result = if u == one { b } else { c };
        Ok(Self::from_limbs(result.to_words()))
    }

    /// Legendre symbol: 1 for a non-zero residue, -1 for a non-residue,
    /// 0 for zero.
    pub fn legendre(&self) -> i32 {
        if self.is_zero() {
            return 0;
        }
        let e = self.pow(&Self::MODULUS_MINUS_ONE_DIV_TWO);
        if e == Self::one() {
            1
        } else {
            -1
        }
    }

    /// Square root via Tonelli-Shanks on the precomputed (s, t, nqr, nqr^t).
    ///
    /// Returns the root with sgn0 = 0 (even canonical value). Fails only
    /// when the input is a quadratic non-residue.
    pub fn sqrt(&self) -> AlgebraResult<Self> {
        if self.is_zero() {
            return Ok(Self::zero());
        }

        let mut m = Self::TWO_ADICITY;
        let nqr = if P::GENERATOR != 0 {
            Self::from(P::GENERATOR)
        } else {
            Self::find_non_residue()
        };
        let mut c = nqr.pow(&Self::TRACE);
        let mut t = self.pow(&Self::TRACE);
        let mut r = self.pow(&Self::TRACE_PLUS_ONE_DIV_TWO);

        while t != Self::one() {
            // Least i with t^(2^i) == 1.
            let mut i = 1u32;
            let mut t2i = t.sqr();
            while t2i != Self::one() {
                t2i = t2i.sqr();
                i += 1;
                if i >= m {
                    return Err(AlgebraError::InvalidInput("sqrt of a non-residue"));
                }
            }
            if i >= m {
                return Err(AlgebraError::InvalidInput("sqrt of a non-residue"));
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.sqr();
            }
            m = i;
            c = b.sqr();
            t = t * c;
            r = r * b;
        }

        if r.sgn0() == 1 {
            r = r.negate();
        }
        Ok(r)
    }

    /// Locate a quadratic non-residue by trial over small integers. Used by
    /// the square root for fields whose record carries no generator.
    fn find_non_residue() -> Self {
        let mut z = 2u64;
        loop {
            let candidate = Self::from(z);
            if candidate.legendre() == -1 {
                return candidate;
            }
            z += 1;
        }
    }

    /// The zero-sign indicator: parity of the canonical integer value.
    #[inline]
    pub fn sgn0(&self) -> u64 {
        self.from_montgomery_form().data[0] & 1
    }

    /// The p^k power map. On the ground field this is the identity; the
    /// method exists so tower layers can be called uniformly.
    #[inline]
    pub fn frobenius_map(&self, _power: usize) -> Self {
        *self
    }

    /// Generate a uniformly random field element from 2N limbs of entropy.
    ///
    /// The high half enters as hi·R mod p, which `from_limbs` already
    /// computes, so no double-width division is needed.
    pub fn random_element() -> Self {
        let mut hi = [0u64; N];
        let mut lo = [0u64; N];
        pst_numeric::random::get_random_limbs(&mut hi);
        pst_numeric::random::get_random_limbs(&mut lo);

        let hi_part = Self::from_limbs(hi).data;
        let mut lo_red = Self::from_raw(lo);
        while lo_red.ge_modulus() {
            lo_red = Self::from_raw(arith::sub_limbs(&lo_red.data, &Self::MODULUS));
        }
        let sum = Self::reduce_once(arith::add_limbs(&hi_part, &lo_red.data));
        Self::from_limbs(sum.data)
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: FieldParams<N>, const N: usize> Add for Field<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Field::add(&self, &rhs)
    }
}

impl<P: FieldParams<N>, const N: usize> AddAssign for Field<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Field::add(self, &rhs);
    }
}

impl<P: FieldParams<N>, const N: usize> Sub for Field<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Field::subtract(&self, &rhs)
    }
}

impl<P: FieldParams<N>, const N: usize> SubAssign for Field<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = Field::subtract(self, &rhs);
    }
}

impl<P: FieldParams<N>, const N: usize> Mul for Field<P, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Field::montgomery_mul(&self, &rhs)
    }
}

impl<P: FieldParams<N>, const N: usize> MulAssign for Field<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = Field::montgomery_mul(self, &rhs);
    }
}

impl<P: FieldParams<N>, const N: usize> Neg for Field<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<P: FieldParams<N>, const N: usize> PartialEq for Field<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<P: FieldParams<N>, const N: usize> Eq for Field<P, N> {}
