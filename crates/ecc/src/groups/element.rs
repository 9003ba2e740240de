use std::marker::PhantomData;

use super::affine_element::AffineElement;
use super::group_params::{CoordinateField, GroupParams};
use super::wnaf::find_wnaf;

/// An elliptic curve point in Jacobian projective coordinates (X : Y : Z),
/// representing the affine point (X/Z², Y/Z³). Z = 0 encodes the identity.
pub struct Element<G: GroupParams> {
    pub x: G::Coord,
    pub y: G::Coord,
    pub z: G::Coord,
    _phantom: PhantomData<G>,
}

impl<G: GroupParams> Clone for Element<G> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GroupParams> Copy for Element<G> {}

impl<G: GroupParams> std::fmt::Debug for Element<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_point_at_infinity() {
            write!(f, "Element(infinity)")
        } else {
            write!(f, "Element({:?}, {:?}, {:?})", self.x, self.y, self.z)
        }
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    #[inline]
    pub fn new(x: G::Coord, y: G::Coord, z: G::Coord) -> Self {
        Self {
            x,
            y,
            z,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn from_affine(affine: &AffineElement<G>) -> Self {
        if affine.is_point_at_infinity() {
            return Self::infinity();
        }
        Self::new(affine.x, affine.y, G::Coord::one())
    }

    /// The generator point in projective form.
    #[inline]
    pub fn one() -> Self {
        Self::new(G::generator_x(), G::generator_y(), G::Coord::one())
    }

    /// The point at infinity, encoded as (0 : 1 : 0).
    #[inline]
    pub fn infinity() -> Self {
        Self::new(G::Coord::zero(), G::Coord::one(), G::Coord::zero())
    }

    #[inline]
    pub fn is_point_at_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// A random point: the generator times a 256-bit scalar.
    pub fn random_element() -> Self {
        let mut limbs = [0u64; 4];
        pst_numeric::random::get_random_limbs(&mut limbs);
        Self::one().mul_bits(&limbs)
    }
}

// ---------------------------------------------------------------------------
// Conversion and normalization
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    /// Convert to affine coordinates via one Z inversion.
    pub fn to_affine(&self) -> AffineElement<G> {
        if self.is_point_at_infinity() {
            return AffineElement::infinity();
        }
        let z_inv = match self.z.inverse() {
            Ok(v) => v,
            Err(_) => return AffineElement::infinity(),
        };
        let zz_inv = z_inv.sqr();
        let zzz_inv = zz_inv * z_inv;
        AffineElement::new(self.x * zz_inv, self.y * zzz_inv)
    }

    /// Normalize to special form: Z = 1, or the (0 : 1 : 0) sentinel for the
    /// identity.
    pub fn to_special(&self) -> Self {
        if self.is_point_at_infinity() {
            return Self::infinity();
        }
        Self::from_affine(&self.to_affine())
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.is_point_at_infinity() || self.z == G::Coord::one()
    }

    /// Normalize a batch of non-identity points to special form with a
    /// single inversion (Montgomery's simultaneous-inversion trick).
    pub fn batch_to_special_all_non_zeros(elements: &mut [Self]) {
        if elements.is_empty() {
            return;
        }
        debug_assert!(elements.iter().all(|e| !e.is_point_at_infinity()));

        let mut temporaries = Vec::with_capacity(elements.len());
        let mut accumulator = G::Coord::one();

        // Forward pass: prefix products of the z coordinates.
        for element in elements.iter() {
            temporaries.push(accumulator);
            accumulator = accumulator * element.z;
        }

        let mut accumulator = match accumulator.inverse() {
            Ok(v) => v,
            Err(_) => return,
        };

        // Backward pass: peel off individual z inverses.
        for i in (0..elements.len()).rev() {
            let z_inv = accumulator * temporaries[i];
            let zz_inv = z_inv.sqr();
            accumulator = accumulator * elements[i].z;
            elements[i].x = elements[i].x * zz_inv;
            elements[i].y = elements[i].y * (zz_inv * z_inv);
            elements[i].z = G::Coord::one();
        }
    }
}

// ---------------------------------------------------------------------------
// On-curve check
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    /// Check the Jacobian curve equation y² = x³ + a·x·z⁴ + b·z⁶.
    pub fn on_curve(&self) -> bool {
        if self.is_point_at_infinity() {
            return true;
        }
        let zz = self.z.sqr();
        let zzzz = zz.sqr();
        let mut rhs = zzzz * zz * G::coeff_b();
        if G::HAS_A {
            rhs += (self.x * G::coeff_a()) * zzzz;
        }
        let xxx = self.x.sqr() * self.x + rhs;
        self.y.sqr() == xxx
    }
}

// ---------------------------------------------------------------------------
// Point doubling
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    /// Double this point in-place.
    pub fn self_dbl(&mut self) {
        if self.is_point_at_infinity() {
            return;
        }

        // T0 = x², T1 = y², T2 = y⁴
        let t0 = self.x.sqr();
        let t1 = self.y.sqr();
        let t2 = t1.sqr();
        // T1 = 2·x·y² = (y² + x)² - x² - y⁴
        let t1 = (t1 + self.x).sqr();
        let t3 = t0 + t2;
        let t1 = t1 - t3;
        // S = 4·x·y²
        let t1 = t1 + t1;
        // M = 3·x² (+ a·z⁴)
        let mut t3 = t0 + t0;
        t3 += t0;
        if G::HAS_A {
            t3 += G::coeff_a() * self.z.sqr().sqr();
        }
        // z3 = 2·y·z (uses the old y)
        let new_z = (self.z + self.z) * self.y;
        // x3 = M² - 2S
        let two_s = t1 + t1;
        let new_x = t3.sqr() - two_s;
        // 8·y⁴
        let mut t2 = t2 + t2;
        t2 += t2;
        t2 += t2;
        // y3 = M·(S - x3) - 8·y⁴
        let new_y = t3 * (t1 - new_x) - t2;

        self.x = new_x;
        self.y = new_y;
        self.z = new_z;
    }

    #[inline]
    pub fn dbl(&self) -> Self {
        let mut result = *self;
        result.self_dbl();
        result
    }
}

// ---------------------------------------------------------------------------
// Mixed addition (projective += affine)
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    /// Add an affine point to this projective point in-place.
    pub fn add_assign_affine(&mut self, other: &AffineElement<G>) {
        if other.is_point_at_infinity() {
            return;
        }
        if self.is_point_at_infinity() {
            *self = Self::from_affine(other);
            return;
        }

        // T0 = z1², H = x2·z1² - x1, R' = z1³·y2 - y1
        let t0 = self.z.sqr();
        let t1 = other.x * t0 - self.x;
        let t2 = self.z * t0 * other.y - self.y;

        if t1.is_zero() {
            if t2.is_zero() {
                self.self_dbl();
                return;
            }
            *self = Self::infinity();
            return;
        }

        // R = 2·(z1³·y2 - y1)
        let t2 = t2 + t2;
        // z3 = (z1 + H)² - z1² - H² = 2·z1·H
        self.z = self.z + t1;
        let t3 = t1.sqr();
        let t0 = t0 + t3;
        self.z = self.z.sqr();
        self.z -= t0;
        // 4·H², 4·H³
        let t3 = t3 + t3;
        let t3 = t3 + t3;
        let t1 = t1 * t3;
        // 4·H²·x1
        let t3 = t3 * self.x;
        // x3 = R² - (8·H²·x1 + 4·H³)
        let t0 = t3 + t3;
        let t0 = t0 + t1;
        self.x = t2.sqr();
        self.x -= t0;
        // y3 = R·(4·H²·x1 - x3) - 2·y1·4·H³
        let t3 = t3 - self.x;
        let t1 = t1 * self.y;
        let t1 = t1 + t1;
        let t3 = t3 * t2;
        self.y = t3 - t1;
    }

    #[inline]
    pub fn sub_assign_affine(&mut self, other: &AffineElement<G>) {
        let neg_other = AffineElement::new(other.x, -other.y);
        self.add_assign_affine(&neg_other);
    }
}

// ---------------------------------------------------------------------------
// Full projective addition
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    /// Add another projective point to this one in-place.
    pub fn add_assign_element(&mut self, other: &Self) {
        if other.is_point_at_infinity() {
            return;
        }
        if self.is_point_at_infinity() {
            *self = *other;
            return;
        }

        let z1z1 = self.z.sqr();
        let z2z2 = other.z.sqr();
        let mut s2 = z1z1 * self.z;
        let u2 = z1z1 * other.x;
        s2 = s2 * other.y;
        let u1 = z2z2 * self.x;
        let mut s1 = z2z2 * other.z;
        s1 = s1 * self.y;

        let f = s2 - s1;
        let h = u2 - u1;

        if h.is_zero() {
            if f.is_zero() {
                self.self_dbl();
                return;
            }
            *self = Self::infinity();
            return;
        }

        let f = f + f;
        let mut i = h + h;
        i = i.sqr();
        let j = h * i;
        let u1 = u1 * i;
        let u2_term = u1 + u1;
        let u2_term = u2_term + j;

        self.x = f.sqr();
        self.x -= u2_term;

        let mut j = j * s1;
        j += j;

        self.y = u1 - self.x;
        self.y = self.y * f;
        self.y -= j;

        self.z = self.z + other.z;
        let zz_sum = z1z1 + z2z2;
        self.z = self.z.sqr();
        self.z -= zz_sum;
        self.z = self.z * h;
    }

    #[inline]
    pub fn sub_assign_element(&mut self, other: &Self) {
        let neg_other = Self::new(other.x, -other.y, other.z);
        self.add_assign_element(&neg_other);
    }
}

// ---------------------------------------------------------------------------
// Scalar multiplication
// ---------------------------------------------------------------------------

impl<G: GroupParams> Element<G> {
    /// Left-to-right double-and-add over raw little-endian exponent limbs.
    pub fn mul_bits(&self, exp: &[u64]) -> Self {
        let mut msb = None;
        for i in (0..exp.len()).rev() {
            if exp[i] != 0 {
                msb = Some(i as u32 * 64 + (63 - exp[i].leading_zeros()));
                break;
            }
        }
        let msb = match msb {
            Some(m) => m,
            None => return Self::infinity(),
        };

        let mut accumulator = *self;
        for i in (0..msb).rev() {
            accumulator.self_dbl();
            if (exp[(i / 64) as usize] >> (i % 64)) & 1 == 1 {
                accumulator.add_assign_element(self);
            }
        }
        accumulator
    }

    /// Signed-window NAF multiplication. Uses an odd-multiple lookup table
    /// of 2^(window-1) entries.
    pub fn mul_wnaf(&self, exp: &[u64], window: usize) -> Self {
        debug_assert!(window >= 2);
        let digits = find_wnaf(window, exp);
        if digits.is_empty() || self.is_point_at_infinity() {
            return Self::infinity();
        }

        // table[i] = (2i + 1)·P
        let table_size = 1usize << (window - 1);
        let mut table = Vec::with_capacity(table_size);
        table.push(*self);
        let d2 = self.dbl();
        for i in 1..table_size {
            let mut next: Element<G> = table[i - 1];
            next.add_assign_element(&d2);
            table.push(next);
        }

        let mut accumulator = Self::infinity();
        for &digit in digits.iter().rev() {
            accumulator.self_dbl();
            if digit > 0 {
                accumulator.add_assign_element(&table[(digit as usize - 1) / 2]);
            } else if digit < 0 {
                let entry = table[((-digit) as usize - 1) / 2];
                accumulator.sub_assign_element(&entry);
            }
        }
        accumulator
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<G: GroupParams> std::ops::Add for Element<G> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self.add_assign_element(&rhs);
        self
    }
}

impl<G: GroupParams> std::ops::AddAssign for Element<G> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_assign_element(&rhs);
    }
}

impl<G: GroupParams> std::ops::Add<AffineElement<G>> for Element<G> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: AffineElement<G>) -> Self {
        self.add_assign_affine(&rhs);
        self
    }
}

impl<G: GroupParams> std::ops::Sub for Element<G> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        self.sub_assign_element(&rhs);
        self
    }
}

impl<G: GroupParams> std::ops::SubAssign for Element<G> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_assign_element(&rhs);
    }
}

impl<G: GroupParams> std::ops::Neg for Element<G> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(self.x, -self.y, self.z)
    }
}

impl<G: GroupParams> PartialEq for Element<G> {
    fn eq(&self, other: &Self) -> bool {
        let am_inf = self.is_point_at_infinity();
        let is_inf = other.is_point_at_infinity();
        if am_inf || is_inf {
            return am_inf == is_inf;
        }
        let lhs_zz = self.z.sqr();
        let lhs_zzz = lhs_zz * self.z;
        let rhs_zz = other.z.sqr();
        let rhs_zzz = rhs_zz * other.z;

        self.x * rhs_zz == other.x * lhs_zz && self.y * rhs_zzz == other.y * lhs_zzz
    }
}

impl<G: GroupParams> Eq for Element<G> {}
