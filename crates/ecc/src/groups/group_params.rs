use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::errors::AlgebraResult;
use crate::fields::field::Field;
use crate::fields::field2::{Field2, Fq2Params};
use crate::fields::field3::{Field3, Fq3Params};
use crate::fields::field_params::FieldParams;

/// The operations a coordinate field must provide for the Jacobian group
/// formulas. Implemented by the base field (G1) and by the quadratic and
/// cubic extensions (G2 on the respective twists).
pub trait CoordinateField:
    Copy
    + Eq
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn sqr(&self) -> Self;
    fn inverse(&self) -> AlgebraResult<Self>;
    fn random_element() -> Self;
}

impl<P: FieldParams<N>, const N: usize> CoordinateField for Field<P, N> {
    fn zero() -> Self {
        Field::zero()
    }
    fn one() -> Self {
        Field::one()
    }
    fn is_zero(&self) -> bool {
        Field::is_zero(self)
    }
    fn sqr(&self) -> Self {
        Field::sqr(self)
    }
    fn inverse(&self) -> AlgebraResult<Self> {
        Field::inverse(self)
    }
    fn random_element() -> Self {
        Field::random_element()
    }
}

impl<P: Fq2Params<N>, const N: usize> CoordinateField for Field2<P, N> {
    fn zero() -> Self {
        Field2::zero()
    }
    fn one() -> Self {
        Field2::one()
    }
    fn is_zero(&self) -> bool {
        Field2::is_zero(self)
    }
    fn sqr(&self) -> Self {
        Field2::sqr(self)
    }
    fn inverse(&self) -> AlgebraResult<Self> {
        Field2::inverse(self)
    }
    fn random_element() -> Self {
        Field2::random_element()
    }
}

impl<P: Fq3Params<N>, const N: usize> CoordinateField for Field3<P, N> {
    fn zero() -> Self {
        Field3::zero()
    }
    fn one() -> Self {
        Field3::one()
    }
    fn is_zero(&self) -> bool {
        Field3::is_zero(self)
    }
    fn sqr(&self) -> Self {
        Field3::sqr(self)
    }
    fn inverse(&self) -> AlgebraResult<Self> {
        Field3::inverse(self)
    }
    fn random_element() -> Self {
        Field3::random_element()
    }
}

/// Trait defining a short-Weierstrass group y² = x³ + a·x + b over a
/// coordinate field, together with its generator.
pub trait GroupParams: 'static + Send + Sync + Sized {
    type Coord: CoordinateField;

    /// Whether the curve has a non-zero `a` coefficient.
    const HAS_A: bool;

    fn coeff_a() -> Self::Coord;
    fn coeff_b() -> Self::Coord;
    fn generator_x() -> Self::Coord;
    fn generator_y() -> Self::Coord;

    /// Increasing instance-size thresholds for fixed-base window selection.
    /// An empty table selects the compiled default window.
    fn fixed_base_exp_window_table() -> &'static [usize] {
        &[]
    }
}
