use std::marker::PhantomData;

use super::group_params::{CoordinateField, GroupParams};

/// An elliptic curve point in affine coordinates, with an explicit identity
/// flag.
pub struct AffineElement<G: GroupParams> {
    pub x: G::Coord,
    pub y: G::Coord,
    pub infinity: bool,
    _phantom: PhantomData<G>,
}

impl<G: GroupParams> Clone for AffineElement<G> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GroupParams> Copy for AffineElement<G> {}

impl<G: GroupParams> std::fmt::Debug for AffineElement<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.infinity {
            write!(f, "AffineElement(infinity)")
        } else {
            write!(f, "AffineElement({:?}, {:?})", self.x, self.y)
        }
    }
}

impl<G: GroupParams> AffineElement<G> {
    #[inline]
    pub fn new(x: G::Coord, y: G::Coord) -> Self {
        Self {
            x,
            y,
            infinity: false,
            _phantom: PhantomData,
        }
    }

    /// The group generator.
    #[inline]
    pub fn one() -> Self {
        Self::new(G::generator_x(), G::generator_y())
    }

    #[inline]
    pub fn infinity() -> Self {
        Self {
            x: G::Coord::zero(),
            y: G::Coord::one(),
            infinity: true,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn is_point_at_infinity(&self) -> bool {
        self.infinity
    }

    /// Check the affine curve equation y² = x³ + a·x + b.
    pub fn on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let mut rhs = self.x.sqr() * self.x + G::coeff_b();
        if G::HAS_A {
            rhs += self.x * G::coeff_a();
        }
        self.y.sqr() == rhs
    }

    pub fn random_element() -> Self {
        super::element::Element::<G>::random_element().to_affine()
    }
}

impl<G: GroupParams> std::ops::Neg for AffineElement<G> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        if self.infinity {
            self
        } else {
            Self::new(self.x, -self.y)
        }
    }
}

impl<G: GroupParams> PartialEq for AffineElement<G> {
    fn eq(&self, other: &Self) -> bool {
        if self.infinity || other.infinity {
            return self.infinity == other.infinity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl<G: GroupParams> Eq for AffineElement<G> {}
