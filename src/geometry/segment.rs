use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A bounded straight centerline: `P(t) = origin + t * direction`, `t ∈ [0, length]`.
///
/// The direction is always unit length, so `t` is a distance in model units.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    origin: Point3,
    direction: Vector3,
    length: f64,
}

impl Segment {
    /// Creates a new segment from an origin, a direction and a length.
    ///
    /// The direction is normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length or if the
    /// length is negative or not finite.
    pub fn new(origin: Point3, direction: Vector3, length: f64) -> Result<Self> {
        if !length.is_finite() || length < 0.0 {
            return Err(GeometryError::InvalidLength(length).into());
        }
        let norm = direction.norm();
        if norm < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / norm,
            length,
        })
    }

    /// Returns the start point.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns the length along the direction.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> Point3 {
        self.point_at(self.length)
    }

    /// Evaluates the centerline at distance `t` from the origin.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
