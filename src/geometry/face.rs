use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::{line_plane_intersect, LinePlaneRelation};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A bounded planar rectangle.
///
/// Spans `corner + u * u_dir + v * v_dir` for `u ∈ [0, u_extent]` and
/// `v ∈ [0, v_extent]`. The normal is `u_dir × v_dir`.
#[derive(Debug, Clone)]
pub struct RectFace {
    corner: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
    u_extent: f64,
    v_extent: f64,
}

impl RectFace {
    /// Creates a rectangle from a corner and its two edge vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if either edge is zero-length or the edges are not
    /// perpendicular.
    pub fn new(corner: Point3, u_edge: Vector3, v_edge: Vector3) -> Result<Self> {
        let u_extent = u_edge.norm();
        let v_extent = v_edge.norm();
        if u_extent < TOLERANCE || v_extent < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_dir = u_edge / u_extent;
        let v_dir = v_edge / v_extent;

        if u_dir.dot(&v_dir).abs() > TOLERANCE {
            return Err(
                GeometryError::Degenerate("face edges are not perpendicular".into()).into(),
            );
        }

        Ok(Self {
            corner,
            u_dir,
            v_dir,
            normal: u_dir.cross(&v_dir).normalize(),
            u_extent,
            v_extent,
        })
    }

    /// Returns the distance along `dir` at which the ray from `origin`
    /// enters this rectangle, if it does so at `t >= 0`.
    ///
    /// A ray lying in the face plane is not reported.
    #[must_use]
    pub fn ray_hit(&self, origin: &Point3, dir: &Vector3) -> Option<f64> {
        let LinePlaneRelation::Point { point, t } =
            line_plane_intersect(origin, dir, &self.corner, &self.normal)
        else {
            return None;
        };
        if t < -TOLERANCE {
            return None;
        }

        let dp = point - self.corner;
        let u = dp.dot(&self.u_dir);
        let v = dp.dot(&self.v_dir);
        let inside = (-TOLERANCE..=self.u_extent + TOLERANCE).contains(&u)
            && (-TOLERANCE..=self.v_extent + TOLERANCE).contains(&v);
        inside.then_some(t.max(0.0))
    }
}
