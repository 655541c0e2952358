/// Plane representation and line intersection
use nalgebra::{Point3, Vector3};

use crate::error::{RenderError, Result};
use crate::geometry::Line;
use crate::math::{self, EPSILON};

/// A plane given by a unit normal and a point it passes through. Cheap to
/// construct, so the renderer rebuilds it per query instead of caching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub point: Point3<f64>,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, point: Point3<f64>) -> Result<Self> {
        Ok(Self {
            normal: math::unit(normal)?,
            point,
        })
    }

    /// Intersect the infinite line through `line` with this plane.
    ///
    /// The line direction is normalized from end toward start, matching the
    /// projection rays cast from a camera's focal point: `start` is the focal
    /// point, `end` the world vertex, and the returned point is
    /// `start + dir * t` with `t = (n . p0 - n . start) / (n . dir)`.
    pub fn intersect_line(&self, line: &Line<Point3<f64>>) -> Result<Point3<f64>> {
        let direction = math::unit(line.start - line.end)?;
        let denominator = self.normal.dot(&direction);
        if denominator.abs() < EPSILON {
            return Err(RenderError::ParallelToPlane);
        }
        let t = (self.normal.dot(&self.point.coords) - self.normal.dot(&line.start.coords))
            / denominator;
        Ok(line.start + direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_normalizes_normal() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 3.0), Point3::origin()).unwrap();
        assert!((plane.normal.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constructor_rejects_zero_normal() {
        assert_eq!(
            Plane::new(Vector3::zeros(), Point3::origin()),
            Err(RenderError::ZeroLengthVector)
        );
    }

    #[test]
    fn test_intersects_axis_aligned_plane() {
        let plane = Plane::new(Vector3::z(), Point3::origin()).unwrap();
        // Line from (1, 2, 5) toward (1, 2, -5) crosses z = 0 at (1, 2, 0).
        let line = Line::new(Point3::new(1.0, 2.0, 5.0), Point3::new(1.0, 2.0, -5.0));
        let hit = plane.intersect_line(&line).unwrap();
        assert!((hit - Point3::new(1.0, 2.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_intersects_oblique_line() {
        let plane = Plane::new(Vector3::z(), Point3::new(0.0, 0.0, 1.0)).unwrap();
        let line = Line::new(Point3::new(0.0, 0.0, 3.0), Point3::new(2.0, 2.0, -1.0));
        let hit = plane.intersect_line(&line).unwrap();
        assert!((hit.z - 1.0).abs() < 1e-9);
        assert!((hit.x - 1.0).abs() < 1e-9);
        assert!((hit.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_line_is_an_error() {
        let plane = Plane::new(Vector3::z(), Point3::origin()).unwrap();
        let line = Line::new(Point3::new(0.0, 0.0, 1.0), Point3::new(5.0, 0.0, 1.0));
        assert_eq!(plane.intersect_line(&line), Err(RenderError::ParallelToPlane));
    }

    #[test]
    fn test_degenerate_line_is_an_error() {
        let plane = Plane::new(Vector3::z(), Point3::origin()).unwrap();
        let p = Point3::new(1.0, 1.0, 1.0);
        let line = Line::new(p, p);
        assert_eq!(plane.intersect_line(&line), Err(RenderError::ZeroLengthVector));
    }
}
