/// Small math helpers layered over nalgebra
use nalgebra::{Point3, Rotation3, Unit, Vector2, Vector3};

use crate::error::{RenderError, Result};

/// Magnitudes below this are treated as zero throughout the pipeline.
pub const EPSILON: f64 = 1e-12;

/// A named world axis, used for rotating scene geometry about a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Normalize a 3D vector, failing on zero magnitude instead of producing NaN.
pub fn unit(v: Vector3<f64>) -> Result<Vector3<f64>> {
    v.try_normalize(EPSILON).ok_or(RenderError::ZeroLengthVector)
}

/// Normalize a 2D vector, failing on zero magnitude instead of producing NaN.
pub fn unit2(v: Vector2<f64>) -> Result<Vector2<f64>> {
    v.try_normalize(EPSILON).ok_or(RenderError::ZeroLengthVector)
}

/// Re-express `v` in the basis given by the three column vectors, i.e. the
/// dot product of `v` with each column in {x, y, z} order.
pub fn into_basis(
    v: Vector3<f64>,
    x: Vector3<f64>,
    y: Vector3<f64>,
    z: Vector3<f64>,
) -> Vector3<f64> {
    Vector3::new(x.dot(&v), y.dot(&v), z.dot(&v))
}

/// Rotate `point` about the line through `pivot` along `axis`.
pub fn rotate_about(point: Point3<f64>, pivot: Point3<f64>, axis: Axis, angle: f64) -> Point3<f64> {
    let rotation = Rotation3::from_axis_angle(&axis.unit(), angle);
    pivot + rotation * (point - pivot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_rejects_zero_vector() {
        assert_eq!(unit(Vector3::zeros()), Err(RenderError::ZeroLengthVector));
        assert_eq!(unit2(Vector2::zeros()), Err(RenderError::ZeroLengthVector));
    }

    #[test]
    fn test_unit_normalizes() {
        let v = unit(Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);
        assert!((v.z - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_into_basis_is_identity_for_world_axes() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let out = into_basis(v, Vector3::x(), Vector3::y(), Vector3::z());
        assert!((out - v).norm() < 1e-12);
    }

    #[test]
    fn test_into_basis_projects_onto_swapped_axes() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let out = into_basis(v, Vector3::y(), Vector3::x(), Vector3::z());
        assert!((out - Vector3::new(2.0, 1.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotate_about_quarter_turn_around_y() {
        let rotated = rotate_about(
            Point3::new(1.0, 5.0, 0.0),
            Point3::origin(),
            Axis::Y,
            std::f64::consts::FRAC_PI_2,
        );
        assert!((rotated - Point3::new(0.0, 5.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_rotate_about_respects_pivot() {
        let pivot = Point3::new(2.0, 0.0, 0.0);
        let rotated = rotate_about(
            Point3::new(3.0, 0.0, 0.0),
            pivot,
            Axis::Z,
            std::f64::consts::PI,
        );
        assert!((rotated - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
    }
}
