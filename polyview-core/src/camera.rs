/// Immutable camera with incremental re-orientation
use nalgebra::{Matrix3, Point3, Vector3};

use crate::error::{RenderError, Result};
use crate::math;

/// Magnitude of the vertical nudge mixed into the basis-derivation helper
/// vector. Breaks the helper/forward parallel degeneracy and biases the
/// derived horizontal axis deterministically.
const UP_NUDGE: f64 = 1e-7;

/// An orthonormal viewing basis: x = horizontal, y = vertical, z = forward.
/// Axes are normalized on construction; orthogonality is the constructor
/// caller's responsibility and is restored by `reorthonormalized`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation3d {
    pub x: Vector3<f64>,
    pub y: Vector3<f64>,
    pub z: Vector3<f64>,
}

impl Orientation3d {
    pub fn new(x: Vector3<f64>, y: Vector3<f64>, z: Vector3<f64>) -> Result<Self> {
        Ok(Self {
            x: math::unit(x)?,
            y: math::unit(y)?,
            z: math::unit(z)?,
        })
    }

    /// The world-aligned basis.
    pub fn world() -> Self {
        Self {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }

    /// Derive a full basis from a forward direction alone.
    ///
    /// The helper vector is the negated forward plus a tiny vertical nudge,
    /// so the cross products below stay well-defined and the horizontal axis
    /// lands on the same side for every non-vertical forward.
    pub fn from_forward(forward: Vector3<f64>) -> Result<Self> {
        let forward = math::unit(forward)?;
        let helper = -forward + Vector3::new(0.0, UP_NUDGE, 0.0);
        let x = math::unit(helper.cross(&forward))?;
        let y = math::unit(forward.cross(&x))?;
        Ok(Self { x, y, z: forward })
    }

    /// Gram-Schmidt pass restoring pairwise orthogonality. Incremental
    /// rotations compose bases repeatedly and would otherwise let floating
    /// error accumulate across a long interactive session.
    pub fn reorthonormalized(&self) -> Result<Self> {
        let z = math::unit(self.z)?;
        let x = math::unit(self.x - z * self.x.dot(&z))?;
        let y = math::unit(self.y - z * self.y.dot(&z) - x * self.y.dot(&x))?;
        Ok(Self { x, y, z })
    }
}

/// An immutable camera pose. Every state change builds a fresh value; the
/// interactive layer replaces its camera each frame instead of mutating it.
///
/// Invariant: `focal_point == frame_center - z * focal_length` with
/// `focal_length == cos(fov / 2) * frame_width`, and the orientation axes are
/// mutually orthonormal immediately after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub frame_center: Point3<f64>,
    pub orientation: Orientation3d,
    pub focal_point: Point3<f64>,
    pub fov_radians: f64,
    pub frame_width: f64,
    pub frame_height: f64,
}

impl Camera {
    /// Build a camera from an explicit orientation basis.
    pub fn with_orientation(
        frame_center: Point3<f64>,
        orientation: Orientation3d,
        fov_radians: f64,
        frame_width: f64,
        frame_height: f64,
    ) -> Self {
        let focal_length = (fov_radians / 2.0).cos() * frame_width;
        Self {
            frame_center,
            orientation,
            focal_point: frame_center - orientation.z * focal_length,
            fov_radians,
            frame_width,
            frame_height,
        }
    }

    /// Build a camera from a forward direction, deriving the rest of the
    /// basis with `Orientation3d::from_forward`.
    pub fn from_direction(
        frame_center: Point3<f64>,
        direction: Vector3<f64>,
        fov_radians: f64,
        frame_width: f64,
        frame_height: f64,
    ) -> Result<Self> {
        let orientation = Orientation3d::from_forward(direction)?;
        Ok(Self::with_orientation(
            frame_center,
            orientation,
            fov_radians,
            frame_width,
            frame_height,
        ))
    }

    /// Forward viewing direction.
    pub fn direction(&self) -> Vector3<f64> {
        self.orientation.z
    }

    /// Screen-horizontal basis vector.
    pub fn horizontal(&self) -> Vector3<f64> {
        self.orientation.x
    }

    /// Screen-vertical basis vector.
    pub fn vertical(&self) -> Vector3<f64> {
        self.orientation.y
    }

    pub fn focal_length(&self) -> f64 {
        (self.fov_radians / 2.0).cos() * self.frame_width
    }

    /// Rotate the view by independent horizontal and vertical angle deltas.
    ///
    /// The delta forward vector `(sin h, sin v, cos h * cos v)` lives in the
    /// current local frame. A full delta basis is derived from it, and the
    /// old basis vectors are re-expressed through the inverse of that
    /// delta-basis matrix. Composing rotations this way avoids accumulating
    /// raw angles, at the cost of floating drift, which the final
    /// reorthonormalization pass absorbs.
    pub fn change_angle(&self, horizontal_radians: f64, vertical_radians: f64) -> Result<Camera> {
        let delta_forward = math::unit(Vector3::new(
            horizontal_radians.sin(),
            vertical_radians.sin(),
            horizontal_radians.cos() * vertical_radians.cos(),
        ))?;
        let delta = Orientation3d::from_forward(delta_forward)?;

        let basis = Matrix3::from_columns(&[delta.x, delta.y, delta.z]);
        let inverse = basis.try_inverse().ok_or(RenderError::SingularBasis)?;

        let orientation = Orientation3d::new(
            inverse * self.orientation.x,
            inverse * self.orientation.y,
            inverse * self.orientation.z,
        )?
        .reorthonormalized()?;

        Ok(Self::with_orientation(
            self.frame_center,
            orientation,
            self.fov_radians,
            self.frame_width,
            self.frame_height,
        ))
    }

    /// Translate the viewing frame, keeping orientation and field of view.
    /// The focal point is recomputed from the new frame center.
    pub fn change_frame_center(&self, delta: Vector3<f64>) -> Camera {
        Self::with_orientation(
            self.frame_center + delta,
            self.orientation,
            self.fov_radians,
            self.frame_width,
            self.frame_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FOV: f64 = 70.0 / 180.0 * std::f64::consts::PI;

    fn test_camera() -> Camera {
        Camera::from_direction(
            Point3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            FOV,
            1.0,
            1.0,
        )
        .unwrap()
    }

    fn assert_orthonormal(orientation: &Orientation3d) {
        assert!((orientation.x.norm() - 1.0).abs() < 1e-9);
        assert!((orientation.y.norm() - 1.0).abs() < 1e-9);
        assert!((orientation.z.norm() - 1.0).abs() < 1e-9);
        assert!(orientation.x.dot(&orientation.y).abs() < 1e-9);
        assert!(orientation.x.dot(&orientation.z).abs() < 1e-9);
        assert!(orientation.y.dot(&orientation.z).abs() < 1e-9);
    }

    #[test]
    fn test_from_forward_rejects_zero_direction() {
        assert_eq!(
            Orientation3d::from_forward(Vector3::zeros()),
            Err(RenderError::ZeroLengthVector)
        );
    }

    #[test]
    fn test_from_forward_rejects_vertical_direction() {
        // The nudged helper is parallel to a straight-up forward vector.
        assert!(Orientation3d::from_forward(Vector3::y()).is_err());
    }

    #[test]
    fn test_focal_point_sits_behind_frame_center() {
        let camera = test_camera();
        let focal_length = (FOV / 2.0).cos() * 1.0;
        let expected = Point3::new(0.0, 0.0, 1.0 + focal_length);
        assert!((camera.focal_point - expected).norm() < 1e-9);
    }

    #[test]
    fn test_orthonormal_for_random_directions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let direction = Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-0.9..0.9),
                rng.gen_range(-1.0..1.0),
            );
            if direction.norm() < 1e-3 {
                continue;
            }
            let camera =
                Camera::from_direction(Point3::origin(), direction, FOV, 1.0, 1.0).unwrap();
            assert_orthonormal(&camera.orientation);
        }
    }

    #[test]
    fn test_orthonormal_after_random_angle_changes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut camera = test_camera();
        for _ in 0..100 {
            let h = rng.gen_range(-0.5..0.5);
            let v = rng.gen_range(-0.5..0.5);
            camera = camera.change_angle(h, v).unwrap();
            assert_orthonormal(&camera.orientation);
        }
    }

    #[test]
    fn test_zero_angle_change_is_identity() {
        let camera = test_camera();
        let unchanged = camera.change_angle(0.0, 0.0).unwrap();
        assert!((unchanged.orientation.x - camera.orientation.x).norm() < 1e-9);
        assert!((unchanged.orientation.y - camera.orientation.y).norm() < 1e-9);
        assert!((unchanged.orientation.z - camera.orientation.z).norm() < 1e-9);
        assert!((unchanged.focal_point - camera.focal_point).norm() < 1e-9);
    }

    #[test]
    fn test_translations_compose() {
        let camera = test_camera();
        let d1 = Vector3::new(0.25, -1.0, 3.0);
        let d2 = Vector3::new(-2.0, 0.5, 0.125);
        let stepped = camera.change_frame_center(d1).change_frame_center(d2);
        let direct = camera.change_frame_center(d1 + d2);
        assert!((stepped.frame_center - direct.frame_center).norm() < 1e-12);
        assert!((stepped.focal_point - direct.focal_point).norm() < 1e-12);
    }

    #[test]
    fn test_translation_keeps_orientation_and_focal_offset() {
        let camera = test_camera();
        let moved = camera.change_frame_center(Vector3::new(1.0, 2.0, 3.0));
        assert!((moved.orientation.z - camera.orientation.z).norm() < 1e-12);
        let offset = moved.frame_center - moved.focal_point;
        assert!((offset - camera.direction() * camera.focal_length()).norm() < 1e-9);
    }

    #[test]
    fn test_angle_change_turns_the_forward_vector() {
        let camera = test_camera();
        let turned = camera.change_angle(std::f64::consts::FRAC_PI_4, 0.0).unwrap();
        let cos_angle = turned.direction().dot(&camera.direction());
        assert!((cos_angle - (std::f64::consts::FRAC_PI_4).cos()).abs() < 1e-6);
    }
}
