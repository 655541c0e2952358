/// Polyview Core Library - Software 3D projection pipeline
///
/// This library provides the stateless core of the renderer: an immutable
/// camera built from a view direction, ray/plane perspective projection with
/// focal-plane fan clipping, and the screen-space paint-command stage that
/// frontends consume.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod math;
pub mod plane;
pub mod renderer;
pub mod screen;

// Re-export commonly used types
pub use camera::{Camera, Orientation3d};
pub use error::{RenderError, Result};
pub use geometry::{
    Color, Cuboid, Line, Polygon, RenderedPoint, Surface2d, Surface3d, Triangle,
};
pub use math::Axis;
pub use plane::Plane;
pub use renderer::Renderer3d;
pub use screen::{paint, DisplayMode, PaintCommand, ScreenTransform};
