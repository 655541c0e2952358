/// Window-coordinate transform and paint-command generation
use nalgebra::Point2;

use crate::camera::Camera;
use crate::geometry::{Color, Line, Polygon, Surface2d};

/// How a frontend should paint the projected surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Wireframe,
    Solid,
}

/// A host-independent paint instruction in window coordinates. Frontends
/// execute these against whatever drawing surface they own.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Line {
        line: Line<Point2<f64>>,
        width: f64,
        color: Color,
    },
    Fill {
        polygon: Polygon<Point2<f64>>,
        color: Color,
    },
}

/// Maps frame coordinates (camera units, origin at frame center, y up) to
/// window coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy)]
pub struct ScreenTransform {
    scale: f64,
    center_x: f64,
    center_y: f64,
}

impl ScreenTransform {
    pub fn new(camera: &Camera, window_width: f64, window_height: f64) -> Self {
        let window_small_side = window_width.min(window_height);
        let camera_small_side = camera.frame_width.min(camera.frame_height);
        Self {
            scale: window_small_side / camera_small_side,
            center_x: window_width / 2.0,
            center_y: window_height / 2.0,
        }
    }

    pub fn to_window(&self, point: Point2<f64>) -> Point2<f64> {
        // Fan-clip points can sit arbitrarily far out; squash anything
        // non-finite to the largest representable offset.
        let finite = |n: f64| if n.is_finite() { n } else { f64::MAX };
        Point2::new(
            finite(point.x * self.scale) + self.center_x,
            -finite(point.y * self.scale) + self.center_y,
        )
    }
}

struct DepthLine {
    line: Line<Point2<f64>>,
    summed_depth: f64,
    color: Color,
}

/// Turn rendered surfaces into an ordered list of paint commands for a
/// window of the given size.
///
/// Wireframe strokes every polygon edge, farthest first with line width
/// proportional to the edge's summed endpoint depth. That is a cheap depth
/// cue, not a correct painter's algorithm. Solid fills polygons in surface
/// order after re-winding them around their centroid.
pub fn paint(
    rendering: &[Surface2d],
    camera: &Camera,
    window_width: f64,
    window_height: f64,
    mode: DisplayMode,
) -> Vec<PaintCommand> {
    let transform = ScreenTransform::new(camera, window_width, window_height);

    match mode {
        DisplayMode::Wireframe => {
            let mut edges: Vec<DepthLine> = Vec::new();
            for surface in rendering {
                for polygon in &surface.polygons {
                    let n = polygon.vertices.len();
                    for (i, vertex) in polygon.vertices.iter().enumerate() {
                        let next = &polygon.vertices[(i + 1) % n];
                        edges.push(DepthLine {
                            line: Line::new(
                                transform.to_window(vertex.point),
                                transform.to_window(next.point),
                            ),
                            summed_depth: vertex.depth + next.depth,
                            color: surface.color,
                        });
                    }
                }
            }
            // Farther edges first, stroked thicker.
            edges.sort_by(|a, b| b.summed_depth.total_cmp(&a.summed_depth));
            edges
                .into_iter()
                .map(|edge| PaintCommand::Line {
                    line: edge.line,
                    width: edge.summed_depth,
                    color: edge.color,
                })
                .collect()
        }
        DisplayMode::Solid => rendering
            .iter()
            .flat_map(|surface| {
                surface.polygons.iter().map(|polygon| {
                    let windowed = Polygon::new(
                        polygon
                            .vertices
                            .iter()
                            .map(|vertex| transform.to_window(vertex.point))
                            .collect(),
                    );
                    PaintCommand::Fill {
                        polygon: windowed.sorted_by_angle(),
                        color: surface.color,
                    }
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RenderedPoint;
    use nalgebra::{Point3, Vector3};

    fn test_camera() -> Camera {
        Camera::from_direction(
            Point3::origin(),
            Vector3::new(0.0, 0.0, -1.0),
            std::f64::consts::FRAC_PI_2,
            1.0,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_transform_centers_scales_and_flips_y() {
        let camera = test_camera();
        let transform = ScreenTransform::new(&camera, 200.0, 100.0);
        // Scale is min(window) / min(frame) = 100.
        let mapped = transform.to_window(Point2::new(0.1, 0.2));
        assert!((mapped.x - 110.0).abs() < 1e-9);
        assert!((mapped.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_squashes_non_finite_coordinates() {
        let camera = test_camera();
        let transform = ScreenTransform::new(&camera, 100.0, 100.0);
        let mapped = transform.to_window(Point2::new(f64::INFINITY, f64::NAN));
        assert!(mapped.x.is_finite());
        assert!(mapped.y.is_finite());
    }

    fn two_edge_surface() -> Vec<Surface2d> {
        // One near polygon and one far polygon, a triangle each.
        let near = Polygon::new(vec![
            RenderedPoint::new(Point2::new(0.0, 0.0), 1.0),
            RenderedPoint::new(Point2::new(0.1, 0.0), 1.0),
            RenderedPoint::new(Point2::new(0.0, 0.1), 1.0),
        ]);
        let far = Polygon::new(vec![
            RenderedPoint::new(Point2::new(0.2, 0.2), 9.0),
            RenderedPoint::new(Point2::new(0.3, 0.2), 9.0),
            RenderedPoint::new(Point2::new(0.2, 0.3), 9.0),
        ]);
        vec![Surface2d::new(vec![near, far], Color::BLUE)]
    }

    #[test]
    fn test_wireframe_strokes_far_edges_first() {
        let camera = test_camera();
        let commands = paint(&two_edge_surface(), &camera, 100.0, 100.0, DisplayMode::Wireframe);
        // Two triangles, three closing-inclusive edges each.
        assert_eq!(commands.len(), 6);
        let widths: Vec<f64> = commands
            .iter()
            .map(|command| match command {
                PaintCommand::Line { width, .. } => *width,
                PaintCommand::Fill { .. } => panic!("wireframe emitted a fill"),
            })
            .collect();
        assert!(widths.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!((widths[0] - 18.0).abs() < 1e-9);
        assert!((widths[5] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_solid_fills_once_per_polygon() {
        let camera = test_camera();
        let commands = paint(&two_edge_surface(), &camera, 100.0, 100.0, DisplayMode::Solid);
        assert_eq!(commands.len(), 2);
        for command in &commands {
            match command {
                PaintCommand::Fill { polygon, color } => {
                    assert_eq!(polygon.vertices.len(), 3);
                    assert_eq!(*color, Color::BLUE);
                }
                PaintCommand::Line { .. } => panic!("solid emitted a stroke"),
            }
        }
    }
}
