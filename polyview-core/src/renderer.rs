/// Perspective projection with focal-plane fan clipping
use log::{debug, trace};
use nalgebra::{Point2, Point3};

use crate::camera::Camera;
use crate::geometry::{Line, Polygon, RenderedPoint, Surface2d, Surface3d, Triangle};
use crate::math::{self, EPSILON};
use crate::plane::Plane;

/// Where a vertex sits relative to the focal plane, judged by the dot
/// product of the view direction with the vertex-to-focal-point ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    /// Dot product below -epsilon: the vertex projects normally.
    Front,
    /// Dot product above +epsilon: the projection landed on the wrong side
    /// of the focal point and must be replaced by synthesized points.
    Behind,
    /// Dot product within epsilon of zero: counts as visible for the
    /// triangle-discard test but generates no points.
    Boundary,
}

#[derive(Debug, Clone, Copy)]
struct ProjectedVertex {
    screen: Option<Point2<f64>>,
    facing: Facing,
    depth: f64,
}

/// Projects colored triangle surfaces through a camera onto its frame plane.
///
/// `render` is a pure function of its inputs: no state is carried between
/// frames, and a degenerate triangle is dropped from the output rather than
/// failing the frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer3d;

impl Renderer3d {
    pub fn new() -> Self {
        Self
    }

    /// Project every surface, producing one `Surface2d` per input surface in
    /// the same order. Output surfaces may hold zero polygons when all of
    /// their triangles sit behind the camera.
    pub fn render(&self, camera: &Camera, objects: &[Surface3d]) -> Vec<Surface2d> {
        objects
            .iter()
            .map(|object| {
                let polygons = object
                    .triangles
                    .iter()
                    .filter_map(|triangle| self.render_triangle(triangle, camera))
                    .collect();
                Surface2d::new(polygons, object.color)
            })
            .collect()
    }

    /// Flatten a frame-plane offset into frame coordinates by projecting it
    /// onto the horizontal and vertical basis vectors.
    fn flatten(&self, relative_to_frame: nalgebra::Vector3<f64>, camera: &Camera) -> Point2<f64> {
        let flattened = math::into_basis(
            relative_to_frame,
            camera.horizontal(),
            camera.vertical(),
            camera.direction(),
        );
        Point2::new(flattened.x, flattened.y)
    }

    fn project_vertex(&self, vertex: Point3<f64>, camera: &Camera) -> ProjectedVertex {
        let ray = Line::new(camera.focal_point, vertex);
        let depth = (vertex - camera.frame_center).norm();

        // Ray direction runs from the vertex back toward the focal point, so
        // a vertex the camera faces gives a negative dot product.
        let facing_dot = match math::unit(ray.start - ray.end) {
            Ok(ray_direction) => camera.direction().dot(&ray_direction),
            Err(_) => {
                // Vertex coincides with the focal point.
                return ProjectedVertex {
                    screen: None,
                    facing: Facing::Boundary,
                    depth,
                };
            }
        };
        let facing = if facing_dot < -EPSILON {
            Facing::Front
        } else if facing_dot > EPSILON {
            Facing::Behind
        } else {
            Facing::Boundary
        };

        let frame_plane = Plane {
            normal: camera.direction(),
            point: camera.frame_center,
        };
        let screen = frame_plane
            .intersect_line(&ray)
            .ok()
            .map(|intersection| self.flatten(intersection - camera.frame_center, camera));

        ProjectedVertex {
            screen,
            facing,
            depth,
        }
    }

    /// Project one triangle, fan-clipping across the focal plane.
    ///
    /// Vertices in front keep their projections. A vertex behind the focal
    /// plane projects to the wrong side of the frame, so for each in-front
    /// vertex it is replaced by a point pushed from that vertex's projection
    /// away from the bogus one, far enough to always land off-screen. The
    /// result is a single polygon that can carry more than three vertices.
    fn render_triangle(
        &self,
        triangle: &Triangle<Point3<f64>>,
        camera: &Camera,
    ) -> Option<Polygon<RenderedPoint>> {
        let projected: Vec<ProjectedVertex> = triangle
            .vertices
            .iter()
            .map(|vertex| self.project_vertex(*vertex, camera))
            .collect();

        let visible = projected
            .iter()
            .filter(|p| p.facing != Facing::Behind)
            .count();
        if visible == 0 {
            return None;
        }
        trace!("{visible} of 3 vertices in front of the camera");

        let off_screen_distance = 2.0 * camera.frame_width.hypot(camera.frame_height);

        let mut points: Vec<RenderedPoint> = Vec::with_capacity(4);
        for vertex in &projected {
            match vertex.facing {
                Facing::Front => {
                    // Front vertices always intersect the frame plane.
                    if let Some(screen) = vertex.screen {
                        points.push(RenderedPoint::new(screen, vertex.depth));
                    }
                }
                Facing::Behind => {
                    let Some(bogus) = vertex.screen else {
                        debug!("behind vertex with no frame-plane intersection, skipped");
                        continue;
                    };
                    for other in &projected {
                        if other.facing != Facing::Front {
                            continue;
                        }
                        let Some(anchor) = other.screen else { continue };
                        // Push from the in-front projection away from the
                        // bogus behind-camera projection.
                        let Ok(away) = math::unit2(anchor - bogus) else {
                            continue;
                        };
                        points.push(RenderedPoint::new(
                            anchor + away * off_screen_distance,
                            vertex.depth,
                        ));
                    }
                }
                Facing::Boundary => {}
            }
        }

        if points.len() < 3 {
            debug!("clipped triangle degenerated to {} points, dropped", points.len());
            return None;
        }
        Some(Polygon::new(points))
    }
}
