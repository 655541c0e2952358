/// Scene primitives for projection and painting
use nalgebra::{Point2, Point3, Vector3};

use crate::math::{self, Axis};

/// Solid RGB color carried by a surface. Frontends map this onto whatever
/// color type their drawing target uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(220, 50, 47);
    pub const GREEN: Color = Color::new(70, 180, 90);
    pub const BLUE: Color = Color::new(60, 110, 220);
    pub const BROWN: Color = Color::new(150, 100, 60);
}

/// A triangle as exactly three ordered vertices. The order defines the
/// winding for any downstream fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<P> {
    pub vertices: [P; 3],
}

impl<P> Triangle<P> {
    pub fn new(a: P, b: P, c: P) -> Self {
        Self { vertices: [a, b, c] }
    }
}

impl Triangle<Point3<f64>> {
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / 3.0)
    }
}

/// An ordered, non-closed vertex list; the closing edge (last to first) is
/// implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P> {
    pub vertices: Vec<P>,
}

impl<P> Polygon<P> {
    pub fn new(vertices: Vec<P>) -> Self {
        Self { vertices }
    }
}

impl Polygon<Point2<f64>> {
    pub fn centroid(&self) -> Point2<f64> {
        let n = self.vertices.len().max(1) as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
        Point2::new(sx / n, sy / n)
    }

    /// Re-wind the vertices counter-clockwise by angle around the centroid.
    /// Fan-clipped polygons come out of the renderer in triangle-vertex
    /// order, which is not guaranteed convex-ordered for filling.
    pub fn sorted_by_angle(mut self) -> Self {
        let center = self.centroid();
        self.vertices.sort_by(|a, b| {
            let angle_a = (a.y - center.y).atan2(a.x - center.x);
            let angle_b = (b.y - center.y).atan2(b.x - center.x);
            angle_a.total_cmp(&angle_b)
        });
        self
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<P> {
    pub start: P,
    pub end: P,
}

impl<P> Line<P> {
    pub fn new(start: P, end: P) -> Self {
        Self { start, end }
    }
}

/// A colored group of world-space triangles, typically one planar face of a
/// solid (e.g. a cube face split into two triangles).
#[derive(Debug, Clone, PartialEq)]
pub struct Surface3d {
    pub triangles: Vec<Triangle<Point3<f64>>>,
    pub color: Color,
}

impl Surface3d {
    pub fn new(triangles: Vec<Triangle<Point3<f64>>>, color: Color) -> Self {
        Self { triangles, color }
    }

    fn map_vertices(&self, f: impl Fn(Point3<f64>) -> Point3<f64>) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle::new(f(t.vertices[0]), f(t.vertices[1]), f(t.vertices[2])))
            .collect();
        Self::new(triangles, self.color)
    }

    pub fn rotated_about(&self, pivot: Point3<f64>, axis: Axis, angle: f64) -> Self {
        self.map_vertices(|v| math::rotate_about(v, pivot, axis, angle))
    }

    pub fn translated(&self, delta: Vector3<f64>) -> Self {
        self.map_vertices(|v| v + delta)
    }
}

/// A projected 2D point annotated with its camera-space depth, the Euclidean
/// distance from the camera frame center to the source vertex. Depth is a
/// paint-order and line-weight cue, not a depth buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedPoint {
    pub point: Point2<f64>,
    pub depth: f64,
}

impl RenderedPoint {
    pub fn new(point: Point2<f64>, depth: f64) -> Self {
        Self { point, depth }
    }
}

/// The renderer's output unit: the projected polygons of one input surface,
/// carrying the surface's color.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface2d {
    pub polygons: Vec<Polygon<RenderedPoint>>,
    pub color: Color,
}

impl Surface2d {
    pub fn new(polygons: Vec<Polygon<RenderedPoint>>, color: Color) -> Self {
        Self { polygons, color }
    }
}

/// Axis-aligned box builder. Each of the six faces becomes its own
/// `Surface3d` of two triangles so faces occlude independently.
#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    pub center: Point3<f64>,
    pub x_length: f64,
    pub y_length: f64,
    pub z_length: f64,
    pub color: Color,
}

impl Cuboid {
    pub fn new(
        color: Color,
        center: Point3<f64>,
        x_length: f64,
        y_length: f64,
        z_length: f64,
    ) -> Self {
        Self {
            center,
            x_length,
            y_length,
            z_length,
            color,
        }
    }

    pub fn cube(color: Color, center: Point3<f64>, side: f64) -> Self {
        Self::new(color, center, side, side, side)
    }

    fn corners(&self) -> [Point3<f64>; 8] {
        let (hx, hy, hz) = (
            self.x_length / 2.0,
            self.y_length / 2.0,
            self.z_length / 2.0,
        );
        let c = self.center;
        [
            Point3::new(c.x + hx, c.y + hy, c.z + hz),
            Point3::new(c.x + hx, c.y - hy, c.z + hz),
            Point3::new(c.x - hx, c.y - hy, c.z + hz),
            Point3::new(c.x - hx, c.y + hy, c.z + hz),
            Point3::new(c.x + hx, c.y + hy, c.z - hz),
            Point3::new(c.x + hx, c.y - hy, c.z - hz),
            Point3::new(c.x - hx, c.y - hy, c.z - hz),
            Point3::new(c.x - hx, c.y + hy, c.z - hz),
        ]
    }

    /// One surface per face, split along a diagonal into two triangles.
    pub fn surfaces(&self) -> Vec<Surface3d> {
        let v = self.corners();
        let face = |a: usize, b: usize, c: usize, d: usize| {
            // a-b-d and c-b-d share the b-d diagonal
            Surface3d::new(
                vec![
                    Triangle::new(v[a], v[b], v[d]),
                    Triangle::new(v[c], v[b], v[d]),
                ],
                self.color,
            )
        };
        vec![
            face(0, 1, 2, 3), // front (+z)
            face(4, 5, 6, 7), // back (-z)
            face(0, 1, 5, 4), // right (+x)
            face(3, 2, 6, 7), // left (-x)
            face(0, 3, 7, 4), // top (+y)
            face(1, 2, 6, 5), // bottom (-y)
        ]
    }
}
