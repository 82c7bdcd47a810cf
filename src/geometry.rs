//! Renderable shape primitives and their ray intersections.
//!
//! Shapes are a closed set: spheres, single triangles, and a mesh
//! placeholder. Intersection reports the smallest parametric distance
//! `t >= 0` along the ray, so geometry fully behind the ray origin is never
//! hit.

use glam::Vec3A;

use crate::ray::Ray;

/// Geometric surface of a renderable object.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Sphere given by center and radius.
    Sphere {
        /// Center in world coordinates.
        center: Vec3A,
        /// Radius, expected to be positive (not validated).
        radius: f32,
    },
    /// Triangle given by three vertices. The winding determines the surface
    /// normal via the right-hand rule.
    Triangle {
        /// Vertices in winding order.
        vertices: [Vec3A; 3],
    },
    /// Triangle mesh placeholder. Rays never intersect it.
    Mesh,
}

/// Ray-shape intersection: the surface point and its ray parameter.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Point on the surface where the ray meets the shape.
    pub position: Vec3A,
    /// Parametric distance along the ray, `>= 0`.
    pub t: f32,
}

impl Shape {
    /// Surface normal at a point assumed to lie on the shape.
    ///
    /// Returns the zero vector for the mesh placeholder and for a sphere
    /// queried exactly at its center.
    pub fn normal_at(&self, point: Vec3A) -> Vec3A {
        match self {
            Shape::Sphere { center, .. } => {
                if point == *center {
                    return Vec3A::ZERO;
                }
                (point - *center).normalize()
            }
            Shape::Triangle { vertices } => triangle_normal(vertices),
            Shape::Mesh => Vec3A::ZERO,
        }
    }

    /// Nearest intersection of `ray` with this shape at non-negative `t`.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Shape::Sphere { center, radius } => intersect_sphere(ray, *center, *radius),
            Shape::Triangle { vertices } => intersect_triangle(ray, vertices),
            Shape::Mesh => None,
        }
    }
}

/// Plane normal of the triangle, following the vertex winding.
fn triangle_normal(vertices: &[Vec3A; 3]) -> Vec3A {
    let [v0, v1, v2] = *vertices;
    (v1 - v0).cross(v2 - v1).normalize()
}

/// Solve `|o + t*d - c|^2 = r^2` for the smallest non-negative root.
///
/// A ray starting inside the sphere hits the far surface.
fn intersect_sphere(ray: &Ray, center: Vec3A, radius: f32) -> Option<Intersection> {
    let oc = center - ray.origin;
    let a = ray.direction.length_squared();
    let h = ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    // Near root first; fall back to the far root when the near one lies
    // behind the origin.
    let mut root = (h - sqrtd) / a;
    if root < 0.0 {
        root = (h + sqrtd) / a;
        if root < 0.0 {
            return None;
        }
    }

    Some(Intersection {
        position: ray.at(root),
        t: root,
    })
}

/// Ray-plane intersection followed by a half-plane test per edge.
fn intersect_triangle(ray: &Ray, vertices: &[Vec3A; 3]) -> Option<Intersection> {
    let [v0, v1, v2] = *vertices;
    let normal = triangle_normal(vertices);

    let t = normal.dot(v0 - ray.origin) / normal.dot(ray.direction);
    if t < 0.0 {
        return None;
    }

    let point = ray.at(t);
    let edges = [(v0, v1 - v0), (v1, v2 - v1), (v2, v0 - v2)];

    // Each edge normal points out of the triangle; the point is inside only
    // if it projects non-positively onto all three. A parallel ray produces
    // non-finite values here and falls through to a miss.
    let inside = edges
        .iter()
        .all(|&(start, edge)| (point - start).dot(edge.cross(normal)) <= 0.0);

    inside.then_some(Intersection { position: point, t })
}
