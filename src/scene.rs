//! Scene storage and the first-hit query contract.

use glam::Vec3A;

use crate::geometry::Shape;
use crate::material::Appearance;
use crate::ray::Ray;

/// A shaped, shaded thing living in a scene.
#[derive(Debug, Clone)]
pub struct Object {
    /// Geometry of the object.
    pub shape: Shape,
    /// Surface appearance, evaluated per hit point.
    pub appearance: Appearance,
}

/// Nearest valid intersection between a ray and scene geometry.
///
/// Borrows the hit object from the scene, so a `Hit` never outlives the
/// query that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Where the ray met the surface.
    pub position: Vec3A,
    /// The object that was hit.
    pub object: &'a Object,
}

/// Capability of answering "what does this ray hit first".
///
/// Implementations must return the intersection with the smallest
/// non-negative `t` among all objects, breaking exact ties in favor of the
/// earliest-inserted object. Any conforming implementation (a spatial index,
/// say) is substitutable for [`BasicScene`] with identical render output.
pub trait SceneQuery: Send + Sync {
    /// Nearest intersection along `ray`, or `None` for the background.
    fn find_first_hit(&self, ray: &Ray) -> Option<Hit<'_>>;
}

/// Linear-scan scene: every query tests every object.
#[derive(Debug, Clone, Default)]
pub struct BasicScene {
    /// Objects in insertion order; the order is the tie-break for hits at
    /// equal distance.
    pub objects: Vec<Object>,
}

impl BasicScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a scene from objects, kept in the given order.
    pub fn with_objects(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    /// Append an object to the scene.
    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }
}

impl SceneQuery for BasicScene {
    fn find_first_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut min_hit = None;
        let mut min_t = 0.0;

        for object in &self.objects {
            if let Some(intersection) = object.shape.intersect(ray) {
                // Strict comparison: a later object at exactly the same t
                // does not displace an earlier one.
                if min_hit.is_none() || intersection.t < min_t {
                    min_t = intersection.t;
                    min_hit = Some(Hit {
                        position: intersection.position,
                        object,
                    });
                }
            }
        }

        min_hit
    }
}
