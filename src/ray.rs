//! Rays, the sampling primitive of the renderer.

use glam::Vec3A;

/// Semi-infinite line r(t) = origin + t * direction.
///
/// Built fresh for every primary and secondary bounce and never mutated
/// afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point in world coordinates: the camera position for primary
    /// rays, a surface point for secondary bounces.
    pub origin: Vec3A,

    /// Direction of travel. Unit length by convention, not enforced.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a ray from origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_the_direction() {
        let ray = Ray::new(Vec3A::new(1.0, 0.0, 0.0), Vec3A::new(0.0, 2.0, 0.0));
        assert_eq!(ray.at(0.0), Vec3A::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(1.5), Vec3A::new(1.0, 3.0, 0.0));
    }
}
