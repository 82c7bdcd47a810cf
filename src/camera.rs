//! Camera model and the view-plane span it projects through.

use glam::Vec3A;

/// Pinhole camera: a position, a unit view direction, and the distance from
/// the position to the view plane.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3A,
    /// Distance from the position to the view plane.
    pub focal_length: f32,
    // Unit length, maintained by set_direction.
    direction: Vec3A,
}

impl Camera {
    /// Create a camera at `position` looking along `direction`.
    ///
    /// # Panics
    /// Panics if `direction` has zero length.
    pub fn new(position: Vec3A, direction: Vec3A, focal_length: f32) -> Self {
        let mut camera = Self {
            position,
            focal_length,
            direction: Vec3A::NEG_Z,
        };
        camera.set_direction(direction);
        camera
    }

    /// Unit view direction.
    pub fn direction(&self) -> Vec3A {
        self.direction
    }

    /// Point the camera along `direction`, re-normalizing it.
    ///
    /// # Panics
    /// Panics if `direction` has zero length.
    pub fn set_direction(&mut self, direction: Vec3A) {
        assert!(
            direction.length_squared() != 0.0,
            "camera direction must have nonzero length"
        );
        self.direction = direction.normalize();
    }

    /// Right-handed `[right, up, forward]` view basis.
    ///
    /// `forward` points behind the camera (opposite the view direction).
    /// Near-vertical view directions get a fixed basis, since the cross
    /// product with world-up degenerates there.
    pub fn axes(&self) -> [Vec3A; 3] {
        // Looking straight up
        if self.direction.y > 0.999 {
            [Vec3A::X, Vec3A::NEG_Z, Vec3A::Y]
        }
        // Looking straight down
        else if self.direction.y < -0.999 {
            [Vec3A::X, Vec3A::Z, Vec3A::NEG_Y]
        }
        // Any other direction
        else {
            let right = self.direction.cross(Vec3A::Y);
            let up = right.cross(self.direction);
            [right, up, -self.direction]
        }
    }
}

/// Extent of the visible frustum on the view plane, in camera-plane units at
/// the focal distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSpan {
    /// Left edge.
    pub left: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Top edge.
    pub top: f32,
}

impl CameraSpan {
    /// Symmetric span matching a `width` x `height` pixel grid:
    /// `[-aspect, +aspect]` horizontally, `[-1, +1]` vertically.
    pub fn aspect(width: u32, height: u32) -> Self {
        let ratio = width as f32 / height as f32;
        Self {
            left: -ratio,
            right: ratio,
            bottom: -1.0,
            top: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let camera = Camera::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -10.0), 1.0);
        assert!((camera.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn zero_direction_is_rejected() {
        Camera::new(Vec3A::ZERO, Vec3A::ZERO, 1.0);
    }

    #[test]
    fn axes_are_mutually_orthogonal() {
        let camera = Camera::new(Vec3A::ZERO, Vec3A::new(0.3, -0.5, -1.0), 1.0);
        let [right, up, forward] = camera.axes();
        assert!(right.dot(up).abs() < 1e-6);
        assert!(right.dot(forward).abs() < 1e-6);
        assert!(up.dot(forward).abs() < 1e-6);
    }

    #[test]
    fn near_vertical_directions_keep_a_usable_basis() {
        let directions = [
            Vec3A::Y,
            Vec3A::NEG_Y,
            Vec3A::new(1e-4, 1.0, 0.0),
            Vec3A::new(0.0, -1.0, 1e-4),
        ];
        for direction in directions {
            let camera = Camera::new(Vec3A::ZERO, direction, 1.0);
            for axis in camera.axes() {
                assert!(axis.is_finite());
                assert!(axis.length() > 0.5);
            }
        }
    }

    #[test]
    fn default_span_matches_aspect_ratio() {
        let span = CameraSpan::aspect(200, 100);
        assert_eq!(span.left, -2.0);
        assert_eq!(span.right, 2.0);
        assert_eq!(span.bottom, -1.0);
        assert_eq!(span.top, 1.0);
    }
}
