//! The recursive tracer and the single-pass render loop.

use glam::Vec3A;

use crate::camera::{Camera, CameraSpan};
use crate::material::RgbColor;
use crate::random;
use crate::ray::Ray;
use crate::scene::SceneQuery;
use crate::screen::Screen;

/// Color returned when a ray escapes the scene or the depth bound.
pub const BACKGROUND: RgbColor = Vec3A::ZERO;

// Step a secondary ray off the surface it starts from, so it cannot
// immediately re-intersect it.
const SURFACE_OFFSET: f32 = 0.01;

/// Caller-supplied bounds on the recursive trace.
#[derive(Debug, Clone, Copy)]
pub struct TraceSettings {
    /// Maximum recursive bounce count before a ray terminates with the
    /// background color.
    pub max_depth: u32,
    /// Number of stochastic secondary rays sampled per reflective bounce.
    ///
    /// Worst-case cost per pixel grows as `branch_factor ^ max_depth`, which
    /// is why parallelism is applied per frame band rather than per ray.
    pub branch_factor: u32,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_depth: 4,
            branch_factor: 3,
        }
    }
}

/// Trace one ray through the scene and return its color.
///
/// Start the recursion with `depth = 0`. The nearest hit is shaded with a
/// Lambert-like term against the ray itself, then `branch_factor` jittered
/// mirror reflections are accumulated while the depth bound allows. A miss
/// is [`BACKGROUND`], never an error.
pub fn trace<S>(ray: &Ray, scene: &S, settings: TraceSettings, depth: u32) -> RgbColor
where
    S: SceneQuery + ?Sized,
{
    if depth > settings.max_depth {
        return BACKGROUND;
    }

    let Some(hit) = scene.find_first_hit(ray) else {
        return BACKGROUND;
    };

    let material = hit.object.appearance.material_at(hit.position);
    let normal = hit.object.shape.normal_at(hit.position);
    let intensity = -ray.direction.dot(normal);
    let mut color = intensity * material.color * 0.8;

    if depth + 1 <= settings.max_depth {
        for _ in 0..settings.branch_factor {
            let jitter = random::jitter_cube();
            let reflected = ray.direction - 2.0 * ray.direction.dot(normal) * normal;
            let direction = (material.roughness * jitter + reflected).normalize();
            let secondary = Ray::new(hit.position + direction * SURFACE_OFFSET, direction);

            let secondary_color = trace(&secondary, scene, settings, depth + 1);
            color += material.reflectivity * secondary_color / settings.branch_factor as f32;
        }
    }

    color.clamp(Vec3A::ZERO, Vec3A::ONE)
}

/// Render the whole screen in one pass on the calling thread.
///
/// Maps each pixel linearly across `span` (defaulting to the
/// aspect-corrected symmetric span), builds its primary ray from the camera
/// basis, and writes the traced color. Pixel row 0 is the bottom of the
/// span.
pub fn render<S, T>(
    scene: &S,
    screen: &mut T,
    camera: &Camera,
    span: Option<CameraSpan>,
    settings: TraceSettings,
) where
    S: SceneQuery + ?Sized,
    T: Screen + ?Sized,
{
    let screen_w = screen.width();
    let screen_h = screen.height();
    let span = span.unwrap_or_else(|| CameraSpan::aspect(screen_w, screen_h));
    let x_scale = span.right - span.left;
    let y_scale = span.top - span.bottom;

    let origin = camera.position;
    let [right, up, forward] = camera.axes();

    for y in 0..screen_h {
        for x in 0..screen_w {
            let u = span.left + x_scale * x as f32 / screen_w as f32;
            let v = span.bottom + y_scale * y as f32 / screen_h as f32;
            let direction = (right * u + up * v - forward * camera.focal_length).normalize();
            let ray = Ray::new(origin, direction);

            screen.put_pixel(x, y, trace(&ray, scene, settings, 0));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::geometry::Shape;
    use crate::material::{Appearance, Material};
    use crate::scene::{BasicScene, Hit, Object};
    use crate::screen::SwScreen;

    /// Wraps a scene and counts how many first-hit queries are issued.
    struct CountingScene {
        inner: BasicScene,
        queries: AtomicU32,
    }

    impl CountingScene {
        fn new(inner: BasicScene) -> Self {
            Self {
                inner,
                queries: AtomicU32::new(0),
            }
        }
    }

    impl SceneQuery for CountingScene {
        fn find_first_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
            self.queries.fetch_add(1, Ordering::Relaxed);
            self.inner.find_first_hit(ray)
        }
    }

    fn one_sphere(color: Vec3A, reflectivity: f32, roughness: f32) -> BasicScene {
        BasicScene::with_objects(vec![Object {
            shape: Shape::Sphere {
                center: Vec3A::new(0.0, 0.0, -5.0),
                radius: 1.0,
            },
            appearance: Appearance::Solid(Material {
                color,
                reflectivity,
                roughness,
            }),
        }])
    }

    fn primary_ray() -> Ray {
        Ray::new(Vec3A::ZERO, Vec3A::NEG_Z)
    }

    #[test]
    fn zero_depth_never_issues_secondary_rays() {
        let scene = CountingScene::new(one_sphere(Vec3A::ONE, 1.0, 0.5));
        let settings = TraceSettings {
            max_depth: 0,
            branch_factor: 7,
        };

        trace(&primary_ray(), &scene, settings, 0);
        assert_eq!(scene.queries.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn depth_one_issues_exactly_branch_factor_secondaries() {
        let scene = CountingScene::new(one_sphere(Vec3A::ONE, 1.0, 0.0));
        let settings = TraceSettings {
            max_depth: 1,
            branch_factor: 3,
        };

        // One primary query plus one per secondary sample; the mirrored
        // secondaries leave the sphere and miss, ending the recursion.
        trace(&primary_ray(), &scene, settings, 0);
        assert_eq!(scene.queries.load(Ordering::Relaxed), 1 + 3);
    }

    #[test]
    fn traced_colors_stay_in_unit_range() {
        // Overdriven material color and full reflectivity: clamping must
        // still hold on every sample.
        let scene = one_sphere(Vec3A::new(5.0, 3.0, 2.0), 1.0, 0.9);
        let settings = TraceSettings {
            max_depth: 3,
            branch_factor: 4,
        };

        for _ in 0..10 {
            let color = trace(&primary_ray(), &scene, settings, 0);
            for channel in [color.x, color.y, color.z] {
                assert!((0.0..=1.0).contains(&channel), "channel {channel} escaped [0, 1]");
            }
        }
    }

    #[test]
    fn miss_returns_background() {
        let scene = BasicScene::new();
        let color = trace(&primary_ray(), &scene, TraceSettings::default(), 0);
        assert_eq!(color, BACKGROUND);
    }

    #[test]
    fn head_on_hit_shades_with_the_direct_term() {
        let scene = one_sphere(Vec3A::new(0.9, 0.5, 0.1), 0.0, 0.0);
        let color = trace(&primary_ray(), &scene, TraceSettings::default(), 0);
        // Intensity is 1 head-on, so the direct term is 0.8 * color.
        assert!((color - Vec3A::new(0.9, 0.5, 0.1) * 0.8).length() < 1e-5);
    }

    #[test]
    fn render_writes_scene_pixels() {
        let scene = one_sphere(Vec3A::new(0.9, 0.5, 0.1), 0.2, 0.0);
        let camera = Camera::new(Vec3A::ZERO, Vec3A::NEG_Z, 1.0);
        let mut screen = SwScreen::new(8, 6);

        render(&scene, &mut screen, &camera, None, TraceSettings::default());

        // The center pixel looks straight at the sphere.
        assert!(screen.pixel(4, 3) != Vec3A::ZERO);
        // A corner pixel looks past it.
        assert_eq!(screen.pixel(0, 0), BACKGROUND);
    }
}
