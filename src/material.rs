//! Surface materials and procedural appearances.

use glam::Vec3A;

/// RGB color with channels nominally in [0, 1].
pub type RgbColor = Vec3A;

/// Shading inputs for one surface point.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Base surface color.
    pub color: RgbColor,
    /// Fraction of reflected light mixed into the shading, in [0, 1] by
    /// convention.
    pub reflectivity: f32,
    /// Scale of the reflection jitter; 0 is a perfect mirror.
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3A::new(0.8, 0.8, 0.8),
            reflectivity: 0.2,
            roughness: 0.0,
        }
    }
}

/// How an object's surface looks, point by point.
///
/// A closed set of appearance kinds, evaluated by pattern match. Spatially
/// varying looks carry their own reference frame instead of reaching back
/// into the object's geometry.
#[derive(Debug, Clone)]
pub enum Appearance {
    /// The same material over the whole surface.
    Solid(Material),
    /// Sinusoidal color bands stacked along the world y axis.
    Stripes {
        /// Point the bands are measured from.
        origin: Vec3A,
        /// Angular frequency of the bands per unit of height.
        frequency: f32,
        /// Color at the crest of a band.
        crest: RgbColor,
        /// Color at the trough of a band.
        trough: RgbColor,
        /// Reflectivity shared by all bands.
        reflectivity: f32,
        /// Roughness shared by all bands.
        roughness: f32,
    },
}

impl Appearance {
    /// Material at `point` (absolute coordinates) on the surface.
    pub fn material_at(&self, point: Vec3A) -> Material {
        match self {
            Appearance::Solid(material) => *material,
            Appearance::Stripes {
                origin,
                frequency,
                crest,
                trough,
                reflectivity,
                roughness,
            } => {
                let phase = 0.5 + 0.5 * ((point.y - origin.y) * frequency).sin();
                Material {
                    color: trough.lerp(*crest, phase),
                    reflectivity: *reflectivity,
                    roughness: *roughness,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_is_uniform() {
        let appearance = Appearance::Solid(Material {
            color: Vec3A::new(0.1, 0.2, 0.3),
            reflectivity: 0.5,
            roughness: 0.25,
        });

        let a = appearance.material_at(Vec3A::ZERO);
        let b = appearance.material_at(Vec3A::new(10.0, -3.0, 7.0));
        assert_eq!(a.color, b.color);
        assert_eq!(a.reflectivity, 0.5);
        assert_eq!(a.roughness, 0.25);
    }

    #[test]
    fn stripes_oscillate_between_both_colors() {
        let appearance = Appearance::Stripes {
            origin: Vec3A::ZERO,
            frequency: std::f32::consts::PI,
            crest: Vec3A::new(1.0, 0.0, 0.0),
            trough: Vec3A::new(0.0, 0.0, 1.0),
            reflectivity: 0.8,
            roughness: 0.0,
        };

        // sin(pi * 0.5) = 1 -> crest, sin(pi * 1.5) = -1 -> trough.
        let crest = appearance.material_at(Vec3A::new(0.0, 0.5, 0.0));
        let trough = appearance.material_at(Vec3A::new(0.0, 1.5, 0.0));
        assert!((crest.color - Vec3A::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert!((trough.color - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }
}
