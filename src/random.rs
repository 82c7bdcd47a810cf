//! Thread-local random sampling for the tracer.

use std::cell::RefCell;

use glam::Vec3A;
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

thread_local! {
    /// Per-thread ChaCha20 PRNG; no locking on the render path.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Random f32 in [0, 1).
pub fn random_f32() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Random f32 in [min, max).
pub fn random_f32_range(min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32()
}

/// Random jitter vector with each component in [-1, 1), used to roughen
/// mirror reflections.
pub fn jitter_cube() -> Vec3A {
    Vec3A::new(
        random_f32_range(-1.0, 1.0),
        random_f32_range(-1.0, 1.0),
        random_f32_range(-1.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranged_samples_stay_in_range() {
        for _ in 0..1000 {
            let x = random_f32_range(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&x));
        }
    }

    #[test]
    fn jitter_components_stay_in_the_cube() {
        for _ in 0..1000 {
            let jitter = jitter_cube();
            for component in [jitter.x, jitter.y, jitter.z] {
                assert!((-1.0..1.0).contains(&component));
            }
        }
    }
}
