//! Random color generation
//!
//! Every function takes the random source explicitly so callers can seed it.

use rand::Rng;

use super::Rgb;

/// Attempts made by [`similar_color`] before falling back to a random color.
pub const SIMILAR_COLOR_MAX_ATTEMPTS: usize = 100;

/// Uniformly random color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::from_channels(rng.gen(), rng.gen(), rng.gen())
}

/// Color within `max_distance` of `base`.
///
/// Each channel is perturbed by up to `floor(max_distance / sqrt(3))` and
/// clamped to the valid range; candidates farther than `max_distance` are
/// discarded. After [`SIMILAR_COLOR_MAX_ATTEMPTS`] misses this returns a fully
/// random color, which may be farther away than requested.
pub fn similar_color<R: Rng + ?Sized>(base: &Rgb, max_distance: f64, rng: &mut R) -> Rgb {
    let bound = perturbation_bound(max_distance);

    for _ in 0..SIMILAR_COLOR_MAX_ATTEMPTS {
        let candidate = Rgb::from_channels(
            perturb(base.r(), bound, rng),
            perturb(base.g(), bound, rng),
            perturb(base.b(), bound, rng),
        );
        if base.distance(&candidate) <= max_distance {
            return candidate;
        }
    }

    tracing::warn!(
        base = %base,
        max_distance,
        "no similar color found, falling back to a random color"
    );
    random_color(rng)
}

fn perturbation_bound(max_distance: f64) -> i32 {
    if !max_distance.is_finite() || max_distance <= 0.0 {
        return 0;
    }
    (max_distance / 3f64.sqrt()).floor().min(255.0) as i32
}

fn perturb<R: Rng + ?Sized>(channel: u8, bound: i32, rng: &mut R) -> u8 {
    let offset = if bound > 0 {
        rng.gen_range(-bound..=bound)
    } else {
        0
    };
    (i32::from(channel) + offset).clamp(0, 255) as u8
}
