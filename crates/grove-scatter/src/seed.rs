//! Seeded randomness for population runs.
//!
//! A run draws every random number from a single `ChaCha8Rng`. Supplying the
//! same seed, mesh, registry, and density reproduces the same scene on every
//! platform; trigonometry goes through `libm` for the same reason.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The random source used by a population run.
pub type ScatterRng = ChaCha8Rng;

/// Build the run RNG from a seed.
pub fn scatter_rng(seed: u64) -> ScatterRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Use the caller's seed, or draw a fresh one from OS entropy.
///
/// The chosen seed is logged so an unseeded run can be replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Scatter seed");
    seed
}

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}
