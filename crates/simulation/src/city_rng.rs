//! Deterministic random source for city generation.
//!
//! Wraps `ChaCha8Rng` so the same seed produces the same layout on every
//! platform. The seed is read from `CITYDRIVE_SEED` when present.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SEED_ENV;

/// Seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// Seeded RNG resource consumed by `generate`.
///
/// Systems that need randomness take `ResMut<CityRng>` and pass `&mut rng.rng`
/// to the generator.
#[derive(Resource)]
pub struct CityRng {
    pub seed: u64,
    pub rng: ChaCha8Rng,
}

impl Default for CityRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl CityRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from `CITYDRIVE_SEED`, falling back to [`DEFAULT_SEED`].
    pub fn from_env() -> Self {
        match std::env::var(SEED_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(seed) => Self::from_seed_u64(seed),
                Err(e) => {
                    warn!(
                        "CityRng: {}={:?} is not a u64 ({}), using default seed {}",
                        SEED_ENV, raw, e, DEFAULT_SEED
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
