//! Random source for measurement sampling

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the generator used for measurement outcomes
///
/// A fixed seed gives reproducible outcome sequences; `None` seeds from
/// system entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
