//! Random targets and base families.

use rand::seq::index::sample;
use rand::Rng;

use super::config::GeneratorConfig;
use crate::domain::Bitset;
use crate::error::Result;

/// `size` distinct elements drawn uniformly from `0..universe_size`.
fn random_subset<R: Rng>(universe_size: usize, size: usize, rng: &mut R) -> Bitset {
    let mut set = Bitset::empty();
    for element in sample(rng, universe_size, size).iter() {
        set.insert(element);
    }
    set
}

/// Draws a target set.
///
/// The size is uniform in `[target_size_min, universe_size]`.
///
/// # Errors
/// `InvalidConfig` if `config` fails validation.
pub fn generate_target<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Bitset> {
    config.validate()?;
    let size = rng.random_range(config.target_size_min..=config.universe_size);
    Ok(random_subset(config.universe_size, size, rng))
}

/// Draws a base family.
///
/// The family size is uniform in `[family_min, family_max]` and each set
/// size uniform in `[set_size_min, set_size_max]`. Sets are drawn
/// independently, so two of them may coincide.
///
/// # Errors
/// `InvalidConfig` if `config` fails validation.
///
/// # Example
///
/// ```
/// use u_setexpr::generator::{generate_family, GeneratorConfig};
/// use u_setexpr::random::create_rng;
///
/// let config = GeneratorConfig::default();
/// let family = generate_family(&config, &mut create_rng(1030)).unwrap();
/// assert!((6..=10).contains(&family.len()));
/// assert!(family.iter().all(|f| (10..=80).contains(&f.len())));
/// ```
pub fn generate_family<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Vec<Bitset>> {
    config.validate()?;
    let count = rng.random_range(config.family_min..=config.family_max);
    Ok((0..count)
        .map(|_| {
            let size = rng.random_range(config.set_size_min..=config.set_size_max);
            random_subset(config.universe_size, size, rng)
        })
        .collect())
}
