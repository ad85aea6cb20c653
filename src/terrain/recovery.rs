//! Relaxation of deformed terrain back toward its baseline.

use crate::config::TerrainConfig;
use crate::terrain::chunk::ChunkStore;

/// One recovery pass over every loaded chunk.
///
/// Each cell takes an exponential step toward baseline: the step is a
/// fraction of the *remaining* deviation, so it converges without ever
/// overshooting as long as the fraction stays at or below 1 — which the
/// clamp below guarantees for any `recovery_rate * dt`. Hardness recovers at
/// half the elevation rate; churned mud firms up slower than ruts fill in.
pub fn relax(store: &mut ChunkStore, config: &TerrainConfig, dt: f32) {
    let height_step = (config.recovery_rate * dt).clamp(0.0, 1.0);
    let hardness_step = (config.recovery_rate * 0.5 * dt).clamp(0.0, 1.0);
    if height_step == 0.0 && hardness_step == 0.0 {
        return;
    }

    for (_, chunk) in store.iter_mut() {
        for i in 0..chunk.height.len() {
            chunk.height[i] += (chunk.base[i] - chunk.height[i]) * height_step;
            chunk.hardness[i] += (config.target_hardness - chunk.hardness[i]) * hardness_step;
        }
    }
}
