use noise::{NoiseFn, Perlin};

/// Low-frequency wetness field producing broad mud patches.
pub struct MudmapGenerator {
    noise: Perlin,
    frequency: f64,
}

impl MudmapGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            frequency: 0.05,
        }
    }

    /// Wetness at a world-space point, in `[0, 1]`.
    pub fn sample(&self, x: f64, z: f64) -> f32 {
        let value = self.noise.get([x * self.frequency, z * self.frequency]) as f32;
        (value * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}
