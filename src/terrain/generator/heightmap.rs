use noise::{NoiseFn, Perlin};

/// Peak-to-baseline range of the generated elevation field.
const HEIGHT_RANGE: f32 = 8.0;

/// Layered-Perlin elevation field.
pub struct HeightmapGenerator {
    noise: Perlin,
    base_frequency: f64,
    octaves: usize,
    persistence: f64,
    lacunarity: f64,
}

impl HeightmapGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            base_frequency: 0.01,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    /// Elevation at a world-space point, in `[-HEIGHT_RANGE, HEIGHT_RANGE]`.
    pub fn sample(&self, x: f64, z: f64) -> f32 {
        let mut amplitude = 1.0;
        let mut frequency = self.base_frequency;
        let mut noise_height = 0.0;
        let mut max_value = 0.0;

        for _ in 0..self.octaves {
            let sample_x = x * frequency;
            let sample_z = z * frequency;

            let perlin_value = self.noise.get([sample_x, sample_z]);
            noise_height += perlin_value * amplitude;

            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        let normalized = (noise_height / max_value) as f32;
        normalized * HEIGHT_RANGE
    }

    pub fn height_range() -> f32 {
        HEIGHT_RANGE
    }
}
