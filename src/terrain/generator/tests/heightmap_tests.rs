use crate::config::TerrainConfig;
use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::{HeightmapGenerator, TerrainGenerator};
use approx::assert_relative_eq;
use test_case::test_case;

#[test]
fn generation_dimensions() {
    let config = TerrainConfig::default();
    let generator = TerrainGenerator::new(42);
    let (base, hardness, mud) = generator.generate(ChunkCoords { x: 0, z: 0 }, &config);

    assert_eq!(base.len(), config.cells());
    assert_eq!(hardness.len(), config.cells());
    assert_eq!(mud.len(), config.cells());
}

#[test]
fn height_range() {
    let config = TerrainConfig::default();
    let generator = TerrainGenerator::new(42);
    let (base, _, _) = generator.generate(ChunkCoords { x: 0, z: 0 }, &config);

    let range = HeightmapGenerator::height_range();
    for height in base {
        assert!(height >= -range);
        assert!(height <= range);
    }
}

#[test_case(1, 0)]
#[test_case(0, 1)]
#[test_case(-1, -1)]
fn chunk_position_affects_heights(x: i32, z: i32) {
    let config = TerrainConfig::default();
    let generator = TerrainGenerator::new(42);

    let (base1, _, _) = generator.generate(ChunkCoords { x: 0, z: 0 }, &config);
    let (base2, _, _) = generator.generate(ChunkCoords { x, z }, &config);

    assert!(
        base1 != base2,
        "heights should differ for different chunk positions"
    );
}

#[test]
fn height_continuity_across_chunk_seam() {
    let config = TerrainConfig::default();
    let generator = TerrainGenerator::new(42);
    let res = config.resolution;

    let (base1, _, _) = generator.generate(ChunkCoords { x: 0, z: 0 }, &config);
    let (base2, _, _) = generator.generate(ChunkCoords { x: 1, z: 0 }, &config);

    // The last column of chunk (0,0) and the first column of chunk (1,0) are
    // one cell step apart; the field must not jump across the seam.
    for z in 0..res {
        let h1 = base1[z * res + (res - 1)];
        let h2 = base2[z * res];
        assert_relative_eq!(h1, h2, epsilon = 1.0);
    }
}

#[test]
fn seed_determinism() {
    let config = TerrainConfig::default();
    let coord = ChunkCoords { x: 3, z: -2 };

    let (base1, hard1, mud1) = TerrainGenerator::new(42).generate(coord, &config);
    let (base2, hard2, mud2) = TerrainGenerator::new(42).generate(coord, &config);

    assert_eq!(base1, base2, "same seed must produce identical heights");
    assert_eq!(hard1, hard2);
    assert_eq!(mud1, mud2);
}

#[test]
fn different_seeds_diverge() {
    let config = TerrainConfig::default();
    let coord = ChunkCoords { x: 0, z: 0 };

    let (base1, _, _) = TerrainGenerator::new(42).generate(coord, &config);
    let (base2, _, _) = TerrainGenerator::new(43).generate(coord, &config);

    assert!(base1 != base2);
}

#[test]
fn cell_samples_match_point_queries() {
    // generate() must agree with baseline_height() at every cell so that
    // sampling defaults for unloaded regions line up with loaded chunks.
    let config = TerrainConfig::default();
    let generator = TerrainGenerator::new(42);
    let coord = ChunkCoords { x: -1, z: 2 };
    let (base, _, _) = generator.generate(coord, &config);

    let origin = coord.world_origin(config.chunk_size);
    let step = config.cell_step();
    for z in [0usize, 7, config.resolution - 1] {
        for x in [0usize, 13, config.resolution - 1] {
            let expected =
                generator.baseline_height(origin.x + x as f32 * step, origin.z + z as f32 * step);
            assert_relative_eq!(base[z * config.resolution + x], expected);
        }
    }
}
