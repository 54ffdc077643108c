use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{TERRAIN_BASE_FREQUENCY, TREE_FREQUENCY, TREE_THRESHOLD, WATER_THRESHOLD};
use crate::grid::{TileKind, WorldGrid};

/// Fills elevation and lays down water and forest. Only bare land is
/// touched, so running it on an edited map keeps the edits.
pub fn generate_terrain(grid: &mut WorldGrid, seed: i32) {
    let mut elevation_noise = FastNoiseLite::with_seed(seed);
    elevation_noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    elevation_noise.set_frequency(Some(TERRAIN_BASE_FREQUENCY));

    let mut tree_noise = FastNoiseLite::with_seed(seed.wrapping_add(1));
    tree_noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    tree_noise.set_frequency(Some(TREE_FREQUENCY));

    for y in 0..grid.height {
        for x in 0..grid.width {
            let raw = elevation_noise.get_noise_2d(x as f32, y as f32);
            let elevation = ((raw + 1.0) * 0.5).clamp(0.0, 1.0);
            let forest = (tree_noise.get_noise_2d(x as f32, y as f32) + 1.0) * 0.5;
            let Some(tile) = grid.get_mut(x, y) else {
                continue;
            };
            tile.elevation = elevation;
            if tile.kind != TileKind::Land {
                continue;
            }
            if elevation < WATER_THRESHOLD {
                tile.kind = TileKind::Water;
            } else if forest > TREE_THRESHOLD {
                tile.kind = TileKind::Tree;
            }
        }
    }
    grid.tile_revision += 1;
}
