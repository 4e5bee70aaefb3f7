//! Texture loading. Runs once before the frame loop; nothing here is
//! touched while ticking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::pack_rgb;
use crate::config::FALLBACK_COLOR;
use crate::error::AssetError;
use crate::scene::{Texture, Tile};

pub fn decode_texture(path: &Path, bytes: &[u8]) -> Result<Texture, AssetError> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let pixels = img.pixels().map(|p| pack_rgb(p[0], p[1], p[2])).collect();
    Ok(Texture {
        width,
        height,
        pixels,
    })
}

/// Reads and decodes one texture. The read itself is blocking; the future is
/// joined with `pollster::block_on` before the frame loop starts, so nothing
/// waits on it while ticking.
pub async fn load_texture(path: PathBuf) -> Result<Texture, AssetError> {
    let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
        path: path.clone(),
        source,
    })?;
    decode_texture(&path, &bytes)
}

/// Textured tile on success, the flat fallback tile otherwise.
pub fn tile_or_fallback(result: Result<Texture, AssetError>) -> Tile {
    match result {
        Ok(texture) => Tile::Textured(Arc::new(texture)),
        Err(e) => {
            log::warn!("{e}, using fallback color");
            Tile::Flat(FALLBACK_COLOR)
        }
    }
}

/// Loads every texture in order; failures become fallback tiles.
pub async fn load_wall_tiles(dir: &Path, names: &[String]) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(name);
        let result = load_texture(path.clone()).await;
        if let Ok(texture) = &result {
            log::info!(
                "Loaded texture {} ({}x{})",
                path.display(),
                texture.width,
                texture.height
            );
        }
        tiles.push(tile_or_fallback(result));
    }
    tiles
}
