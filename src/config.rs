//! Engine constants, host settings and the demo level.

use std::path::PathBuf;

use crate::color::Color;
use crate::scene::{Scene, Tile};

/// Horizontal field of view, radians.
pub const FOV: f64 = std::f64::consts::FRAC_PI_2;
pub const NEAR_CLIPPING_PLANE: f64 = 0.25;
pub const FAR_CLIPPING_PLANE: f64 = 10.0;
/// Rays per frame, independent of the canvas width.
pub const SCREEN_SAMPLES: usize = 300;

/// Units per second.
pub const PLAYER_SPEED: f64 = 2.0;
/// Radians per second.
pub const PLAYER_TURN_SPEED: f64 = std::f64::consts::PI * 0.75;
/// Side of the collision footprint square.
pub const PLAYER_SIZE: f64 = 0.5;

/// Tile used when a texture fails to load.
pub const FALLBACK_COLOR: Color = Color::MAGENTA;

/// Host settings. Engine geometry stays in the constants above.
#[derive(Clone, Debug)]
pub struct Config {
    /// Initial window size in logical pixels
    pub window_width: f64,
    pub window_height: f64,
    /// Height of the internal canvas; width follows the window aspect
    pub render_height: usize,

    pub ceiling_color: Color,
    pub floor_color: Color,

    /// Minimap offset as a fraction of the canvas size
    pub minimap_offset: f64,
    /// Minimap cell edge as a fraction of the canvas width
    pub minimap_cell: f64,

    /// Where player state is persisted
    pub save_path: PathBuf,
    pub asset_dir: PathBuf,
    pub wall_textures: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 16.0 * 60.0,
            window_height: 9.0 * 60.0,
            render_height: 360,

            ceiling_color: Color::hex(0x202020),
            floor_color: Color::hex(0x383838),

            minimap_offset: 0.03,
            minimap_cell: 0.03,

            save_path: PathBuf::from("player_state.json"),
            asset_dir: PathBuf::from("assets"),
            wall_textures: vec!["wall1.png".into(), "wall2.png".into()],
        }
    }
}

/// The demo level. `textures` fill the `T`/`U` slots and should already
/// hold the fallback tile for anything that failed to load.
pub fn default_scene(textures: &[Tile]) -> Scene {
    let texture = |i: usize| textures.get(i).cloned().unwrap_or(Tile::Flat(FALLBACK_COLOR));
    let layout = [
        "##########",
        "#........#",
        "#..T.....#",
        "#..TU..r.#",
        "#........#",
        "#...b....#",
        "#........#",
        "#..g.....#",
        "#........#",
        "##########",
    ];
    let rows = layout
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    '#' => Tile::Flat(Color::hex(0x6a6a6a)),
                    'r' => Tile::Flat(Color::hex(0xc03030)),
                    'g' => Tile::Flat(Color::hex(0x30c030)),
                    'b' => Tile::Flat(Color::hex(0x3050c0)),
                    'T' => texture(0),
                    'U' => texture(1),
                    _ => Tile::Empty,
                })
                .collect()
        })
        .collect();
    Scene::new(rows)
}
