//! Grid ray-casting engine: exact grid-line ray marching, a fisheye-free
//! strip renderer and a top-down minimap over a tile grid.

pub mod assets;
pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod minimap;
pub mod persist;
pub mod player;
pub mod raymarch;
pub mod renderer;
pub mod scaler;
pub mod scene;
pub mod surface;
pub mod vector;
