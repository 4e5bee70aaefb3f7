use std::sync::Arc;

use crate::color::Color;
use crate::vector::Vector2;

/// Decoded image, row-major packed pixels (see [`crate::color::pack_rgb`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Tile {
    #[default]
    Empty,
    Flat(Color),
    Textured(Arc<Texture>),
}

impl Tile {
    pub fn is_solid(&self) -> bool {
        !matches!(self, Tile::Empty)
    }
}

/// Rectangular tile grid, stored flat and indexed `y * width + x`.
#[derive(Debug, Clone)]
pub struct Scene {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Scene {
    /// Width is the longest row; shorter rows are padded with [`Tile::Empty`].
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Tile::Empty);
            tiles.extend(row);
        }
        Self {
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Vector2 {
        Vector2::new(self.width as f64, self.height as f64)
    }

    /// `true` when the continuous point lies in `[0, width) x [0, height)`.
    pub fn contains(&self, p: Vector2) -> bool {
        0.0 <= p.x && p.x < self.width as f64 && 0.0 <= p.y && p.y < self.height as f64
    }

    /// Tile under an integer cell, `None` outside the grid.
    pub fn get_tile(&self, cell: Vector2) -> Option<&Tile> {
        if !self.contains(cell) {
            return None;
        }
        let (x, y) = (cell.x.floor() as usize, cell.y.floor() as usize);
        self.tiles.get(y * self.width + x)
    }

    /// Out-of-bounds cells are not solid.
    pub fn is_solid(&self, cell: Vector2) -> bool {
        self.get_tile(cell).is_some_and(Tile::is_solid)
    }

    /// Every tile with its cell coordinate, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Vector2, &Tile)> + '_ {
        let width = self.width.max(1);
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let cell = Vector2::new((i % width) as f64, (i / width) as f64);
            (cell, tile)
        })
    }
}
