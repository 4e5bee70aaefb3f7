use crate::color::Color;
use crate::player::Player;
use crate::scene::{Scene, Tile};
use crate::surface::{Rect, Surface};
use crate::vector::Vector2;

const BACKGROUND: Color = Color::hex(0x181818);
const GRID_COLOR: Color = Color::hex(0x303030);
/// Grid line width in cells, so it scales with the minimap.
const GRID_LINE_WIDTH: f64 = 0.05;
const PLAYER_RADIUS: f64 = 0.2;

/// Top-down view of `scene` fitted into the `position`/`size` rectangle.
pub fn render_minimap(
    surface: &mut dyn Surface,
    scene: &Scene,
    player: &Player,
    position: Vector2,
    size: Vector2,
) {
    let grid = scene.size();
    if grid.x == 0.0 || grid.y == 0.0 {
        return;
    }

    surface.save();
    surface.translate(position.x, position.y);
    let scale = size.div(grid);
    surface.scale(scale.x, scale.y);

    surface.fill_rect(Rect::new(0.0, 0.0, grid.x, grid.y), BACKGROUND);
    for (cell, tile) in scene.tiles() {
        let dst = Rect::new(cell.x, cell.y, 1.0, 1.0);
        match tile {
            Tile::Empty => {}
            Tile::Flat(color) => surface.fill_rect(dst, *color),
            Tile::Textured(texture) => {
                let src = Rect::new(0.0, 0.0, texture.width as f64, texture.height as f64);
                surface.draw_image(texture, src, dst);
            }
        }
    }

    for x in 0..=scene.width() {
        let x = x as f64;
        surface.stroke_line(Vector2::new(x, 0.0), Vector2::new(x, grid.y), GRID_LINE_WIDTH, GRID_COLOR);
    }
    for y in 0..=scene.height() {
        let y = y as f64;
        surface.stroke_line(Vector2::new(0.0, y), Vector2::new(grid.x, y), GRID_LINE_WIDTH, GRID_COLOR);
    }

    surface.fill_circle(player.position, PLAYER_RADIUS, Color::MAGENTA);
    let (r1, r2) = player.fov_range();
    surface.stroke_line(r1, r2, GRID_LINE_WIDTH, Color::MAGENTA);
    surface.stroke_line(player.position, r1, GRID_LINE_WIDTH, Color::MAGENTA);
    surface.stroke_line(player.position, r2, GRID_LINE_WIDTH, Color::MAGENTA);

    surface.restore();
}
