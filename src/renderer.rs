use crate::color::Color;
use crate::config::{Config, SCREEN_SAMPLES};
use crate::minimap::render_minimap;
use crate::player::Player;
use crate::raymarch::{EPS, cast_ray};
use crate::scene::{Scene, Tile};
use crate::surface::{Rect, Surface};
use crate::vector::Vector2;

/// One sampled ray that struck a wall.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub tile: &'a Tile,
    /// Depth along the view direction, not Euclidean distance
    pub distance: f64,
    /// Horizontal texture coordinate in `[0, 1]`
    pub u: f64,
}

/// Texture coordinate along the face of `cell` that `point` lies on.
///
/// A point on a vertical grid line samples by its y fraction, anything
/// else by its x fraction. Near a cell corner both fractions are within
/// `EPS` of an edge and the vertical-line reading wins.
pub fn texture_u(point: Vector2, cell: Vector2) -> f64 {
    let t = point - cell;
    if t.x.abs() < EPS || (t.x - 1.0).abs() < EPS {
        t.y
    } else {
        t.x
    }
}

/// Casts `samples` rays spread linearly across the near plane.
pub fn sample_columns<'a>(scene: &'a Scene, player: &Player, samples: usize) -> Vec<Option<Column<'a>>> {
    let (r1, r2) = player.fov_range();
    let forward = player.forward();
    (0..samples)
        .map(|x| {
            let target = r1.lerp(r2, x as f64 / samples as f64);
            let hit = cast_ray(scene, player.position, target);
            let tile = hit.tile?;
            let distance = (hit.point - player.position).dot(forward);
            if distance <= 0.0 {
                return None;
            }
            Some(Column {
                tile,
                distance,
                u: texture_u(hit.point, hit.cell).clamp(0.0, 1.0),
            })
        })
        .collect()
}

/// Opacity of the depth fog over textured strips.
pub fn fog_alpha(distance: f64) -> f64 {
    ((distance - 3.0) / 3.0).clamp(0.0, 1.0)
}

/// Rounds a canvas width down to a whole number of strips, so that
/// `SCREEN_SAMPLES * ceil(width / SCREEN_SAMPLES)` covers it exactly.
pub fn fit_canvas_width(width: usize) -> usize {
    (width / SCREEN_SAMPLES).max(1) * SCREEN_SAMPLES
}

pub fn render_background(surface: &mut dyn Surface, ceiling: Color, floor: Color) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    surface.fill_rect(Rect::new(0.0, 0.0, w, h * 0.5), ceiling);
    surface.fill_rect(Rect::new(0.0, h * 0.5, w, h * 0.5), floor);
}

pub fn render_walls(surface: &mut dyn Surface, scene: &Scene, player: &Player) {
    let h = surface.height() as f64;
    let strip_width = (surface.width() as f64 / SCREEN_SAMPLES as f64).ceil();

    for (x, column) in sample_columns(scene, player, SCREEN_SAMPLES).iter().enumerate() {
        let Some(column) = column else {
            continue;
        };
        let strip_height = h / column.distance;
        let dst = Rect::new(
            x as f64 * strip_width,
            (h - strip_height) * 0.5,
            strip_width,
            strip_height,
        );
        match column.tile {
            Tile::Empty => {}
            Tile::Flat(color) => {
                surface.fill_rect(dst, color.brightness(1.0 / column.distance));
            }
            Tile::Textured(texture) => {
                let u = (column.u * texture.width as f64)
                    .floor()
                    .min(texture.width.saturating_sub(1) as f64);
                let src = Rect::new(u, 0.0, 1.0, texture.height as f64);
                surface.draw_image(texture, src, dst);
                surface.fill_rect(dst, Color::BLACK.with_alpha(fog_alpha(column.distance)));
            }
        }
    }
}

/// Draws one full frame: background, walls, then the minimap on top.
pub fn render_frame(surface: &mut dyn Surface, scene: &Scene, player: &Player, config: &Config) {
    render_background(surface, config.ceiling_color, config.floor_color);
    render_walls(surface, scene, player);

    let canvas = Vector2::new(surface.width() as f64, surface.height() as f64);
    let position = canvas.scale(config.minimap_offset);
    let size = scene.size().scale(canvas.x * config.minimap_cell);
    render_minimap(surface, scene, player, position, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    fn wall() -> Tile {
        Tile::Flat(Color::rgb(1.0, 1.0, 1.0))
    }

    // empty 8x12 field with a full-height wall column at x = 6
    fn wall_ahead() -> Scene {
        let mut rows = vec![vec![Tile::Empty; 8]; 12];
        for row in rows.iter_mut() {
            row[6] = wall();
        }
        Scene::new(rows)
    }

    #[test]
    fn flat_wall_has_equal_strip_heights() {
        let scene = wall_ahead();
        let player = Player::new(Vector2::new(1.5, 6.0), 0.0);
        let columns = sample_columns(&scene, &player, 64);
        assert!(columns.iter().all(Option::is_some));
        for column in columns.iter().flatten() {
            assert!((column.distance - 4.5).abs() < 1e-9, "{}", column.distance);
        }
        // Euclidean distance would bulge at the edges
        let (r1, _) = player.fov_range();
        let edge = cast_ray(&scene, player.position, r1);
        assert!(player.position.distance_to(edge.point) > 6.0);
    }

    #[test]
    fn texture_u_follows_the_struck_face() {
        // vertical face, entered from the left
        assert!((texture_u(Vector2::new(4.0, 2.3), Vector2::new(4.0, 2.0)) - 0.3).abs() < 1e-12);
        // vertical face, entered from the right
        assert!((texture_u(Vector2::new(5.0, 2.6), Vector2::new(4.0, 2.0)) - 0.6).abs() < 1e-12);
        // horizontal face
        assert!((texture_u(Vector2::new(4.7, 2.0), Vector2::new(4.0, 2.0)) - 0.7).abs() < 1e-12);
        // exact corner resolves to the vertical reading
        assert_eq!(texture_u(Vector2::new(4.0, 2.0), Vector2::new(4.0, 2.0)), 0.0);
    }

    #[test]
    fn fog_ramps_between_three_and_six_units() {
        assert_eq!(fog_alpha(1.0), 0.0);
        assert_eq!(fog_alpha(3.0), 0.0);
        assert!((fog_alpha(4.5) - 0.5).abs() < 1e-12);
        assert_eq!(fog_alpha(9.0), 1.0);
    }

    #[test]
    fn strips_are_centered_and_sized_by_distance() {
        let scene = wall_ahead();
        let player = Player::new(Vector2::new(1.5, 6.0), 0.0);
        let mut canvas = Canvas::new(SCREEN_SAMPLES, 90);
        canvas.clear(Color::BLACK);
        render_walls(&mut canvas, &scene, &player);
        // 90 / 4.5 = 20 rows centered on 45
        let lit = (0..90).filter(|&y| canvas.pixel(10, y) != 0).count();
        assert_eq!(lit, 20);
        assert_ne!(canvas.pixel(10, 45), 0);
        assert_eq!(canvas.pixel(10, 34), 0);
    }

    #[test]
    fn textured_strips_sample_by_u_and_fog_by_depth() {
        use crate::color::pack_rgb;
        use crate::scene::Texture;
        use std::sync::Arc;

        // left half red, right half blue
        let texture = Arc::new(Texture {
            width: 2,
            height: 1,
            pixels: vec![pack_rgb(255, 0, 0), pack_rgb(0, 0, 255)],
        });
        let mut rows = vec![vec![Tile::Empty; 8]; 12];
        for row in rows.iter_mut() {
            row[6] = Tile::Textured(texture.clone());
        }
        let scene = Scene::new(rows);
        // the center ray hits y = 6.25 (u = 0.25), the edges y ~ 1.75 and ~ 10.7 (u ~ 0.75)
        let player = Player::new(Vector2::new(1.5, 6.25), 0.0);

        let mut canvas = Canvas::new(SCREEN_SAMPLES, 90);
        canvas.clear(Color::BLACK);
        render_walls(&mut canvas, &scene, &player);

        // distance 4.5 gives fog alpha 0.5 over full-intensity texels
        let half_red = pack_rgb(128, 0, 0);
        let half_blue = pack_rgb(0, 0, 128);
        assert_eq!(canvas.pixel(150, 45), half_red);
        assert_eq!(canvas.pixel(0, 45), half_blue);
        assert_eq!(canvas.pixel(SCREEN_SAMPLES - 1, 45), half_blue);
        // the single texel row is stretched over the whole 20 px strip
        assert_eq!(canvas.pixel(150, 35), half_red);
        assert_eq!(canvas.pixel(150, 54), half_red);
        assert_eq!(canvas.pixel(150, 34), 0);
        assert_eq!(canvas.pixel(150, 55), 0);
    }

    #[test]
    fn fitted_canvas_holds_every_strip() {
        assert_eq!(fit_canvas_width(640), 600);
        assert_eq!(fit_canvas_width(SCREEN_SAMPLES), SCREEN_SAMPLES);
        assert_eq!(fit_canvas_width(100), SCREEN_SAMPLES);

        let width = fit_canvas_width(640);
        let strip = width.div_ceil(SCREEN_SAMPLES);
        assert_eq!(strip * SCREEN_SAMPLES, width);

        let scene = wall_ahead();
        let player = Player::new(Vector2::new(1.5, 6.0), 0.0);
        let mut canvas = Canvas::new(width, 90);
        canvas.clear(Color::BLACK);
        render_walls(&mut canvas, &scene, &player);
        // the last strip reaches the right edge, the middle one sits at the center
        assert_ne!(canvas.pixel(width - 1, 45), 0);
        assert_ne!(canvas.pixel(width / 2, 45), 0);
        assert_ne!(canvas.pixel(0, 45), 0);
    }

    #[test]
    fn open_columns_are_left_unpainted() {
        let scene = Scene::new(vec![vec![Tile::Empty; 40]; 40]);
        let player = Player::new(Vector2::new(20.0, 20.0), 0.7);
        assert!(sample_columns(&scene, &player, 32).iter().all(Option::is_none));
    }
}
