use grid_raycaster::color::{Color, pack_rgb};
use grid_raycaster::config::{Config, FAR_CLIPPING_PLANE, default_scene};
use grid_raycaster::game::Game;
use grid_raycaster::input::Action;
use grid_raycaster::persist::{FileStore, MemoryStore, PlayerRecord, StateStore, load_player};
use grid_raycaster::player::{Player, can_player_go_there};
use grid_raycaster::raymarch::{EPS, cast_ray, ray_step};
use grid_raycaster::renderer::sample_columns;
use grid_raycaster::scene::{Scene, Tile};
use grid_raycaster::surface::{Canvas, Surface};
use grid_raycaster::vector::Vector2;

fn temp_file(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("grid_raycaster_{}_{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_scene_rows_of_three_five_two() {
    let w = Tile::Flat(Color::hex(0x777777));
    let scene = Scene::new(vec![vec![w.clone(); 3], vec![w.clone(); 5], vec![w.clone(); 2]]);
    assert_eq!((scene.width(), scene.height()), (5, 3));
    assert!(!scene.is_solid(Vector2::new(3.0, 0.0)));
    assert!(!scene.is_solid(Vector2::new(4.0, 0.0)));
    assert!(scene.is_solid(Vector2::new(4.0, 1.0)));
    assert!(!scene.is_solid(Vector2::new(2.0, 2.0)));
}

#[test]
fn test_file_store_round_trip() {
    let path = temp_file("round_trip.json");
    let player = Player::new(Vector2::new(4.123456789, 2.5), 7.77);

    let mut store = FileStore::new(&path);
    assert!(store.load().is_none());
    store.save(&PlayerRecord::from(&player)).unwrap();

    let loaded = load_player(&FileStore::new(&path), Player::new(Vector2::ZERO, 0.0));
    assert!((loaded.position.x - player.position.x).abs() < 1e-12);
    assert!((loaded.position.y - player.position.y).abs() < 1e-12);
    assert!((loaded.direction - player.direction).abs() < 1e-12);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_corrupt_file_uses_default() {
    let path = temp_file("corrupt.json");
    std::fs::write(&path, "{\"position\": {\"x\": 1}").unwrap();
    let default = Player::new(Vector2::new(2.0, 3.0), 0.5);
    assert!(FileStore::new(&path).load().is_none());
    assert_eq!(load_player(&FileStore::new(&path), default), default);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_ray_step_is_monotonic_for_many_slopes() {
    let p1 = Vector2::new(3.3, 4.1);
    for i in 0..64 {
        let angle = i as f64 * std::f64::consts::TAU / 64.0 + 0.01;
        let mut a = p1;
        let mut b = p1 + Vector2::from_angle(angle) * 0.3;
        for _ in 0..10 {
            let c = ray_step(a, b);
            assert!(p1.distance_to(c) > p1.distance_to(b));
            a = b;
            b = c;
        }
    }
}

#[test]
fn test_open_field_ray_reaches_far_plane() {
    let scene = Scene::new(vec![vec![Tile::Empty; 50]; 50]);
    let p1 = Vector2::new(25.2, 24.9);
    let hit = cast_ray(&scene, p1, p1 + Vector2::from_angle(2.0) * 0.25);
    assert!(hit.tile.is_none());
    assert!(p1.distance_to(hit.point) >= FAR_CLIPPING_PLANE - EPS);
}

#[test]
fn test_wall_slide_in_demo_level() {
    let scene = default_scene(&[]);
    // pressed against the left outer wall, facing up-left
    let mut player = Player::new(Vector2::new(1.25, 5.5), std::f64::consts::PI * 1.25);
    assert!(can_player_go_there(&scene, player.position));
    let mut game = Game::new(scene, player, Config::default(), Box::new(MemoryStore::default()));
    game.input.set(Action::MoveForward, true);
    for _ in 0..5 {
        game.tick(0.02);
    }
    player = game.player;
    assert_eq!(player.position.x, 1.25);
    assert!(player.position.y < 5.5);
}

#[test]
fn test_every_column_sees_a_wall_in_demo_level() {
    let scene = default_scene(&[]);
    let player = Game::default_player(&scene);
    let columns = sample_columns(&scene, &player, 120);
    assert_eq!(columns.len(), 120);
    assert!(columns.iter().all(Option::is_some));
}

#[test]
fn test_full_frame_draws_minimap_over_walls() {
    let scene = default_scene(&[]);
    let player = Game::default_player(&scene);
    let config = Config::default();
    let game = Game::new(scene, player, config, Box::new(MemoryStore::default()));

    let mut canvas = Canvas::new(640, 360);
    canvas.clear(Color::BLACK);
    game.render(&mut canvas);

    // minimap sits at 3% offset with 0.03 * 640 = 19.2 px cells;
    // the outer wall cell (0, 0) is drawn in its flat color
    assert_eq!(canvas.pixel(25, 16), Color::hex(0x6a6a6a).to_pixel());
    // the player marker
    let marker = Vector2::new(19.2, 10.8) + player.position * 19.2;
    assert_eq!(
        canvas.pixel(marker.x as usize, marker.y as usize),
        pack_rgb(255, 0, 255)
    );
    assert_eq!(canvas.width(), 640);
}
