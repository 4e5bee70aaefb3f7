use crate::config::{FOV, NEAR_CLIPPING_PLANE, PLAYER_SIZE, PLAYER_SPEED, PLAYER_TURN_SPEED};
use crate::input::InputFlags;
use crate::scene::Scene;
use crate::vector::Vector2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Player {
    pub position: Vector2, // continuous grid coordinates
    pub direction: f64,    // radians, unbounded
}

impl Player {
    pub fn new(position: Vector2, direction: f64) -> Self {
        Self {
            position,
            direction,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vector2 {
        Vector2::from_angle(self.direction)
    }

    /// Left and right ends of the near plane.
    pub fn fov_range(&self) -> (Vector2, Vector2) {
        let half = FOV * 0.5;
        let reach = NEAR_CLIPPING_PLANE / half.cos();
        (
            self.position + Vector2::from_angle(self.direction - half) * reach,
            self.position + Vector2::from_angle(self.direction + half) * reach,
        )
    }

    /// Integrates one tick. Each axis is gated separately so the player
    /// slides along walls. Returns whether anything changed.
    pub fn update(&mut self, scene: &Scene, input: &InputFlags, dt: f64) -> bool {
        let velocity = self.forward() * (input.thrust() * PLAYER_SPEED);
        let angular_velocity = input.turn() * PLAYER_TURN_SPEED;

        let before = *self;
        self.direction += angular_velocity * dt;

        let target = self.position + velocity * dt;
        if can_player_go_there(scene, Vector2::new(target.x, self.position.y)) {
            self.position.x = target.x;
        }
        if can_player_go_there(scene, Vector2::new(self.position.x, target.y)) {
            self.position.y = target.y;
        }

        *self != before
    }
}

/// `false` when the footprint centered at `position` touches a solid cell.
pub fn can_player_go_there(scene: &Scene, position: Vector2) -> bool {
    let half = Vector2::scalar(PLAYER_SIZE * 0.5);
    let start = (position - half).floor();
    let end = (position + half).floor();
    let (x0, x1) = (start.x as i64, end.x as i64);
    let (y0, y1) = (start.y as i64, end.y as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            if scene.is_solid(Vector2::new(x as f64, y as f64)) {
                return false;
            }
        }
    }
    true
}
