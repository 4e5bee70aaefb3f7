use crate::config::Config;
use crate::input::InputFlags;
use crate::persist::{PlayerRecord, StateStore};
use crate::player::Player;
use crate::renderer::render_frame;
use crate::scene::Scene;
use crate::surface::Surface;
use crate::vector::Vector2;

/// Everything one frame tick reads or mutates.
pub struct Game {
    pub scene: Scene,
    pub player: Player,
    pub input: InputFlags,
    pub config: Config,
    store: Box<dyn StateStore>,
}

impl Game {
    pub fn new(scene: Scene, player: Player, config: Config, store: Box<dyn StateStore>) -> Self {
        Self {
            scene,
            player,
            input: InputFlags::default(),
            config,
            store,
        }
    }

    /// Starting spot used when no saved state exists.
    pub fn default_player(scene: &Scene) -> Player {
        Player::new(
            scene.size().mul(Vector2::scalar(0.63)),
            std::f64::consts::PI * 1.25,
        )
    }

    /// Moves the player by `dt` seconds and persists it if it changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        let changed = self.player.update(&self.scene, &self.input, dt);
        if changed {
            if let Err(e) = self.store.save(&PlayerRecord::from(&self.player)) {
                log::warn!("Could not save player state: {e}");
            }
        }
        changed
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        render_frame(surface, &self.scene, &self.player, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::default_scene;
    use crate::error::PersistError;
    use crate::input::Action;

    struct CountingStore(Rc<RefCell<Vec<PlayerRecord>>>);

    impl StateStore for CountingStore {
        fn load(&self) -> Option<PlayerRecord> {
            self.0.borrow().last().copied()
        }
        fn save(&mut self, record: &PlayerRecord) -> Result<(), PersistError> {
            self.0.borrow_mut().push(*record);
            Ok(())
        }
    }

    #[test]
    fn saves_only_on_change() {
        let saves = Rc::new(RefCell::new(Vec::new()));
        let scene = default_scene(&[]);
        let player = Game::default_player(&scene);
        let mut game = Game::new(scene, player, Config::default(), Box::new(CountingStore(saves.clone())));

        assert!(!game.tick(0.016));
        assert!(saves.borrow().is_empty());

        game.input.set(Action::TurnRight, true);
        assert!(game.tick(0.016));
        assert_eq!(saves.borrow().len(), 1);
        assert_eq!(saves.borrow()[0], PlayerRecord::from(&game.player));
    }

    #[test]
    fn default_player_starts_in_the_open() {
        let scene = default_scene(&[]);
        let player = Game::default_player(&scene);
        assert!(crate::player::can_player_go_there(&scene, player.position));
    }
}
