//! Player state persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::player::Player;
use crate::vector::Vector2;

/// Stored form of a [`Player`]: `{"position":{"x":..,"y":..},"direction":..}`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub position: Vector2,
    pub direction: f64,
}

impl PlayerRecord {
    fn is_valid(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.direction.is_finite()
    }
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            position: player.position,
            direction: player.direction,
        }
    }
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        Player::new(record.position, record.direction)
    }
}

/// Parses a stored record. Anything malformed counts as "nothing saved".
pub fn parse_record(text: &str) -> Option<PlayerRecord> {
    match serde_json::from_str::<PlayerRecord>(text) {
        Ok(record) if record.is_valid() => Some(record),
        Ok(record) => {
            log::warn!("Discarding saved state with non-finite values: {record:?}");
            None
        }
        Err(e) => {
            log::warn!("Discarding malformed saved state, reason='{e}'");
            None
        }
    }
}

pub trait StateStore {
    /// `None` when nothing usable is stored; never an error.
    fn load(&self) -> Option<PlayerRecord>;
    fn save(&mut self, record: &PlayerRecord) -> Result<(), PersistError>;
}

/// JSON document on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Option<PlayerRecord> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read saved state {}: {e}", self.path.display());
                return None;
            }
        };
        parse_record(&text)
    }

    fn save(&mut self, record: &PlayerRecord) -> Result<(), PersistError> {
        let json = serde_json::to_string(record)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Saved player state to {}", self.path.display());
        Ok(())
    }
}

/// In-process store, also used when persistence is switched off.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Option<String>,
}

impl MemoryStore {
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<PlayerRecord> {
        self.data.as_deref().and_then(parse_record)
    }

    fn save(&mut self, record: &PlayerRecord) -> Result<(), PersistError> {
        self.data = Some(serde_json::to_string(record)?);
        Ok(())
    }
}

/// Saved player, or `default` when nothing usable was stored.
pub fn load_player(store: &dyn StateStore, default: Player) -> Player {
    store.load().map(Player::from).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let player = Player::new(Vector2::new(3.25, 7.125), -12.5);
        let mut store = MemoryStore::default();
        store.save(&PlayerRecord::from(&player)).unwrap();
        assert_eq!(Player::from(store.load().unwrap()), player);
    }

    #[test]
    fn record_uses_documented_layout() {
        let json = r#"{"position":{"x":1.5,"y":2.0},"direction":0.25}"#;
        let record = parse_record(json).unwrap();
        assert_eq!(record.position, Vector2::new(1.5, 2.0));
        assert_eq!(record.direction, 0.25);
    }

    #[test]
    fn malformed_records_are_absent() {
        for bad in [
            "",
            "null",
            "{}",
            "not json",
            r#"{"position":{"x":1.0},"direction":0.0}"#,
            r#"{"position":{"x":"1","y":2},"direction":0.0}"#,
            r#"{"position":{"x":1.0,"y":2.0}}"#,
        ] {
            assert!(MemoryStore::with_data(bad).load().is_none(), "{bad}");
        }
    }

    #[test]
    fn missing_state_falls_back_to_default() {
        let default = Player::new(Vector2::new(5.0, 5.0), 1.0);
        assert_eq!(load_player(&MemoryStore::default(), default), default);
        assert_eq!(load_player(&MemoryStore::with_data("{"), default), default);
    }
}
