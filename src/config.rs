use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RoomError;

/// Registry settings. Missing JSON fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Used when a room is created with 0 minutes.
    pub default_minutes_per_player: u32,
    pub max_rooms: usize,
    /// Refuse moves until both seats are taken.
    pub require_full_room: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        RegistryConfig {
            default_minutes_per_player: 10,
            max_rooms: 10_000,
            require_full_room: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RoomError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RoomError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RoomError::ConfigUnreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
