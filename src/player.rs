use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Checks the roster size against the game's bounds and rejects repeated ids.
pub fn validate_roster(
    game: &'static str,
    players: &[Player],
    min: usize,
    max: usize,
) -> Result<(), GameError> {
    if players.len() < min || players.len() > max {
        return Err(GameError::InvalidPlayerCount {
            game,
            count: players.len(),
            min,
            max,
        });
    }
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player.id.as_str()) {
            return Err(GameError::DuplicatePlayer(player.id.clone()));
        }
    }
    Ok(())
}
