use std::fmt;
use std::fs;
use std::path::Path;

use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GameError;
use crate::games::mormon_bridge::{MormonBridgeGame, RoundStyle};
use crate::games::rook::RookGame;
use crate::player::Player;
use crate::store::ScoreKeeper;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Sequence)]
#[serde(rename_all = "camelCase")]
pub enum GameKind {
    MormonBridge,
    Rook,
}

impl GameKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            GameKind::MormonBridge => "Mormon Bridge",
            GameKind::Rook => "Rook",
        }
    }

    pub fn from_display_name(name: &str) -> Option<GameKind> {
        all::<GameKind>().find(|kind| kind.display_name() == name)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a scoring session starts: which game, who is at the table and,
/// for Mormon Bridge, optionally the dealer and round style so the setup
/// screens can be skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub game: GameKind,
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_style: Option<RoundStyle>,
    // Player id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer: Option<String>,
}

impl SessionConfig {
    pub fn new(game: GameKind, players: Vec<Player>) -> Self {
        Self {
            game,
            players,
            round_style: None,
            dealer: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn start(&self) -> Result<Session, GameError> {
        let session = match self.game {
            GameKind::MormonBridge => {
                let mut game = MormonBridgeGame::new(self.players.clone())?;
                if let Some(dealer) = &self.dealer {
                    game.select_dealer(dealer)?;
                }
                if let Some(style) = self.round_style {
                    if self.dealer.is_none() {
                        return Err(GameError::Config(
                            "roundStyle needs a dealer to be chosen first".to_string(),
                        ));
                    }
                    let index = all::<RoundStyle>()
                        .position(|s| s == style)
                        .ok_or_else(|| GameError::Config(format!("{:?}", style)))?;
                    game.select_round_style(index)?;
                }
                Session::MormonBridge(game)
            }
            GameKind::Rook => {
                if self.dealer.is_some() || self.round_style.is_some() {
                    return Err(GameError::Config(
                        "Rook has no dealer or round style".to_string(),
                    ));
                }
                Session::Rook(RookGame::new(self.players.clone())?)
            }
        };
        info!(game = %self.game, players = self.players.len(), "session started");
        Ok(session)
    }
}

/// A running game of either kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "game", content = "state")]
pub enum Session {
    MormonBridge(MormonBridgeGame),
    Rook(RookGame),
}

impl Session {
    pub fn kind(&self) -> GameKind {
        match self {
            Session::MormonBridge(_) => GameKind::MormonBridge,
            Session::Rook(_) => GameKind::Rook,
        }
    }

    pub fn completed_rounds(&self) -> usize {
        match self {
            Session::MormonBridge(game) => game.completed_rounds(),
            Session::Rook(game) => game.completed_rounds(),
        }
    }
}
