pub mod config;
pub mod error;
pub mod games;
pub mod player;
pub mod scoreboard;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::{GameKind, Session, SessionConfig};
pub use error::GameError;
pub use player::Player;
pub use store::{ScoreKeeper, StateContainer};
