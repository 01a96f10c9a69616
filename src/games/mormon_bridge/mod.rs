pub mod game;
pub mod view;

#[cfg(test)]
mod tests_props;

// Re-export the main types
pub use game::{
    EditTarget, MormonBridgeAction, MormonBridgeGame, Phase, PlayerRoundResult, RoundStyle,
    MAX_PLAYERS, MIN_PLAYERS,
};
pub use view::{MainContent, MormonBridgeView};
