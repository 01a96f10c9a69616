pub mod game;
pub mod view;

#[cfg(test)]
mod tests_props;

pub use game::{
    Phase, ReadyRound, RookAction, RookGame, RoundData, Team, DEFAULT_BID, MAX_BID, MAX_POINTS,
    MIN_BID, PLAYER_COUNT,
};
pub use view::{MainContent, RookView};
