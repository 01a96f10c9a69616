use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{game} needs between {min} and {max} players, got {count}")]
    InvalidPlayerCount {
        game: &'static str,
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("player {0} appears more than once")]
    DuplicatePlayer(String),
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("unknown round style {0}")]
    UnknownRoundStyle(usize),
    #[error("no round at index {0}")]
    UnknownRound(usize),
    #[error("unknown team {0}")]
    UnknownTeam(usize),
    #[error("{0} is not a valid points total for a round")]
    InvalidPoints(i32),
    #[error("invalid session config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Config(err.to_string())
    }
}
