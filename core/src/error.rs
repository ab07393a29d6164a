use thiserror::Error;

use crate::{Difficulty, Special, TileId};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Tile id {0:?} is used by more than one tile")]
    DuplicateTileId(TileId),
    #[error("Board size must be at least 1x1")]
    InvalidBoardSize,
    #[error("Fill rate for {0} must be a finite value in [0, 1)")]
    InvalidFillRate(Difficulty),
    #[error("{1} probability for {0} must be a finite value in [0, 1]")]
    InvalidProbability(Difficulty, Special),
    #[error("Special tile probabilities for {0} add up to more than 1")]
    ProbabilitySumTooHigh(Difficulty),
    #[error("Initial time for {0} must be at least one second")]
    InvalidInitialTime(Difficulty),
    #[error("Unknown difficulty, expected one of easy, normal, hard, time_attack")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
