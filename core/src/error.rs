use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid position")]
    InvalidPosition,
    #[error("That is an empty space, an obstacle, or the exit, select a car")]
    EmptyOrInvalidTarget,
    #[error("Move blocked by another car or obstacle")]
    BlockedMove,
    #[error("No car at the current position")]
    NoVehicleHere,
    #[error("Invalid command")]
    InvalidCommand,
    #[error("No car is selected")]
    NoSelection,
    #[error("Level is out of range")]
    InvalidLevel,
    #[error("Lot is too small for the requested obstacles and cars")]
    LotFull,
    #[error("Could not lay out obstacles with a reachable exit")]
    UnreachableExit,
    #[error("Lot layout has overlapping or misplaced entities")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
