use thiserror::Error;

use crate::board::PlacementError;

/// Reason why a shot was ignored. A rejected shot never changes the game.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// Ships are still being placed.
    #[error("ships are still being placed")]
    NotFiring,

    /// The game is already over.
    #[error("the game is already over")]
    GameOver,

    /// The result of the previous shot has not been dismissed yet.
    #[error("the previous result has not been dismissed")]
    OverlayActive,

    /// The player whose turn it is targeted their own board.
    #[error("player attempted to shoot their own board")]
    OwnBoard,

    /// The target cell has already been shot.
    #[error("the target cell was already shot")]
    AlreadyShot,
}

/// Error returned when submitting a player's fleet.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SetupError {
    /// Both fleets are already placed.
    #[error("ship placement is already over")]
    PlacementClosed,

    /// The placement spec was rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}
