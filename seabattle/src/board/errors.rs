//! Errors produced while placing a fleet.

use thiserror::Error;

use crate::{board::Coordinate, ships::ShipKind};

/// Reason a placement spec was rejected. Whenever one of these is returned from
/// [`parse_placements`][crate::board::parse_placements] the grid is left empty and the
/// whole spec has to be submitted again.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PlacementError {
    /// The token does not have the shape `Kind:Start-End`. Row numbers with a leading
    /// zero, such as `A05` or `A0`, fail here.
    #[error("an invalid format was specified: {0:?}")]
    InvalidFormat(String),

    /// The ship letter is not one of `A`, `B` or `S`.
    #[error("an invalid ship type was specified: {0:?}")]
    InvalidShipType(char),

    /// A coordinate lies outside `A1`..`J10`.
    #[error("an invalid coordinate was specified: {0:?}")]
    InvalidCoordinate(String),

    /// The endpoints are diagonal or do not span exactly the ship's length.
    #[error("invalid range {start}-{end} for the {kind}, which is {} spaces long", .kind.len())]
    InvalidRange {
        kind: ShipKind,
        start: Coordinate,
        end: Coordinate,
    },

    /// A ship would cover a cell that another ship already occupies.
    #[error("the {kind} overlaps another ship at {at}")]
    Overlap { kind: ShipKind, at: Coordinate },

    /// The same kind of ship appears more than once among the first three tokens. A
    /// repeat in a fourth or later token is reported as [`MissingShips`][Self::MissingShips].
    #[error("the {0} was specified more than once")]
    DuplicateShip(ShipKind),

    /// The spec did not contain exactly three tokens.
    #[error("expected exactly 3 ships, found {found}")]
    MissingShips { found: usize },
}
