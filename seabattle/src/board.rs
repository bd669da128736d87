//! Types that make up a player's board and the parser that fills it.

pub use self::{
    coordinate::{column_index, column_letter, Coordinate, ParseCoordinateError, GRID_SIZE},
    errors::PlacementError,
    grid::{CellView, Grid, Space},
    placement::{format_spec, parse_placements, Orientation, Placement},
};

mod coordinate;
mod errors;
mod grid;
mod placement;
#[cfg(feature = "rng_gen")]
pub mod random;
