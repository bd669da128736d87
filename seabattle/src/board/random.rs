//! Random fleets for players who would rather not type a placement spec.
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{
    board::{format_spec, Coordinate, Grid, Orientation, Placement, GRID_SIZE},
    ships::ShipKind,
};

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Pick a random, non-overlapping position for every ship kind.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Vec<Placement> {
    let mut grid = Grid::new();
    let mut fleet = Vec::with_capacity(ShipKind::ALL.len());
    for &kind in ShipKind::ALL {
        loop {
            let orientation: Orientation = rng.gen();
            // Only draw origins from which the ship stays on the grid.
            let (rows, cols) = match orientation {
                Orientation::Horizontal => (GRID_SIZE, GRID_SIZE - kind.len() + 1),
                Orientation::Vertical => (GRID_SIZE - kind.len() + 1, GRID_SIZE),
            };
            let origin = Coordinate::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            let placement = match origin.map(|o| Placement::from_origin(kind, o, orientation)) {
                Some(Ok(placement)) => placement,
                _ => continue,
            };
            if grid.place(&placement).is_ok() {
                fleet.push(placement);
                break;
            }
        }
    }
    fleet
}

/// A random fleet written as a placement spec, e.g. `A:C3-G3;B:J1-J4;S:A8-A10`.
pub fn random_fleet_spec<R: Rng + ?Sized>(rng: &mut R) -> String {
    format_spec(&random_fleet(rng))
}
