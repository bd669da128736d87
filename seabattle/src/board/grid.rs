//! Defines the per-player grid and the cells that make it up.

use std::ops::Index;

use enumflags2::BitFlags;

use crate::{
    board::{Coordinate, Placement, PlacementError, GRID_SIZE},
    ships::ShipKind,
};

/// A single cell in a player's grid.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Space {
    /// The kind of ship that occupies this cell, if any.
    ship: Option<ShipKind>,

    /// Whether this cell has been fired on.
    shot: bool,
}

impl Space {
    /// Whether a ship occupies this cell.
    pub fn is_populated(&self) -> bool {
        self.ship.is_some()
    }

    /// Whether this cell was fired on and held a ship.
    pub fn is_hit(&self) -> bool {
        self.shot && self.ship.is_some()
    }

    /// Whether this cell was fired on and was empty.
    pub fn is_miss(&self) -> bool {
        self.shot && self.ship.is_none()
    }

    /// Whether this cell was fired on at all.
    pub fn is_shot(&self) -> bool {
        self.shot
    }

    /// The kind of ship occupying this cell.
    pub fn ship(&self) -> Option<ShipKind> {
        self.ship
    }
}

/// What the view layer should draw for a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CellView {
    /// Open water that has not been fired on.
    Empty,
    /// An intact ship segment.
    Ship(ShipKind),
    /// A ship segment that was hit.
    Hit(ShipKind),
    /// Open water that was fired on.
    Miss,
}

impl CellView {
    /// The view of this cell as the opponent may see it: intact ship segments look like
    /// open water.
    pub fn concealed(self) -> Self {
        match self {
            CellView::Ship(_) => CellView::Empty,
            other => other,
        }
    }
}

impl From<&Space> for CellView {
    fn from(space: &Space) -> Self {
        match (space.ship, space.shot) {
            (None, false) => CellView::Empty,
            (None, true) => CellView::Miss,
            (Some(kind), false) => CellView::Ship(kind),
            (Some(kind), true) => CellView::Hit(kind),
        }
    }
}

/// One player's 10x10 grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    /// Cells in row-major order.
    cells: Box<[Space]>,
}

impl Grid {
    /// Construct an empty grid.
    pub fn new() -> Self {
        Self {
            cells: vec![Space::default(); GRID_SIZE * GRID_SIZE].into_boxed_slice(),
        }
    }

    /// Get the cell at the given [`Coordinate`].
    pub fn get(&self, coord: Coordinate) -> &Space {
        &self.cells[coord.linearize()]
    }

    /// View of the cell at the given coordinate.
    pub fn cell_view(&self, coord: Coordinate) -> CellView {
        self.get(coord).into()
    }

    /// Reset every cell to open water that has never been fired on.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Space::default();
        }
    }

    /// Number of cells occupied by ships.
    pub fn populated_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_populated()).count()
    }

    /// Set of ship kinds present on this grid.
    pub fn ships(&self) -> BitFlags<ShipKind> {
        let mut kinds = BitFlags::empty();
        for kind in self.cells.iter().filter_map(|cell| cell.ship) {
            kinds.insert(kind);
        }
        kinds
    }

    /// Returns true if exactly one ship of every kind has been placed.
    pub fn ready(&self) -> bool {
        self.ships() == BitFlags::all() && self.populated_count() == ShipKind::FLEET_CELLS
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the cells of
    /// that row.
    pub fn rows<'a>(&'a self) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = &'a Space>> {
        self.cells.chunks(GRID_SIZE).map(|row| row.iter())
    }

    /// Attempt to place a ship. Fails without changing the grid if its kind is already
    /// on the grid or any of its cells is already occupied.
    pub fn place(&mut self, placement: &Placement) -> Result<(), PlacementError> {
        let kind = placement.kind();
        if self.ships().contains(kind) {
            return Err(PlacementError::DuplicateShip(kind));
        }
        if let Some(at) = placement.cells().find(|&coord| self.get(coord).is_populated()) {
            return Err(PlacementError::Overlap { kind, at });
        }
        // Already ensured that no cell is occupied.
        for coord in placement.cells() {
            self.cells[coord.linearize()].ship = Some(kind);
        }
        Ok(())
    }

    /// Fire on the given cell, returning the kind of ship hit, if any. Returns `None`
    /// without changing anything if the cell was already fired on.
    pub fn shoot(&mut self, coord: Coordinate) -> Option<Option<ShipKind>> {
        let cell = &mut self.cells[coord.linearize()];
        if cell.shot {
            None
        } else {
            cell.shot = true;
            Some(cell.ship)
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coordinate> for Grid {
    type Output = Space;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        self.get(coord)
    }
}
