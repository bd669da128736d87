//! Parsing of placement specs such as `A:A1-A5;B:(B1-B4);S:C1-C3`.
//!
//! A spec is a list of tokens separated by `;`. Each token names a ship by its letter,
//! optionally followed by `:`, and then the two end cells of the ship, optionally in
//! parentheses. Letters are case-insensitive and whitespace around a token is ignored.
//! Row numbers are written without leading zeros.
use std::{cmp, fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    board::{Coordinate, Grid, PlacementError},
    ships::ShipKind,
};

/// Matcher for a single placement token.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?x)
        (?P<kind>[[:alpha:]])
        :?
        \(?
        (?P<start_col>[[:alpha:]])(?P<start_row>[1-9][0-9]*)
        -
        (?P<end_col>[[:alpha:]])(?P<end_row>[1-9][0-9]*)
        \)?$",
    )
    .expect("placement token pattern is valid")
});

/// Direction a ship runs in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    /// Along a row, columns increase.
    Horizontal,
    /// Along a column, rows increase.
    Vertical,
}

/// A validated ship position: the kind of ship and the two cells at its ends.
///
/// The ends are kept as written, so `B:B4-B1` and `B:B1-B4` are distinct placements that
/// cover the same cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Placement {
    kind: ShipKind,
    start: Coordinate,
    end: Coordinate,
}

impl Placement {
    /// Build a placement from its end cells. Fails with
    /// [`PlacementError::InvalidRange`] if the ends are not in one row or one column or
    /// do not span exactly the length of the ship.
    pub fn new(kind: ShipKind, start: Coordinate, end: Coordinate) -> Result<Self, PlacementError> {
        let span = if start.col() == end.col() {
            start.row().max(end.row()) - start.row().min(end.row()) + 1
        } else if start.row() == end.row() {
            start.col().max(end.col()) - start.col().min(end.col()) + 1
        } else {
            0
        };
        if span == kind.len() {
            Ok(Self { kind, start, end })
        } else {
            Err(PlacementError::InvalidRange { kind, start, end })
        }
    }

    /// Build a placement from its first cell, counting in increasing index order along
    /// the given orientation. Fails with [`PlacementError::InvalidRange`] if the ship
    /// would run off the grid.
    pub fn from_origin(
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, PlacementError> {
        let (row, col): (usize, usize) = origin.into();
        let last = kind.len() - 1;
        let end = match orientation {
            Orientation::Horizontal => Coordinate::new(row, col + last),
            Orientation::Vertical => Coordinate::new(row + last, col),
        };
        match end {
            Some(end) => Self::new(kind, origin, end),
            None => Err(PlacementError::InvalidRange {
                kind,
                start: origin,
                end: origin,
            }),
        }
    }

    /// Kind of ship being placed.
    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// First end as written.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Second end as written.
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Direction the ship runs in. Ends sharing a column are vertical.
    pub fn orientation(&self) -> Orientation {
        if self.start.col() == self.end.col() {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Iterate the covered cells in increasing index order, starting at whichever end
    /// is smaller.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let first = cmp::min(self.start, self.end);
        let orientation = self.orientation();
        // Bounds were checked on construction, so no cell is dropped here.
        (0..self.kind.len()).filter_map(move |i| match orientation {
            Orientation::Horizontal => Coordinate::new(first.row(), first.col() + i),
            Orientation::Vertical => Coordinate::new(first.row() + i, first.col()),
        })
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    /// Parse a single token such as `A:(A1-A5)`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let captures = TOKEN
            .captures(token)
            .ok_or_else(|| PlacementError::InvalidFormat(token.to_owned()))?;

        let letter = first_char(captures.name("kind").map(|m| m.as_str()));
        let kind = ShipKind::from_letter(letter).ok_or(PlacementError::InvalidShipType(letter))?;

        let coord = |col: &str, row: &str| -> Result<Coordinate, PlacementError> {
            let col = captures.name(col).map_or("", |m| m.as_str());
            let row = captures.name(row).map_or("", |m| m.as_str());
            row.parse()
                .ok()
                .and_then(|row| Coordinate::from_label(first_char(Some(col)), row))
                .ok_or_else(|| PlacementError::InvalidCoordinate(format!("{}{}", col, row)))
        };
        let start = coord("start_col", "start_row")?;
        let end = coord("end_col", "end_row")?;

        Placement::new(kind, start, end)
    }
}

/// First character of a capture. The pattern only matches single-letter groups.
fn first_char(s: Option<&str>) -> char {
    s.and_then(|s| s.chars().next()).unwrap_or_default()
}

impl fmt::Display for Placement {
    /// Formats as a token accepted by [`Placement::from_str`], e.g. `A:A1-A5`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.kind.letter(), self.start, self.end)
    }
}

/// Parse a placement spec onto the grid.
///
/// The grid is cleared first. Tokens are applied in order and the first failure aborts
/// the whole spec, leaving the grid empty again. Succeeds only if every token was valid
/// and exactly one ship of each kind was placed. Any token count other than three is
/// [`PlacementError::MissingShips`], even when an extra token repeats a kind.
pub fn parse_placements(spec: &str, grid: &mut Grid) -> Result<(), PlacementError> {
    grid.clear();
    match place_all(spec, grid) {
        Ok(()) => {
            log::debug!("accepted placement spec {:?}", spec);
            Ok(())
        }
        Err(err) => {
            grid.clear();
            log::debug!("rejected placement spec {:?}: {}", spec, err);
            Err(err)
        }
    }
}

/// Apply every token of the spec, stopping at the first error.
fn place_all(spec: &str, grid: &mut Grid) -> Result<(), PlacementError> {
    let mut placed = 0;
    for token in spec.split(';') {
        let placement: Placement = token.parse()?;
        // Tokens past the fleet size are still checked but only counted.
        if placed < ShipKind::ALL.len() {
            grid.place(&placement)?;
        }
        placed += 1;
    }
    if placed == ShipKind::ALL.len() {
        Ok(())
    } else {
        Err(PlacementError::MissingShips { found: placed })
    }
}

/// Join placements into a spec accepted by [`parse_placements`].
pub fn format_spec<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> String {
    placements
        .into_iter()
        .map(|placement| placement.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(label: &str) -> Coordinate {
        label.parse().unwrap()
    }

    fn parse(spec: &str) -> (Grid, Result<(), PlacementError>) {
        let mut grid = Grid::new();
        let result = parse_placements(spec, &mut grid);
        (grid, result)
    }

    #[test]
    fn standard_spec_places_all_three_ships() {
        let (grid, result) = parse("A:A1-A5;B:B1-B4;S:C1-C3");
        assert_eq!(result, Ok(()));
        assert_eq!(grid.populated_count(), ShipKind::FLEET_CELLS);
        assert!(grid.ready());
        for row in 1..=5 {
            assert_eq!(
                grid[Coordinate::from_label('A', row).unwrap()].ship(),
                Some(ShipKind::Carrier)
            );
        }
        for row in 1..=4 {
            assert_eq!(
                grid[Coordinate::from_label('B', row).unwrap()].ship(),
                Some(ShipKind::Battleship)
            );
        }
        for row in 1..=3 {
            assert_eq!(
                grid[Coordinate::from_label('C', row).unwrap()].ship(),
                Some(ShipKind::Submarine)
            );
        }
        assert!(!grid[coord("A6")].is_populated());
        assert!(!grid[coord("B5")].is_populated());
        assert!(!grid[coord("C4")].is_populated());
    }

    #[test]
    fn wrong_length_is_an_invalid_range_and_clears_the_grid() {
        let (grid, result) = parse("A:A1-A4;B:B1-B4;S:C1-C3");
        assert_eq!(
            result,
            Err(PlacementError::InvalidRange {
                kind: ShipKind::Carrier,
                start: coord("A1"),
                end: coord("A4"),
            })
        );
        assert_eq!(grid.populated_count(), 0);
    }

    #[test]
    fn overlap_discards_earlier_valid_ships() {
        let (grid, result) = parse("A:A1-A5;B:A3-A6;S:C1-C3");
        assert_eq!(
            result,
            Err(PlacementError::Overlap {
                kind: ShipKind::Battleship,
                at: coord("A3"),
            })
        );
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn accepts_optional_punctuation_lowercase_and_reversed_ends() {
        let (grid, result) = parse("a(j10-f10); b:(D2-D5) ;s:h8-h6");
        assert_eq!(result, Ok(()));
        for label in &["F10", "G10", "H10", "I10", "J10"] {
            assert_eq!(grid[coord(label)].ship(), Some(ShipKind::Carrier));
        }
        for label in &["D2", "D3", "D4", "D5"] {
            assert_eq!(grid[coord(label)].ship(), Some(ShipKind::Battleship));
        }
        for label in &["H6", "H7", "H8"] {
            assert_eq!(grid[coord(label)].ship(), Some(ShipKind::Submarine));
        }
    }

    #[test]
    fn malformed_tokens_are_invalid_format() {
        for spec in &[
            "",
            "A:A1A5;B:B1-B4;S:C1-C3",
            "A:A1-A5,B:B1-B4,S:C1-C3",
            "A::A1-A5;B:B1-B4;S:C1-C3",
            "A:A1-A5x;B:B1-B4;S:C1-C3",
            "A:A1-A5;B:B1-B4;S:C1-C3;",
            "1:A1-A5;B:B1-B4;S:C1-C3",
            "A:A01-A05;B:B1-B4;S:C1-C3",
            "A:A0-A4;B:B1-B4;S:C1-C3",
            "A: A1-A5;B:B1-B4;S:C1-C3",
        ] {
            let (grid, result) = parse(spec);
            assert!(
                matches!(result, Err(PlacementError::InvalidFormat(_))),
                "{:?} gave {:?}",
                spec,
                result
            );
            assert_eq!(grid.populated_count(), 0);
        }
    }

    #[test]
    fn unknown_ship_letter_is_rejected() {
        let (grid, result) = parse("A:A1-A5;C:B1-B4;S:C1-C3");
        assert_eq!(result, Err(PlacementError::InvalidShipType('C')));
        assert_eq!(grid.populated_count(), 0);
    }

    #[test]
    fn out_of_bounds_cells_are_invalid_coordinates() {
        let cases = [
            ("A:K1-K5;B:B1-B4;S:C1-C3", "K1"),
            ("A:A1-A5;B:B8-B11;S:C1-C3", "B11"),
            ("A:A1-A5;B:B1-B4;S:C1-C99999999999999999999999", "C99999999999999999999999"),
        ];
        for (spec, bad) in cases.iter() {
            let (grid, result) = parse(spec);
            assert_eq!(result, Err(PlacementError::InvalidCoordinate(bad.to_string())));
            assert_eq!(grid.populated_count(), 0);
        }
    }

    #[test]
    fn diagonal_placement_is_an_invalid_range() {
        let (_, result) = parse("A:A1-E5;B:B1-B4;S:C1-C3");
        assert!(matches!(
            result,
            Err(PlacementError::InvalidRange {
                kind: ShipKind::Carrier,
                ..
            })
        ));
    }

    #[test]
    fn too_few_ships_are_missing() {
        let (grid, result) = parse("A:A1-A5;B:B1-B4");
        assert_eq!(result, Err(PlacementError::MissingShips { found: 2 }));
        assert_eq!(grid.populated_count(), 0);
    }

    #[test]
    fn repeated_kind_is_rejected() {
        let (grid, result) = parse("S:A1-A3;S:C1-C3;B:B1-B4");
        assert_eq!(result, Err(PlacementError::DuplicateShip(ShipKind::Submarine)));
        assert_eq!(grid.populated_count(), 0);

    }

    #[test]
    fn extra_tokens_are_counted_as_missing_ships() {
        let (grid, result) = parse("A:A1-A5;B:B1-B4;S:C1-C3;A:J1-J5");
        assert_eq!(result, Err(PlacementError::MissingShips { found: 4 }));
        assert_eq!(grid.populated_count(), 0);

        let (_, result) = parse("A:A1-A5;B:B1-B4;S:C1-C3;S:E1-E3;B:F1-F4");
        assert_eq!(result, Err(PlacementError::MissingShips { found: 5 }));

        // Extra tokens still have to be well formed.
        let (_, result) = parse("A:A1-A5;B:B1-B4;S:C1-C3;X:E1-E3");
        assert_eq!(result, Err(PlacementError::InvalidShipType('X')));
    }

    #[test]
    fn whitespace_is_only_allowed_around_tokens() {
        let (grid, result) = parse(" A:A1-A5 ;\tB:B1-B4; S:C1-C3\n");
        assert_eq!(result, Ok(()));
        assert!(grid.ready());

        for spec in &["A:A1 -A5;B:B1-B4;S:C1-C3", "A:A1-A5;B :B1-B4;S:C1-C3"] {
            let (_, result) = parse(spec);
            assert!(
                matches!(result, Err(PlacementError::InvalidFormat(_))),
                "{:?} gave {:?}",
                spec,
                result
            );
        }
    }

    #[test]
    fn parsing_clears_previous_contents() {
        let mut grid = Grid::new();
        parse_placements("A:A1-A5;B:B1-B4;S:C1-C3", &mut grid).unwrap();
        parse_placements("A:J1-J5;B:I1-I4;S:H1-H3", &mut grid).unwrap();
        assert_eq!(grid.populated_count(), ShipKind::FLEET_CELLS);
        assert!(!grid[coord("A1")].is_populated());
    }

    #[test]
    fn display_round_trips_through_the_parser() {
        let spec = "A:A1-A5;B:(B4-B1);S:c1-e1";
        let placements: Vec<Placement> = spec.split(';').map(|t| t.parse().unwrap()).collect();
        let formatted = format_spec(&placements);
        assert_eq!(formatted, "A:A1-A5;B:B4-B1;S:C1-E1");

        let (a, _) = parse(spec);
        let (b, result) = parse(&formatted);
        assert_eq!(result, Ok(()));
        assert_eq!(a, b);
    }

    #[test]
    fn from_origin_refuses_to_run_off_the_grid() {
        let origin = coord("H1");
        assert!(Placement::from_origin(ShipKind::Carrier, origin, Orientation::Horizontal).is_err());
        let placement =
            Placement::from_origin(ShipKind::Submarine, origin, Orientation::Horizontal).unwrap();
        assert_eq!(placement.end(), coord("J1"));
        let cells: Vec<_> = placement.cells().collect();
        assert_eq!(cells, vec![coord("H1"), coord("I1"), coord("J1")]);
    }
}
