//! The fixed fleet every player places: one carrier, one battleship and one submarine.
use std::fmt;

use enumflags2::BitFlags;

/// Kind of ship. Each grid holds exactly one ship of every kind.
///
/// Kinds are flags so that sets of them (ships placed, ships sunk) can be kept in a
/// [`BitFlags<ShipKind>`].
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ShipKind {
    /// Aircraft carrier: length 5, letter `A`.
    Carrier = 0b001,
    /// Battleship: length 4, letter `B`.
    Battleship = 0b010,
    /// Submarine: length 3, letter `S`.
    Submarine = 0b100,
}

impl ShipKind {
    /// Every ship kind, in the order they are listed in a placement spec.
    pub const ALL: &'static [ShipKind] =
        &[ShipKind::Carrier, ShipKind::Battleship, ShipKind::Submarine];

    /// Number of cells occupied by the whole fleet.
    pub const FLEET_CELLS: usize = 12;

    /// Get the length of this ship kind.
    pub fn len(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Submarine => 3,
        }
    }

    /// Stable index of this kind in [`ShipKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShipKind::Carrier => 0,
            ShipKind::Battleship => 1,
            ShipKind::Submarine => 2,
        }
    }

    /// Letter used for this kind in placement specs.
    pub fn letter(self) -> char {
        match self {
            ShipKind::Carrier => 'A',
            ShipKind::Battleship => 'B',
            ShipKind::Submarine => 'S',
        }
    }

    /// Look up a ship kind by its placement letter, ignoring case.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(ShipKind::Carrier),
            'B' => Some(ShipKind::Battleship),
            'S' => Some(ShipKind::Submarine),
            _ => None,
        }
    }

    /// Human readable name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "aircraft carrier",
            ShipKind::Battleship => "battleship",
            ShipKind::Submarine => "submarine",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}
