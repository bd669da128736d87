//! Per-player damage bookkeeping.
use enumflags2::BitFlags;

use crate::ships::ShipKind;

/// A player's name and how much of their fleet is still afloat.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PlayerStats {
    /// Name entered by the player.
    name: String,

    /// Unhit cells per ship kind, indexed by [`ShipKind::index`].
    remaining: [usize; 3],

    /// Kinds whose cells have all been hit. Kept in step with `remaining`.
    sunk: BitFlags<ShipKind>,
}

impl PlayerStats {
    /// Stats for a player with an untouched fleet.
    pub fn new(name: impl Into<String>) -> Self {
        let mut remaining = [0; 3];
        for &kind in ShipKind::ALL {
            remaining[kind.index()] = kind.len();
        }
        Self {
            name: name.into(),
            remaining,
            sunk: BitFlags::empty(),
        }
    }

    /// The player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Unhit cells left on the ship of the given kind.
    pub fn remaining(&self, kind: ShipKind) -> usize {
        self.remaining[kind.index()]
    }

    /// Whether the ship of the given kind has been sunk.
    pub fn is_sunk(&self, kind: ShipKind) -> bool {
        self.sunk.contains(kind)
    }

    /// Set of sunk ship kinds.
    pub fn sunk(&self) -> BitFlags<ShipKind> {
        self.sunk
    }

    /// Whether every ship has been sunk.
    pub fn all_sunk(&self) -> bool {
        self.sunk == BitFlags::all()
    }

    /// Total cells of this player's fleet that have been hit.
    pub fn hits_taken(&self) -> usize {
        ShipKind::ALL
            .iter()
            .map(|&kind| kind.len() - self.remaining(kind))
            .sum()
    }

    /// Record a hit on the ship of the given kind. Returns true if this hit sank it.
    pub(crate) fn record_hit(&mut self, kind: ShipKind) -> bool {
        let left = &mut self.remaining[kind.index()];
        if *left == 0 {
            return false;
        }
        *left -= 1;
        if *left == 0 {
            self.sunk.insert(kind);
            true
        } else {
            false
        }
    }
}
