//! Scores and the ten-slot high-score table.
//!
//! The table lives in a [`ScoreStore`] under the keys `score0` to `score9`. Each value
//! is written as `<name>:<score>`. Slots are filled in index order and, once all are
//! taken, the lowest score is replaced by any strictly better one. The table is shown
//! in slot order, not sorted by score.
use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::game::PlayerStats;

pub use self::store::{JsonFileStore, MemoryStore, ScoreStore, StoreError};

pub mod store;

/// Number of slots in the leaderboard.
pub const SLOT_COUNT: usize = 10;

/// Score for winning without a single hit taken.
pub const MAX_SCORE: i32 = 24;

/// Score of a winner: 24, minus 2 for every cell of their own fleet that was hit.
pub fn compute_score(stats: &PlayerStats) -> i32 {
    MAX_SCORE - 2 * stats.hits_taken() as i32
}

/// One name and score on the leaderboard.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct LeaderboardEntry {
    name: String,
    score: i32,
}

impl LeaderboardEntry {
    /// Create an entry for the given player name and score.
    pub fn new(name: impl Into<String>, score: i32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Name of the player.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Score the player won with.
    pub fn score(&self) -> i32 {
        self.score
    }
}

impl fmt::Display for LeaderboardEntry {
    /// Storage form, `<name>:<score>`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.score)
    }
}

/// Error returned for a stored value that is not `<name>:<score>`.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("malformed leaderboard entry {0:?}")]
pub struct ParseEntryError(String);

impl FromStr for LeaderboardEntry {
    type Err = ParseEntryError;

    /// Splits at the last colon, so a name may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, score) = s.rsplit_once(':').ok_or_else(|| ParseEntryError(s.to_owned()))?;
        let score = score
            .trim()
            .parse()
            .map_err(|_| ParseEntryError(s.to_owned()))?;
        Ok(Self::new(name, score))
    }
}

/// Contents of one leaderboard slot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Slot {
    /// Nothing stored.
    Empty,
    /// A well-formed entry.
    Occupied(LeaderboardEntry),
    /// A stored value that could not be parsed. It is neither shown nor replaced.
    Malformed(String),
}

/// The high-score table on top of a [`ScoreStore`].
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
}

impl<S: ScoreStore> Leaderboard<S> {
    /// Wrap a store. Nothing is read until the table is used.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store key of the given slot.
    pub fn slot_key(index: usize) -> String {
        format!("score{}", index)
    }

    /// Read one slot, or `None` if `index` is not below [`SLOT_COUNT`].
    pub fn slot(&self, index: usize) -> Option<Slot> {
        if index < SLOT_COUNT {
            Some(self.read_slot(index))
        } else {
            None
        }
    }

    fn read_slot(&self, index: usize) -> Slot {
        match self.store.get(&Self::slot_key(index)) {
            None => Slot::Empty,
            Some(raw) => match raw.parse() {
                Ok(entry) => Slot::Occupied(entry),
                Err(_) => Slot::Malformed(raw),
            },
        }
    }

    /// All well-formed entries, in slot order.
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        (0..SLOT_COUNT)
            .filter_map(|i| match self.read_slot(i) {
                Slot::Occupied(entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    /// Try to put an entry on the table.
    ///
    /// The first empty slot is used if there is one. Otherwise the entry replaces the
    /// lowest score, the earliest slot on ties, but only if it beats it. Returns the
    /// slot written, or `None` if the table did not change.
    pub fn record(&mut self, entry: &LeaderboardEntry) -> Result<Option<usize>, StoreError> {
        let mut lowest: Option<(usize, i32)> = None;
        for i in 0..SLOT_COUNT {
            match self.read_slot(i) {
                Slot::Empty => return self.write(i, entry).map(Some),
                Slot::Occupied(existing) => {
                    if lowest.map_or(true, |(_, score)| existing.score() < score) {
                        lowest = Some((i, existing.score()));
                    }
                }
                Slot::Malformed(raw) => {
                    log::warn!("skipping malformed leaderboard slot {}: {:?}", i, raw);
                }
            }
        }
        match lowest {
            Some((i, score)) if entry.score() > score => self.write(i, entry).map(Some),
            _ => {
                log::debug!("{} did not make the leaderboard", entry);
                Ok(None)
            }
        }
    }

    fn write(&mut self, index: usize, entry: &LeaderboardEntry) -> Result<usize, StoreError> {
        log::info!("recording {} in leaderboard slot {}", entry, index);
        self.store.set(&Self::slot_key(index), entry.to_string())?;
        Ok(index)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Extract the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}
