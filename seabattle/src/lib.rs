//! Two-player, same-device Battleship.
//!
//! Each player places a carrier (5), a battleship (4) and a submarine (3) on their own
//! 10x10 grid by typing a placement spec such as `A:A1-A5;B:B1-B4;S:C1-C3`. Players then
//! take turns firing at each other's grids. Every result has to be acknowledged before
//! the turn passes. The first player to sink the opposing fleet wins and is scored on
//! how little of their own fleet was hit, and the score may enter a ten-slot
//! high-score table.
//!
//! The crate holds only game state and rules. Drawing the boards and reading input is
//! left to the caller, which drives a [`game::GameState`] one action at a time.
//!
//! ```
//! use seabattle::{
//!     board::Coordinate,
//!     game::{GameState, Player, Resolution, ShotOutcome},
//!     ships::ShipKind,
//! };
//!
//! let mut game = GameState::new();
//! game.submit_placement("Ada", "A:A1-A5;B:B1-B4;S:C1-C3").unwrap();
//! game.submit_placement("Grace", "A:J6-J10;B:A10-D10;S:E5-G5").unwrap();
//!
//! let target: Coordinate = "E5".parse().unwrap();
//! let report = game.fire_at(Player::P2, target).unwrap();
//! assert_eq!(report.outcome, ShotOutcome::Hit(ShipKind::Submarine));
//! assert_eq!(game.dismiss_result(), Some(Resolution::NextTurn(Player::P2)));
//! ```

pub mod board;
pub mod game;
pub mod score;
pub mod ships;
