//! The two-player game: fleet placement, alternating fire and win detection.
//!
//! A [`GameState`] is owned by whatever drives the game (a terminal loop, a UI
//! controller) and is advanced one user action at a time:
//!
//! 1. [`GameState::submit_placement`] once for each player, in order.
//! 2. [`GameState::fire_at`] by the player whose turn it is, against the other player.
//! 3. [`GameState::dismiss_result`] once the result has been shown, which either hands
//!    the turn over or ends the game.
use std::fmt;

use crate::{
    board::{parse_placements, CellView, Coordinate, Grid},
    score::{compute_score, LeaderboardEntry},
    ships::ShipKind,
};

pub use self::{
    errors::{CannotShootReason, SetupError},
    stats::PlayerStats,
};

mod errors;
mod stats;

/// Player ID. Either `P1` or `P2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Both players, in turn order.
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// `0` for `P1`, `1` for `P2`.
    pub fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::P1 => f.pad("Player 1"),
            Player::P2 => f.pad("Player 2"),
        }
    }
}

/// Phase of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// The given player has to submit their fleet.
    Placement(Player),
    /// The given player may fire at their opponent.
    Firing(Player),
    /// The game is over.
    Finished { winner: Player },
}

/// Outcome of a shot that was fired.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// Nothing was hit.
    Miss,
    /// The given ship was hit but it was not sunk.
    Hit(ShipKind),
    /// The given ship was hit and sunk but the target still has other ships.
    Sunk(ShipKind),
    /// The given ship was hit and sunk, and the target has no ships left.
    Victory(ShipKind),
}

impl ShotOutcome {
    /// The kind of ship that was hit, if any.
    pub fn ship(self) -> Option<ShipKind> {
        match self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(kind) | ShotOutcome::Sunk(kind) | ShotOutcome::Victory(kind) => {
                Some(kind)
            }
        }
    }

    /// Whether the shot sank a ship.
    pub fn sank(self) -> bool {
        matches!(self, ShotOutcome::Sunk(_) | ShotOutcome::Victory(_))
    }
}

/// A fired shot, waiting to be acknowledged with [`GameState::dismiss_result`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShotReport {
    /// Player who fired.
    pub shooter: Player,
    /// Player whose board was fired on.
    pub target: Player,
    /// Cell that was fired on.
    pub coord: Coordinate,
    /// What the shot did.
    pub outcome: ShotOutcome,
}

/// What happened when a shot result was dismissed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Resolution {
    /// The turn passed to the given player.
    NextTurn(Player),
    /// The shot ended the game.
    Finished { winner: Player, score: i32 },
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Boards indexed by [`Player::index`].
    grids: [Grid; 2],

    /// Stats indexed by [`Player::index`].
    stats: [PlayerStats; 2],

    phase: Phase,

    /// The shot whose result is on screen. While set, no further shots are accepted.
    pending: Option<ShotReport>,
}

impl GameState {
    /// Start a new game with empty boards, waiting for player 1's fleet.
    pub fn new() -> Self {
        Self {
            grids: [Grid::new(), Grid::new()],
            stats: [PlayerStats::new(""), PlayerStats::new("")],
            phase: Phase::Placement(Player::P1),
            pending: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player expected to act next: the one placing, the one firing, or the winner.
    pub fn current_turn(&self) -> Player {
        match self.phase {
            Phase::Placement(player) | Phase::Firing(player) => player,
            Phase::Finished { winner } => winner,
        }
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Whether a shot result is waiting to be dismissed.
    pub fn overlay_active(&self) -> bool {
        self.pending.is_some()
    }

    /// The shot waiting to be dismissed, if any.
    pub fn pending_shot(&self) -> Option<&ShotReport> {
        self.pending.as_ref()
    }

    /// The given player's board.
    pub fn grid(&self, player: Player) -> &Grid {
        &self.grids[player.index()]
    }

    /// The given player's stats.
    pub fn stats(&self, player: Player) -> &PlayerStats {
        &self.stats[player.index()]
    }

    /// What to draw for a cell of the given player's board. Ships are included; use
    /// [`CellView::concealed`] when showing the board to the opponent.
    pub fn cell_view(&self, player: Player, coord: Coordinate) -> CellView {
        self.grid(player).cell_view(coord)
    }

    /// Submit the fleet of the player whose turn it is to place.
    ///
    /// On success the player's name is recorded and the game moves on to the next
    /// player's placement, or to player 1's first shot. On failure the player's board is
    /// left empty and the phase does not change, so the player can simply try again.
    pub fn submit_placement(&mut self, name: &str, spec: &str) -> Result<Phase, SetupError> {
        let player = match self.phase {
            Phase::Placement(player) => player,
            _ => return Err(SetupError::PlacementClosed),
        };
        parse_placements(spec, &mut self.grids[player.index()])?;
        self.stats[player.index()].set_name(name);
        self.phase = match player {
            Player::P1 => Phase::Placement(Player::P2),
            Player::P2 => Phase::Firing(Player::P1),
        };
        log::info!("{} ({:?}) placed their fleet", player, name);
        Ok(self.phase)
    }

    /// Fire at a cell of the target player's board on behalf of the player whose turn
    /// it is.
    ///
    /// Shots are rejected, with no effect at all, while a previous result is still on
    /// screen, when aimed at the shooter's own board, at a cell already fired on, or
    /// outside the firing phase.
    pub fn fire_at(
        &mut self,
        target: Player,
        coord: Coordinate,
    ) -> Result<ShotReport, CannotShootReason> {
        let result = self.try_fire(target, coord);
        match &result {
            Ok(report) => log::info!(
                "{} fired at {} on {}'s board: {:?}",
                report.shooter,
                coord,
                target,
                report.outcome
            ),
            Err(reason) => log::debug!("ignored shot at {} on {}'s board: {}", coord, target, reason),
        }
        result
    }

    fn try_fire(
        &mut self,
        target: Player,
        coord: Coordinate,
    ) -> Result<ShotReport, CannotShootReason> {
        let shooter = match self.phase {
            Phase::Firing(player) => player,
            Phase::Placement(_) => return Err(CannotShootReason::NotFiring),
            Phase::Finished { .. } => return Err(CannotShootReason::GameOver),
        };
        if self.pending.is_some() {
            return Err(CannotShootReason::OverlayActive);
        }
        if target == shooter {
            return Err(CannotShootReason::OwnBoard);
        }
        let hit = self.grids[target.index()]
            .shoot(coord)
            .ok_or(CannotShootReason::AlreadyShot)?;

        let outcome = match hit {
            None => ShotOutcome::Miss,
            Some(kind) => {
                let stats = &mut self.stats[target.index()];
                match stats.record_hit(kind) {
                    true if stats.all_sunk() => ShotOutcome::Victory(kind),
                    true => ShotOutcome::Sunk(kind),
                    false => ShotOutcome::Hit(kind),
                }
            }
        };
        let report = ShotReport {
            shooter,
            target,
            coord,
            outcome,
        };
        self.pending = Some(report);
        Ok(report)
    }

    /// Acknowledge the result of the last shot.
    ///
    /// Ends the game if the target's whole fleet is sunk, otherwise hands the turn to
    /// the other player. Returns `None` and does nothing if no result is pending.
    pub fn dismiss_result(&mut self) -> Option<Resolution> {
        let report = self.pending.take()?;
        let resolution = if self.stats(report.target).all_sunk() {
            let winner = report.shooter;
            self.phase = Phase::Finished { winner };
            let score = compute_score(self.stats(winner));
            log::info!("{} won with a score of {}", winner, score);
            Resolution::Finished { winner, score }
        } else {
            let next = report.shooter.opponent();
            self.phase = Phase::Firing(next);
            Resolution::NextTurn(next)
        };
        Some(resolution)
    }

    /// The winner's leaderboard entry, once the game is over.
    pub fn final_entry(&self) -> Option<LeaderboardEntry> {
        self.winner().map(|winner| {
            let stats = self.stats(winner);
            LeaderboardEntry::new(stats.name(), compute_score(stats))
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PlacementError;

    const P1_FLEET: &str = "A:A1-A5;B:B1-B4;S:C1-C3";
    const P2_FLEET: &str = "A:J6-J10;B:A10-D10;S:E5-G5";

    fn coord(label: &str) -> Coordinate {
        label.parse().unwrap()
    }

    fn started() -> GameState {
        let mut game = GameState::new();
        game.submit_placement("Ada", P1_FLEET).unwrap();
        game.submit_placement("Grace", P2_FLEET).unwrap();
        game
    }

    /// Fire and immediately dismiss.
    fn volley(game: &mut GameState, target: Player, label: &str) -> (ShotOutcome, Resolution) {
        let report = game.fire_at(target, coord(label)).unwrap();
        (report.outcome, game.dismiss_result().unwrap())
    }

    #[test]
    fn placement_moves_through_both_players() {
        let mut game = GameState::new();
        assert_eq!(game.phase(), Phase::Placement(Player::P1));
        assert_eq!(
            game.submit_placement("Ada", P1_FLEET),
            Ok(Phase::Placement(Player::P2))
        );
        assert_eq!(
            game.submit_placement("Grace", P2_FLEET),
            Ok(Phase::Firing(Player::P1))
        );
        assert_eq!(game.current_turn(), Player::P1);
        assert_eq!(game.stats(Player::P1).name(), "Ada");
        assert_eq!(game.stats(Player::P2).name(), "Grace");
        assert_eq!(
            game.submit_placement("Late", P1_FLEET),
            Err(SetupError::PlacementClosed)
        );
    }

    #[test]
    fn rejected_placement_keeps_the_player_placing() {
        let mut game = GameState::new();
        assert_eq!(
            game.submit_placement("Ada", "A:A1-A5;B:B1-B4"),
            Err(SetupError::Placement(PlacementError::MissingShips { found: 2 }))
        );
        assert_eq!(game.phase(), Phase::Placement(Player::P1));
        assert_eq!(game.grid(Player::P1).populated_count(), 0);
        assert_eq!(game.stats(Player::P1).name(), "");

        game.submit_placement("Ada", P1_FLEET).unwrap();
        assert_eq!(game.phase(), Phase::Placement(Player::P2));
    }

    #[test]
    fn cannot_fire_during_placement() {
        let mut game = GameState::new();
        assert_eq!(
            game.fire_at(Player::P2, coord("A1")),
            Err(CannotShootReason::NotFiring)
        );
    }

    #[test]
    fn shooting_own_board_is_ignored() {
        let mut game = started();
        assert_eq!(
            game.fire_at(Player::P1, coord("A1")),
            Err(CannotShootReason::OwnBoard)
        );
        assert!(!game.overlay_active());
        assert_eq!(game.cell_view(Player::P1, coord("A1")), CellView::Ship(ShipKind::Carrier));
        assert_eq!(game.stats(Player::P1).remaining(ShipKind::Carrier), 5);
    }

    #[test]
    fn overlay_blocks_until_dismissed_then_turn_passes() {
        let mut game = started();
        let report = game.fire_at(Player::P2, coord("E5")).unwrap();
        assert_eq!(report.shooter, Player::P1);
        assert_eq!(report.outcome, ShotOutcome::Hit(ShipKind::Submarine));
        assert!(game.overlay_active());
        assert_eq!(game.pending_shot(), Some(&report));

        assert_eq!(
            game.fire_at(Player::P2, coord("F5")),
            Err(CannotShootReason::OverlayActive)
        );
        assert_eq!(game.cell_view(Player::P2, coord("F5")), CellView::Ship(ShipKind::Submarine));

        assert_eq!(game.dismiss_result(), Some(Resolution::NextTurn(Player::P2)));
        assert!(!game.overlay_active());
        assert_eq!(game.phase(), Phase::Firing(Player::P2));
        assert_eq!(game.dismiss_result(), None);
        assert_eq!(game.phase(), Phase::Firing(Player::P2));
    }

    #[test]
    fn miss_is_recorded_on_the_target_board() {
        let mut game = started();
        let (outcome, _) = volley(&mut game, Player::P2, "A1");
        assert_eq!(outcome, ShotOutcome::Miss);
        assert_eq!(game.cell_view(Player::P2, coord("A1")), CellView::Miss);
        assert!(game.grid(Player::P2)[coord("A1")].is_miss());
    }

    #[test]
    fn repeated_shot_is_ignored() {
        let mut game = started();
        volley(&mut game, Player::P2, "J6");
        volley(&mut game, Player::P1, "J1");

        assert_eq!(
            game.fire_at(Player::P2, coord("J6")),
            Err(CannotShootReason::AlreadyShot)
        );
        assert!(!game.overlay_active());
        assert_eq!(game.stats(Player::P2).remaining(ShipKind::Carrier), 4);
        assert_eq!(game.current_turn(), Player::P1);
    }

    #[test]
    fn sinking_the_whole_fleet_ends_the_game() {
        let mut game = started();
        let targets = [
            "E5", "F5", "G5", "A10", "B10", "C10", "D10", "J6", "J7", "J8", "J9", "J10",
        ];
        // Player 2 takes two hits on the carrier and misses otherwise.
        let replies = ["A1", "A2", "E1", "E2", "E3", "E4", "E5", "E6", "E7", "E8", "E9"];

        for (i, target) in targets.iter().enumerate() {
            let (outcome, resolution) = volley(&mut game, Player::P2, target);
            match i {
                2 => assert_eq!(outcome, ShotOutcome::Sunk(ShipKind::Submarine)),
                6 => assert_eq!(outcome, ShotOutcome::Sunk(ShipKind::Battleship)),
                11 => {
                    assert_eq!(outcome, ShotOutcome::Victory(ShipKind::Carrier));
                    assert_eq!(
                        resolution,
                        Resolution::Finished {
                            winner: Player::P1,
                            score: 20,
                        }
                    );
                    break;
                }
                _ => assert!(matches!(outcome, ShotOutcome::Hit(_))),
            }
            assert_eq!(resolution, Resolution::NextTurn(Player::P2));
            volley(&mut game, Player::P1, replies[i]);
        }

        assert_eq!(game.phase(), Phase::Finished { winner: Player::P1 });
        assert_eq!(game.winner(), Some(Player::P1));
        assert!(game.stats(Player::P2).all_sunk());
        assert!(!game.stats(Player::P1).all_sunk());
        assert_eq!(
            game.fire_at(Player::P1, coord("J10")),
            Err(CannotShootReason::GameOver)
        );
        assert_eq!(game.final_entry(), Some(LeaderboardEntry::new("Ada", 20)));
    }

    #[test]
    fn player_two_can_win() {
        let mut game = started();
        let p1_cells = [
            "A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "C1", "C2", "C3",
        ];
        let p1_misses = ["A6", "A7", "A8", "A9", "B5", "B6", "B7", "B8", "B9", "C4", "C5", "C6"];
        let mut last = None;
        for (target, miss) in p1_cells.iter().zip(p1_misses.iter()) {
            volley(&mut game, Player::P2, miss);
            let (_, resolution) = volley(&mut game, Player::P1, target);
            last = Some(resolution);
        }
        assert_eq!(
            last,
            Some(Resolution::Finished {
                winner: Player::P2,
                score: 24,
            })
        );
        assert_eq!(game.final_entry(), Some(LeaderboardEntry::new("Grace", 24)));
    }
}
