use crate::config::GameConfig;
use crate::domain::{Atom, AtomGame, GameError, GameResult, GridPos, Player};

/// Upper bound on explode cycles run by a single `settle`.
pub const SETTLE_LIMIT: usize = 10_000;

/// GameState drives the engine for the front end.
/// It owns the explode cadence and layers win detection on top of the board.
#[derive(Debug)]
pub struct GameState {
    pub game: AtomGame,
    pub is_running: bool,
    pub explode_timer: f32,
    pub explode_interval: f32,
    /// Explode cycles that actually burst something
    pub cycles: u64,
    pub winner: Option<Player>,
    /// Bumped on every restart so views can drop stale atoms
    pub restarts: u64,
}

impl GameState {
    /// Create game state with the configured board and cadence
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        Ok(Self {
            game: AtomGame::new(config.width, config.height)?,
            is_running: true,
            explode_timer: 0.0,
            explode_interval: config.explode_interval_secs,
            cycles: 0,
            winner: None,
            restarts: 0,
        })
    }

    /// Current player may place at `pos` and nobody has won yet.
    pub fn can_place(&self, pos: GridPos) -> bool {
        self.winner.is_none() && self.game.can_add_atom(pos)
    }

    /// Place an atom for the current player, refusing illegal moves.
    pub fn place(&mut self, pos: GridPos) -> GameResult<Atom> {
        if let Some(winner) = self.winner {
            return Err(GameError::GameOver { winner });
        }
        let atom = self.game.try_add_atom(pos)?;
        log::info!(
            "player {} placed at ({}, {}), player {} to move",
            atom.player(),
            pos.x,
            pos.y,
            self.game.current_player()
        );
        Ok(atom)
    }

    /// Toggle play/pause of the explode cadence
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        log::debug!("explode cadence {}", if self.is_running { "resumed" } else { "paused" });
        self
    }

    /// Fresh board, same listeners
    pub fn restart(mut self) -> Self {
        self.game.reset();
        self.explode_timer = 0.0;
        self.cycles = 0;
        self.winner = None;
        self.restarts += 1;
        self
    }

    /// Advance the cadence by one frame, exploding when the interval elapses
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running || self.winner.is_some() {
            return self;
        }

        self.explode_timer += delta_time;
        if self.explode_timer >= self.explode_interval {
            self.explode_timer -= self.explode_interval;
            self.step();
        }

        self
    }

    /// Run a single explode cycle now. A winner is only decided once the
    /// board has settled.
    pub fn step(&mut self) -> usize {
        let burst = self.game.explode();
        if burst > 0 {
            self.cycles += 1;
            if self.game.is_stable() {
                self.update_winner();
            }
        }
        burst
    }

    /// Explode until the board is stable or a winner emerges.
    /// Returns the number of cycles that burst something.
    pub fn settle(&mut self) -> usize {
        let mut ran = 0;
        while ran < SETTLE_LIMIT && self.winner.is_none() && self.step() > 0 {
            ran += 1;
        }
        if ran == SETTLE_LIMIT {
            log::warn!("board still unstable after {SETTLE_LIMIT} explode cycles");
        }
        ran
    }

    /// A player wins once both have moved and every atom on the board is theirs.
    fn update_winner(&mut self) {
        if self.winner.is_some() || self.game.turns_played() < 2 {
            return;
        }

        let winner = match (
            self.game.atom_count(Player::One),
            self.game.atom_count(Player::Two),
        ) {
            (0, 0) => None,
            (_, 0) => Some(Player::One),
            (0, _) => Some(Player::Two),
            _ => None,
        };

        if let Some(player) = winner {
            log::info!("player {player} wins after {} explode cycles", self.cycles);
            self.winner = Some(player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(size: usize) -> GameState {
        let config = GameConfig {
            width: size,
            height: size,
            ..GameConfig::default()
        };
        GameState::new(&config).unwrap()
    }

    fn at(x: usize, y: usize) -> GridPos {
        GridPos::new(x, y)
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut s = state(10);
        s.place(at(0, 0)).unwrap();
        s.place(at(9, 9)).unwrap();
        s.place(at(0, 0)).unwrap();

        s = s.tick(0.5);
        assert_eq!(s.game.occupancy(at(0, 0)), Ok(2));
        s = s.tick(0.5);
        assert_eq!(s.game.occupancy(at(0, 0)), Ok(0));
        assert_eq!(s.cycles, 1);
    }

    #[test]
    fn test_tick_carries_time_past_the_interval() {
        let mut s = state(10);
        for pos in [at(0, 0), at(9, 9), at(5, 5), at(9, 9)] {
            s.place(pos).unwrap();
        }

        // One long frame bursts (9,9) and keeps the time left over.
        s = s.tick(1.5);
        assert_eq!(s.cycles, 1);
        assert!((s.explode_timer - 0.5).abs() < 1e-6);

        s.place(at(0, 0)).unwrap();
        s = s.tick(0.5);
        assert_eq!(s.cycles, 2);
        assert_eq!(s.game.occupancy(at(0, 0)), Ok(0));
    }

    #[test]
    fn test_paused_cadence_does_not_explode() {
        let mut s = state(10);
        s.place(at(0, 0)).unwrap();
        s.place(at(9, 9)).unwrap();
        s.place(at(0, 0)).unwrap();
        s = s.toggle_running().tick(5.0);
        assert_eq!(s.game.occupancy(at(0, 0)), Ok(2));
    }

    #[test]
    fn test_place_rejects_opponent_cell() {
        let mut s = state(10);
        s.place(at(4, 4)).unwrap();
        assert!(matches!(s.place(at(4, 4)), Err(GameError::IllegalMove { .. })));
        assert!(!s.can_place(at(4, 4)));
    }

    #[test]
    fn test_capture_of_last_atom_wins() {
        let mut s = state(3);
        // Player two's lone atom next to a corner player one is about to burst.
        s.place(at(0, 0)).unwrap();
        s.place(at(1, 0)).unwrap();
        s.place(at(0, 0)).unwrap();

        s.settle();

        assert_eq!(s.winner, Some(Player::One));
        assert_eq!(s.game.atom_count(Player::Two), 0);
        assert!(matches!(s.place(at(2, 2)), Err(GameError::GameOver { winner: Player::One })));
    }

    #[test]
    fn test_winner_waits_for_stable_board() {
        let mut s = state(2);
        // Capturing (1,0) leaves it over capacity; the win only counts once it bursts.
        s.place(at(0, 0)).unwrap();
        s.place(at(1, 0)).unwrap();
        s.place(at(0, 0)).unwrap();

        assert_eq!(s.step(), 1);
        assert_eq!(s.game.atom_count(Player::Two), 0);
        assert!(!s.game.is_stable());
        assert_eq!(s.winner, None);

        s.settle();
        assert!(s.game.is_stable());
        assert_eq!(s.winner, Some(Player::One));

        for _ in 0..10 {
            s = s.tick(1.0);
            assert!(s.winner.is_none() || s.game.is_stable());
        }
        assert_eq!(s.game.occupancy(at(1, 0)), Ok(0));
    }

    #[test]
    fn test_no_winner_while_both_have_atoms() {
        let mut s = state(5);
        s.place(at(0, 0)).unwrap();
        s.place(at(4, 4)).unwrap();
        s.place(at(0, 0)).unwrap();
        s.settle();
        assert_eq!(s.winner, None);
    }

    #[test]
    fn test_restart_clears_winner_and_board() {
        let mut s = state(3);
        s.place(at(0, 0)).unwrap();
        s.place(at(1, 0)).unwrap();
        s.place(at(0, 0)).unwrap();
        s.settle();
        assert!(s.winner.is_some());

        let s = s.restart();
        assert_eq!(s.winner, None);
        assert_eq!(s.restarts, 1);
        assert!(s.game.is_stable());
        assert!(s.can_place(at(0, 0)));
    }
}
