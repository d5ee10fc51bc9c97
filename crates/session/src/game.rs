use std::collections::VecDeque;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use twenty48_engine::engine::{Board, Move, Spawn};

use crate::config::GameConfig;
use crate::store::BestScoreStore;

/// Game lifecycle. `Won` and `Lost` are terminal: directional inputs
/// are ignored until `restart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Monotonically increasing tile identity, scoped to one session and
/// reset on restart. Views use it to animate individual tiles.
pub type TileId = u64;

/// A spawn as seen by the view layer: which tile, where, what value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    pub id: TileId,
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// What one directional input did. A rejected input (terminal state,
/// or a slide that changes nothing) reports `moved: false` and has no
/// other effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub moved: bool,
    /// Merge points produced by this move (reported even when score
    /// tracking is off; only accumulated when it is on).
    pub score_gained: u64,
    pub spawned: Option<SpawnedTile>,
    pub status: Status,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    board: Board,
    score: u64,
}

/// The owning controller: board, score, status, undo history and the
/// tile-id counter, updated atomically per accepted move. The RNG is
/// injected; production callers use the `StdRng` default, tests seed
/// it for reproducible spawns.
pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    board: Board,
    score: u64,
    status: Status,
    history: VecDeque<Snapshot>,
    next_tile_id: TileId,
    store: Option<BestScoreStore>,
}

impl Game<StdRng> {
    /// Fresh game with entropy-seeded spawns.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Fresh game with a fixed seed; every spawn is reproducible.
    pub fn from_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Fresh game over a caller-supplied random source.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut game = Self {
            config,
            rng,
            board: Board::EMPTY,
            score: 0,
            status: Status::Playing,
            history: VecDeque::new(),
            next_tile_id: 0,
            store: None,
        };
        game.restart();
        game
    }

    /// Attach a best-score store; `step` feeds it whenever the
    /// tracked score improves on the stored best.
    pub fn with_store(mut self, store: BestScoreStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Drop to a fresh `Playing` state: empty history, score 0, a new
    /// two-tile board, tile ids restarted from zero. Returns the two
    /// starting tiles.
    pub fn restart(&mut self) -> Vec<SpawnedTile> {
        self.board = Board::EMPTY;
        self.score = 0;
        self.status = Status::Playing;
        self.history.clear();
        self.next_tile_id = 0;
        let mut starters = Vec::with_capacity(2);
        for _ in 0..2 {
            if let Some((board, spawn)) = self.board.spawn_random(&mut self.rng) {
                self.board = board;
                starters.push(self.mint(spawn));
            }
        }
        debug!("restarted with starting tiles {starters:?}");
        starters
    }

    /// Apply one directional input.
    ///
    /// Ignored unless `Playing` and the slide actually changes the
    /// board. An accepted move pushes an undo snapshot, applies the
    /// slide, spawns exactly one tile, then resolves the status:
    /// win threshold first, dead-board check second.
    pub fn step(&mut self, direction: Move) -> StepOutcome {
        if self.status != Status::Playing {
            return self.rejected();
        }
        let outcome = self.board.apply(direction);
        if !outcome.moved {
            return self.rejected();
        }

        self.push_snapshot();
        self.board = outcome.board;
        if self.config.track_score {
            self.score += outcome.score_gained;
        }

        let spawned = match self.board.spawn_random(&mut self.rng) {
            Some((board, spawn)) => {
                self.board = board;
                Some(self.mint(spawn))
            }
            // unreachable in practice: a changed board has a free cell
            None => None,
        };

        if let Some(target) = self.config.win_threshold {
            if self.board.reached(target, self.config.win_exact) {
                debug!("won: reached {target}");
                self.status = Status::Won;
            }
        }
        if self.status == Status::Playing && !self.board.has_moves() {
            debug!("lost at score {}", self.score);
            self.status = Status::Lost;
        }

        if self.config.track_score {
            if let Some(store) = &mut self.store {
                store.observe(self.score);
            }
        }

        StepOutcome {
            moved: true,
            score_gained: outcome.score_gained,
            spawned,
            status: self.status,
        }
    }

    /// Revert the last accepted move. Allowed while `Playing` (and
    /// from `Lost`, reviving the game); a `Won` game only restarts.
    /// Returns false when there is nothing to revert.
    pub fn undo(&mut self) -> bool {
        if self.status == Status::Won {
            return false;
        }
        match self.history.pop_back() {
            Some(snap) => {
                self.board = snap.board;
                self.score = snap.score;
                self.status = Status::Playing;
                true
            }
            None => false,
        }
    }

    /// Restore an externally saved position (board and score). The
    /// history is cleared and the status recomputed from the board.
    pub fn load_position(&mut self, board: Board, score: u64) {
        self.board = board;
        self.score = score;
        self.history.clear();
        self.status = if self
            .config
            .win_threshold
            .is_some_and(|t| board.reached(t, self.config.win_exact))
        {
            Status::Won
        } else if board.has_moves() {
            Status::Playing
        } else {
            Status::Lost
        };
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Best score seen by the attached store, if any.
    pub fn best_score(&self) -> Option<u64> {
        self.store.as_ref().map(|s| s.best())
    }

    /// Moves currently available to `undo`.
    pub fn undo_depth_available(&self) -> usize {
        self.history.len()
    }

    fn rejected(&self) -> StepOutcome {
        StepOutcome {
            moved: false,
            score_gained: 0,
            spawned: None,
            status: self.status,
        }
    }

    fn push_snapshot(&mut self) {
        if self.config.undo_depth == 0 {
            return;
        }
        if self.history.len() == self.config.undo_depth {
            self.history.pop_front();
        }
        self.history.push_back(Snapshot {
            board: self.board,
            score: self.score,
        });
    }

    fn mint(&mut self, spawn: Spawn) -> SpawnedTile {
        let id = self.next_tile_id;
        self.next_tile_id += 1;
        SpawnedTile {
            id,
            row: spawn.row(),
            col: spawn.col(),
            value: spawn.value,
        }
    }
}
