//! twenty48-session: the thin owning controller over the grid engine.
//!
//! A `Game` holds the board/score/status triple, sequences engine
//! calls on each directional input, keeps a bounded undo stack, and
//! mints session-scoped tile ids for spawned tiles. The optional
//! `BestScoreStore` persists the single best-score scalar across
//! sessions; everything else dies with the `Game`.
//!
//! Variants of the game (score tracking + undo vs. win threshold
//! without score) are one engine plus `GameConfig`, never forks.
//!
//! ```
//! use twenty48_session::{Game, GameConfig, Status};
//! use twenty48_engine::engine::Move;
//!
//! let mut game = Game::from_seed(GameConfig::default(), 42);
//! assert_eq!(game.status(), Status::Playing);
//! assert_eq!(game.board().count_empty(), 14); // two starting tiles
//!
//! let out = game.step(Move::Left);
//! if out.moved {
//!     // an accepted move always spawns exactly one tile
//!     assert!(out.spawned.is_some());
//! }
//! ```

pub mod config;
pub mod game;
pub mod store;

pub use config::GameConfig;
pub use game::{Game, SpawnedTile, Status, StepOutcome, TileId};
pub use store::BestScoreStore;
