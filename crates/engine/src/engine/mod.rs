//! Engine module: compact 2048 board, slide/merge moves, and
//! precomputed per-line lookup tables. Public API stays small.
//!
//! - `Board` is the packed 4x4 state with useful methods.
//! - Free functions mirror the methods when convenient (e.g. `shift`).
//! - Internals (tables and hot ops) live in submodules.

mod ops;
pub mod state;
mod tables;

pub use state::{Board, Move, MoveOutcome, Spawn};

pub use ops::{
    apply, count_empty, has_any_legal_move, has_reached_target, highest_tile, board_score, shift,
    slide_line, spawn_random_tile,
};

/// Force the per-line lookup tables to be built now.
///
/// Tables are otherwise built lazily on the first move; call this to
/// take the one-time cost up front. Safe to call multiple times.
pub fn init() {
    tables::init();
}
