//! twenty48-engine: the pure grid engine for a 2048-style game.
//!
//! This crate provides:
//! - A compact `Board` type (`4x4` tiles packed into a `u64`) with
//!   ergonomic methods (`shift`, `apply`, `spawn_random`, ...)
//! - The four directional moves, all reduced to one slide/merge
//!   primitive over a single line
//! - Uniform random tile spawning with an injected RNG
//! - Terminal-state (`has_moves`) and win-target (`reached`) checks
//!
//! The engine is pure: no I/O, no global game state, and every move
//! operation is a total function over a well-formed board. The only
//! shared machinery is a lazily built set of per-line lookup tables.
//!
//! Quick start:
//! ```
//! use twenty48_engine::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let (b0, _) = Board::EMPTY.spawn_random(&mut rng).unwrap();
//! let (b0, _) = b0.spawn_random(&mut rng).unwrap();
//!
//! let out = b0.apply(Move::Left);
//! assert_eq!(out.moved, out.board != b0);
//! ```
//!
//! Prefer passing your own `Rng` everywhere randomness is consumed;
//! there is deliberately no thread-local fallback in this crate.

pub mod engine;
