use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ops;

// Internal type aliases for the packed representation
pub(crate) type BoardRaw = u64;
pub(crate) type Line = u16;
pub(crate) type Score = u64;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Result of applying a directional move to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after sliding/merging (no tile spawned yet).
    pub board: Board,
    /// True iff at least one cell differs from the pre-move board.
    pub moved: bool,
    /// Sum of all merged-tile values produced by this move.
    pub score_gained: Score,
}

/// A freshly spawned tile: where it landed and its face value (2 or 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    /// Row-major cell index, 0..16.
    pub cell: usize,
    /// Tile value, always 2 or 4.
    pub value: u32,
}

impl Spawn {
    #[inline]
    pub fn row(&self) -> usize {
        self.cell / 4
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.cell % 4
    }
}

/// Packed 4x4 2048 board as 16 4-bit nibbles in a `u64`.
///
/// Each nibble stores the tile's exponent (1 for 2, 2 for 4, ...; 0 is
/// an empty cell), row-major from the most significant nibble. Public
/// methods speak in face values; the raw packed form stays available
/// as an escape hatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) BoardRaw);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(0);

    /// Construct a `Board` from its raw packed representation.
    #[inline]
    pub fn from_raw(raw: BoardRaw) -> Self {
        Board(raw)
    }

    /// Consume this `Board`, returning the raw packed `u64`.
    #[inline]
    pub fn into_raw(self) -> BoardRaw {
        self.0
    }

    /// Borrow the raw packed `u64` for this `Board`.
    #[inline]
    pub fn raw(&self) -> BoardRaw {
        self.0
    }

    /// Build a board from face values (0 = empty, otherwise a power of
    /// two >= 2), row-major.
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// let b = Board::from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.tile_value(0), 2);
    /// assert_eq!(b.tile_value(2), 4);
    /// assert_eq!(b.count_empty(), 13);
    /// ```
    pub fn from_rows(rows: [[u32; 4]; 4]) -> Self {
        let mut raw: BoardRaw = 0;
        for (r, row) in rows.iter().enumerate() {
            for (c, &val) in row.iter().enumerate() {
                debug_assert!(
                    val == 0 || (val >= 2 && val <= 32768 && val.is_power_of_two()),
                    "cell value must be 0 or a power of two in 2..=32768, got {val}"
                );
                let exp = if val == 0 { 0 } else { val.trailing_zeros() as u64 };
                raw |= (exp & 0xf) << (60 - 4 * (r * 4 + c));
            }
        }
        Board(raw)
    }

    /// Face values (0 = empty), row-major, for rendering.
    pub fn to_rows(self) -> [[u32; 4]; 4] {
        let mut rows = [[0u32; 4]; 4];
        for (idx, exp) in self.tiles().enumerate() {
            if exp != 0 {
                rows[idx / 4][idx % 4] = 1u32 << exp;
            }
        }
        rows
    }

    /// Return the board after sliding/merging tiles in `dir` (no random spawn).
    ///
    /// ```
    /// use twenty48_engine::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
    /// let shifted = b.shift(Move::Left);
    /// assert_eq!(shifted.to_rows()[0], [4, 4, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift(self, dir)
    }

    /// Apply a directional move, reporting whether anything moved and
    /// the score gained from merges.
    ///
    /// ```
    /// use twenty48_engine::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
    /// let out = b.apply(Move::Left);
    /// assert!(out.moved);
    /// assert_eq!(out.score_gained, 4);
    /// ```
    #[inline]
    pub fn apply(self, dir: Move) -> MoveOutcome {
        ops::apply(self, dir)
    }

    /// Spawn a 2 (90%) or 4 (10%) in a uniformly random empty cell.
    ///
    /// Returns `None` when the board is full. The RNG is always
    /// injected, so spawns are reproducible under a seeded source:
    /// ```
    /// use twenty48_engine::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let (b, spawn) = Board::EMPTY.spawn_random(&mut rng).unwrap();
    /// assert!(spawn.value == 2 || spawn.value == 4);
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    #[inline]
    pub fn spawn_random<R: Rng + ?Sized>(self, rng: &mut R) -> Option<(Self, Spawn)> {
        ops::spawn_random_tile(self, rng)
    }

    /// True while at least one move can change the board: an empty
    /// cell exists, or two equal tiles are orthogonally adjacent.
    #[inline]
    pub fn has_moves(self) -> bool {
        ops::has_any_legal_move(self)
    }

    /// Win check: some tile is at least `target` (or exactly `target`
    /// when `exact`). `target` is a face value such as 128 or 2048.
    #[inline]
    pub fn reached(self, target: u32, exact: bool) -> bool {
        ops::has_reached_target(self, target, exact)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> u32 {
        ops::count_empty(self)
    }

    /// The highest face value present, or 0 on an empty board.
    #[inline]
    pub fn highest_tile(self) -> u32 {
        ops::highest_tile(self)
    }

    /// Whole-board score under the standard merge-accounting closed
    /// form (every tile assumed built up from 2s).
    #[inline]
    pub fn score(self) -> Score {
        ops::board_score(self)
    }

    /// Face value at a row-major index, 0 for an empty cell.
    #[inline]
    pub fn tile_value(self, idx: usize) -> u32 {
        let exp = (self.0 >> (60 - 4 * idx)) & 0xf;
        if exp == 0 {
            0
        } else {
            1u32 << exp
        }
    }

    /// Iterate over tile exponents (nibbles) in row-major order.
    /// Yields 0 for empty, 1 for 2, 2 for 4, etc.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter { raw: self.0, idx: 0 }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.to_rows().iter().enumerate() {
            if r > 0 {
                writeln!(f, "------+------+------+------")?;
            }
            for (c, &val) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, "|")?;
                }
                if val == 0 {
                    write!(f, "      ")?;
                } else {
                    write!(f, "{val:^6}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<BoardRaw> for Board {
    fn from(v: BoardRaw) -> Self {
        Board::from_raw(v)
    }
}

impl From<Board> for BoardRaw {
    fn from(b: Board) -> Self {
        b.into_raw()
    }
}

/// Iterator over board tiles (exponents) in row-major order.
pub struct TilesIter {
    raw: BoardRaw,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= 16 {
            return None;
        }
        let n = ((self.raw >> (60 - 4 * self.idx)) & 0xf) as u8;
        self.idx += 1;
        Some(n)
    }
}

impl IntoIterator for Board {
    type Item = u8;
    type IntoIter = TilesIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_rows() {
        let rows = [[2, 0, 4, 8], [0, 0, 0, 0], [16, 16, 2, 0], [0, 0, 0, 2048]];
        let b = Board::from_rows(rows);
        assert_eq!(b.to_rows(), rows);
    }

    #[test]
    fn it_tile_value() {
        let b = Board::from_raw(0x0123456789abcdef);
        assert_eq!(b.tile_value(0), 0);
        assert_eq!(b.tile_value(3), 8);
        assert_eq!(b.tile_value(10), 1024);
        assert_eq!(b.tile_value(15), 32768);
    }

    #[test]
    fn it_tiles_iterator_row_major() {
        let b = Board::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 8]]);
        let exps: Vec<u8> = b.tiles().collect();
        assert_eq!(exps[0], 1);
        assert_eq!(exps[1], 2);
        assert_eq!(exps[15], 3);
        assert_eq!(exps.iter().filter(|&&e| e != 0).count(), 3);
    }

    #[test]
    fn it_spawn_coordinates() {
        let s = Spawn { cell: 9, value: 2 };
        assert_eq!(s.row(), 2);
        assert_eq!(s.col(), 1);
    }
}
