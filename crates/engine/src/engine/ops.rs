use rand::Rng;

use super::state::{Board, BoardRaw, Line, Move, MoveOutcome, Score, Spawn};
use super::tables::stores;

/// Slide one line of face values toward its head, merging adjacent
/// equal pairs once each. Returns the settled line and the score
/// gained (the sum of all merged-tile values).
///
/// This is the primitive all four moves reduce to: left/right apply
/// it per row (right via mirroring), up/down per column (via
/// transposition).
///
/// ```
/// use twenty48_engine::engine::slide_line;
/// assert_eq!(slide_line([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
/// assert_eq!(slide_line([2, 0, 2, 2]), ([4, 2, 0, 0], 4));
/// assert_eq!(slide_line([4, 4, 4, 4]), ([8, 8, 0, 0], 16));
/// ```
pub fn slide_line(line: [u32; 4]) -> ([u32; 4], Score) {
    debug_assert!(
        line.iter().all(|&v| v == 0 || (v >= 2 && v.is_power_of_two())),
        "line cells must be 0 or powers of two >= 2"
    );
    let exps = line.map(|v| if v == 0 { 0 } else { v.trailing_zeros() as u8 });
    let (out, gained) = slide_exponents(exps);
    (out.map(|e| if e == 0 { 0 } else { 1u32 << e }), gained)
}

/// The merge scan over tile exponents (0 = empty). Non-empty cells
/// compact toward index 0 preserving order; a cell produced by a
/// merge never merges again within the same call.
pub(crate) fn slide_exponents(line: [u8; 4]) -> ([u8; 4], Score) {
    let mut out = [0u8; 4];
    let mut gained: Score = 0;
    let mut write = 0;
    let mut pending: Option<u8> = None;
    for exp in line.into_iter().filter(|&e| e != 0) {
        match pending {
            Some(p) if p == exp => {
                // Exponent 15 (32768) is the nibble cap. Two 32768s
                // cannot arise from spawned tiles, but raw boards can
                // hold them; saturate instead of wrapping the nibble.
                let merged = (p + 1).min(15);
                out[write] = merged;
                gained += 1u64 << merged;
                write += 1;
                pending = None;
            }
            Some(p) => {
                out[write] = p;
                write += 1;
                pending = Some(exp);
            }
            None => pending = Some(exp),
        }
    }
    if let Some(p) = pending {
        out[write] = p;
    }
    (out, gained)
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> Board {
    let s = stores();
    let res = match direction {
        Move::Left => shift_rows(board.0, &s.left),
        Move::Right => shift_rows(board.0, &s.right),
        Move::Up => transpose(shift_rows(transpose(board.0), &s.left)),
        Move::Down => transpose(shift_rows(transpose(board.0), &s.right)),
    };
    Board(res)
}

/// Apply a directional move: the shifted board, whether anything
/// changed, and the score gained from merges in this move.
pub fn apply(board: Board, direction: Move) -> MoveOutcome {
    let after = shift(board, direction);
    MoveOutcome {
        board: after,
        moved: after != board,
        score_gained: move_gain(board, direction),
    }
}

/// Score gained by sliding `board` in `direction`: the per-line gain
/// table summed over the four lines along the move axis. Mirror
/// symmetry makes the gain identical for the two ends of an axis.
fn move_gain(board: Board, direction: Move) -> Score {
    let raw = match direction {
        Move::Left | Move::Right => board.0,
        Move::Up | Move::Down => transpose(board.0),
    };
    let s = stores();
    (0..4).map(|idx| s.gain[extract_line(raw, idx) as usize]).sum()
}

fn shift_rows(raw: BoardRaw, table: &[Line]) -> BoardRaw {
    (0..4).fold(0, |acc, row_idx| {
        let row = extract_line(raw, row_idx);
        acc | ((table[row as usize] as BoardRaw) << ((3 - row_idx) * 16))
    })
}

// Credit to nneonneo's 2048 AI for the nibble-transpose constants.
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

pub(crate) fn extract_line(raw: BoardRaw, line_idx: usize) -> Line {
    ((raw >> ((3 - line_idx) * 16)) & 0xffff) as Line
}

pub(crate) fn unpack_line(line: Line) -> [u8; 4] {
    [
        ((line >> 12) & 0xf) as u8,
        ((line >> 8) & 0xf) as u8,
        ((line >> 4) & 0xf) as u8,
        (line & 0xf) as u8,
    ]
}

pub(crate) fn pack_line(exps: [u8; 4]) -> Line {
    ((exps[0] as Line & 0xf) << 12)
        | ((exps[1] as Line & 0xf) << 8)
        | ((exps[2] as Line & 0xf) << 4)
        | (exps[3] as Line & 0xf)
}

/// Reverse the four nibbles of a packed line (mirror a row).
pub(crate) fn reverse_line(line: Line) -> Line {
    (line >> 12) | ((line >> 4) & 0x00f0) | ((line << 4) & 0x0f00) | (line << 12)
}

/// Insert a 2 (90%) or 4 (10%) into a uniformly random empty cell.
///
/// Returns the new board and a record of where the tile landed, or
/// `None` when the board is full (a spawn on a full board is a no-op).
pub fn spawn_random_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Option<(Board, Spawn)> {
    let empty = count_empty(board);
    if empty == 0 {
        return None;
    }
    let exp: u64 = if rng.gen_range(0..10) < 9 { 1 } else { 2 };
    let mut index = rng.gen_range(0..empty);
    for cell in 0..16 {
        let nib = 60 - 4 * cell;
        if (board.0 >> nib) & 0xf != 0 {
            continue;
        }
        if index == 0 {
            let with_tile = Board(board.0 | (exp << nib));
            return Some((with_tile, Spawn { cell, value: 1 << exp }));
        }
        index -= 1;
    }
    None
}

/// True while the position is not lost: some cell is empty, or two
/// equal tiles are adjacent horizontally or vertically.
pub fn has_any_legal_move(board: Board) -> bool {
    if count_empty(board) > 0 {
        return true;
    }
    has_equal_adjacent(board.0) || has_equal_adjacent(transpose(board.0))
}

/// Scan each row for an equal pair of neighbouring non-empty nibbles.
fn has_equal_adjacent(raw: BoardRaw) -> bool {
    for row_idx in 0..4 {
        let line = extract_line(raw, row_idx);
        for i in 0..3 {
            let a = (line >> (12 - 4 * i)) & 0xf;
            let b = (line >> (8 - 4 * i)) & 0xf;
            if a != 0 && a == b {
                return true;
            }
        }
    }
    false
}

/// Win check against a configured face-value target.
pub fn has_reached_target(board: Board, target: u32, exact: bool) -> bool {
    (0..16).map(|idx| board.tile_value(idx)).any(|v| {
        if exact {
            v == target
        } else {
            v != 0 && v >= target
        }
    })
}

// https://stackoverflow.com/questions/38225571/count-number-of-zero-nibbles-in-an-unsigned-64-bit-integer
/// Count the number of empty cells.
pub fn count_empty(board: Board) -> u32 {
    let mut x = board.0;
    x |= x >> 1;
    x |= x >> 2;
    x &= 0x1111_1111_1111_1111;
    16 - x.count_ones()
}

/// The highest face value on the board, 0 when empty.
pub fn highest_tile(board: Board) -> u32 {
    let max_exp = (0..16)
        .map(|idx| (board.0 >> (60 - 4 * idx)) & 0xf)
        .max()
        .unwrap_or(0);
    if max_exp == 0 {
        0
    } else {
        1u32 << max_exp
    }
}

/// Whole-board score under standard merge accounting: a tile of
/// exponent e contributes (e - 1) * 2^e, the sum of itself and every
/// intermediate merge that built it from 2s.
pub fn board_score(board: Board) -> Score {
    board
        .tiles()
        .filter(|&e| e >= 2)
        .map(|e| (e as Score - 1) * (1u64 << e))
        .sum()
}
