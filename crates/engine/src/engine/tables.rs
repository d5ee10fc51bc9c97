use std::sync::OnceLock;

use super::ops;
use super::state::{Line, Score};

/// Precomputed lookup tables for all possible 4-tile lines (16-bit packed).
///
/// Shifting/merging a row or column depends only on its 4 nibbles, and
/// there are 2^16 possible packed lines. We precompute the slid line
/// for both horizontal directions and the score gained by sliding it.
/// Vertical moves reuse the same tables through transposition, and the
/// gain is direction-independent per axis by mirror symmetry.
///
/// Layout:
/// - `left/right[i]`: replacement 16-bit line after the slide.
/// - `gain[i]`: sum of merged-tile values produced by sliding line `i`.
///
/// Tables build lazily on first access; `engine::init()` forces the
/// one-time cost early.
pub(crate) struct Stores {
    pub(crate) left: Box<[Line]>,
    pub(crate) right: Box<[Line]>,
    pub(crate) gain: Box<[Score]>,
}

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

static STORES: OnceLock<Stores> = OnceLock::new();

/// Ensure lookup tables are initialized.
pub(crate) fn init() {
    let _ = stores();
}

#[inline]
pub(crate) fn stores() -> &'static Stores {
    STORES.get_or_init(create_stores)
}

fn create_stores() -> Stores {
    // Heap-allocate to keep stack frames small during init.
    let mut left = vec![0 as Line; LINE_TABLE_SIZE];
    let mut right = vec![0 as Line; LINE_TABLE_SIZE];
    let mut gain = vec![0 as Score; LINE_TABLE_SIZE];

    for val in 0..LINE_TABLE_SIZE {
        let line = val as Line;
        let (slid, gained) = ops::slide_exponents(ops::unpack_line(line));
        left[val] = ops::pack_line(slid);
        gain[val] = gained;

        // right = mirror, slide left, mirror back
        let rev = ops::reverse_line(line);
        let (slid_rev, _) = ops::slide_exponents(ops::unpack_line(rev));
        right[val] = ops::reverse_line(ops::pack_line(slid_rev));
    }

    Stores {
        left: left.into_boxed_slice(),
        right: right.into_boxed_slice(),
        gain: gain.into_boxed_slice(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_table_entries_match_primitive() {
        let s = stores();
        // spot-check a handful of lines against the scan
        for line in [0x0000u16, 0x1100, 0x2211, 0x1111, 0x0012, 0xf0f0] {
            let (slid, gained) = ops::slide_exponents(ops::unpack_line(line));
            assert_eq!(s.left[line as usize], ops::pack_line(slid));
            assert_eq!(s.gain[line as usize], gained);
        }
        // [2, 2, -, -] slides to [4, -, -, -] gaining 4
        assert_eq!(s.left[0x1100], 0x2000);
        assert_eq!(s.gain[0x1100], 4);
        // right table is the mirror image
        assert_eq!(s.right[0x0011], 0x0002);
        assert_eq!(s.gain[0x0011], s.gain[0x1100]);
    }
}
