use alloc::{vec, vec::Vec};
use core::cmp::{max, min};

use mazing_core::BigInt;

use crate::utils::{exact_div, tri};


// CELL
// ================================================================================================

/// A stored band-matrix entry.
///
/// `ov` is the logical value of the entry; `bv` is the corresponding iterate of the fraction-free
/// elimination maintained by [`BandMatrix::rebuild`] and [`BandMatrix::update`].
#[derive(Debug, Clone, Default)]
struct Cell {
    ov: BigInt,
    bv: BigInt,
}

// BAND MATRIX
// ================================================================================================

/// A symmetric band matrix of big integers, optimised for progressive determinant computation.
///
/// Only the lower band is stored: row `i` holds columns `[i + 1 - len(i) .. i]` where
/// `len(i) = min(i + 1, band)`, laid out in one flat arena. Reads below the band resolve to a
/// shared always-zero cell and reads above the diagonal resolve by symmetry; writes outside the
/// band are a contract violation and panic.
///
/// Every stored entry is an `(ov, bv)` pair. `ov` is the logical matrix; `bv` carries the state
/// of a band-aware Bareiss elimination of `ov`, so the determinant of the leading active
/// submatrix (minus the rows before `det_start`) can be read off the last active diagonal cell.
/// Edits to `ov` are recorded with [`mark_changed`](Self::mark_changed), and
/// [`update`](Self::update) recomputes just the suffix of the elimination those edits disturb.
#[derive(Debug, Clone)]
pub struct BandMatrix {
    /// Number of allocated rows (and columns).
    n: usize,
    /// Max number of stored entries per row, i.e. 1 + the half-bandwidth.
    band: usize,
    /// Determinant operations work on the leading `active` x `active` submatrix.
    active: usize,
    /// First pivot of the elimination; earlier rows and columns are excluded from the
    /// determinant.
    det_start: usize,
    /// Smallest row/column index whose `ov` changed since the last rebuild or update; `n` when
    /// nothing is pending.
    min_changed: usize,
    /// Flat band storage; row `i` starts at `row_start(i)`.
    cells: Vec<Cell>,
    /// Shared cell for out-of-band reads. Never written.
    zero: Cell,
}

impl BandMatrix {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns an all-zero `n` x `n` symmetric band matrix storing `band` entries per full row,
    /// with the elimination starting at pivot `det_start`.
    pub fn new(n: usize, band: usize, det_start: usize) -> Self {
        Self {
            n,
            band,
            active: n,
            det_start,
            min_changed: n,
            cells: vec![Cell::default(); Self::storage_len(n, band)],
            zero: Cell::default(),
        }
    }

    /// Total number of stored cells for an `n`-row matrix with `band` entries per full row.
    const fn storage_len(n: usize, band: usize) -> usize {
        if n <= band {
            tri(n)
        } else {
            tri(band) + (n - band) * band
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of allocated rows.
    #[inline(always)]
    pub fn num_rows(&self) -> usize {
        self.n
    }

    /// Returns the number of stored entries in a full row.
    #[inline(always)]
    pub fn band(&self) -> usize {
        self.band
    }

    /// Returns the number of active rows.
    #[inline(always)]
    pub fn active_rows(&self) -> usize {
        self.active
    }

    /// Returns the column index of the first stored entry of row `i`.
    #[inline(always)]
    pub fn offset(&self, i: usize) -> usize {
        i + 1 - self.row_len(i)
    }

    /// Returns the logical value of entry `(i, j)`, in either index order.
    ///
    /// Out-of-band entries read as zero.
    #[inline(always)]
    pub fn ov(&self, i: usize, j: usize) -> &BigInt {
        &self.cell(i, j).ov
    }

    /// Returns the current elimination iterate of entry `(i, j)`, in either index order.
    ///
    /// Out-of-band entries read as zero.
    #[inline(always)]
    pub fn bv(&self, i: usize, j: usize) -> &BigInt {
        &self.cell(i, j).bv
    }

    /// Returns the determinant of `ov[det_start.., det_start..]` restricted to the active
    /// submatrix, as maintained by the last [`rebuild`](Self::rebuild) or
    /// [`update`](Self::update).
    ///
    /// # Panics
    /// Panics if there are no active rows.
    pub fn det(&self) -> &BigInt {
        self.bv(self.active - 1, self.active - 1)
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Returns a mutable reference to the logical value of entry `(i, j)`, in either index order.
    ///
    /// # Panics
    /// Panics if the entry lies outside the stored band.
    #[inline(always)]
    pub fn ov_mut(&mut self, i: usize, j: usize) -> &mut BigInt {
        &mut self.cell_mut(i, j).ov
    }

    /// Restricts determinant operations to the leading `active` x `active` submatrix.
    ///
    /// # Panics
    /// Panics if `active` exceeds the number of allocated rows.
    pub fn set_active_rows(&mut self, active: usize) {
        assert!(active <= self.n, "active rows {active} exceed allocated rows {}", self.n);
        self.active = active;
    }

    /// Records that entry `(i, j)` (and its mirror) may have been edited since the last rebuild
    /// or update.
    pub fn mark_changed(&mut self, i: usize, j: usize) {
        self.min_changed = min(self.min_changed, min(i, j));
    }

    // DETERMINANT MAINTENANCE
    // --------------------------------------------------------------------------------------------

    /// Recomputes the elimination state from scratch.
    ///
    /// Copies `ov` into `bv` for every stored cell, then runs the band-aware fraction-free sweep
    /// over the active submatrix: for each pivot `k` the rows within the band below it are
    /// reduced, and the one row whose band begins just past `k` is scaled by the pivot alone (its
    /// entry in column `k` lies outside the band and is zero). Afterwards no edits are pending.
    pub fn rebuild(&mut self) {
        tracing::debug!(rows = self.active, band = self.band, "rebuilding elimination state");

        for cell in &mut self.cells {
            cell.bv.clone_from(&cell.ov);
        }

        let mut prev: Option<BigInt> = None;
        for k in self.det_start..self.active.saturating_sub(1) {
            let pivot = self.bv(k, k).clone();
            for i in (k + 1)..min(self.active, k + self.band) {
                for j in max(k + 1, self.offset(i))..=i {
                    self.eliminate(i, j, k, &pivot, prev.as_ref());
                }
            }
            if k + self.band < self.active {
                let i = k + self.band;
                for j in max(k + 1, self.offset(i))..=i {
                    self.cell_mut(i, j).bv *= &pivot;
                }
            }
            prev = Some(pivot);
        }
        self.min_changed = self.n;
    }

    /// Restores the elimination state after `ov` edits, recomputing only the suffix the edits
    /// can influence.
    ///
    /// The edited block is recopied from `ov`, pre-scaled to match the state the full sweep
    /// would have left it in once the band of pivot `min_changed - band` has passed over it, and
    /// the pivots from `max(det_start, min_changed - band)` onwards are re-run over the rows and
    /// columns at or past `min_changed`. The pre-scaling only applies when `min_changed - band`
    /// is a pivot the sweep actually runs, i.e. not before `det_start`; otherwise the recopied
    /// block starts from the first pivot with no prior divisor, keeping every division exact.
    /// Afterwards no edits are pending.
    pub fn update(&mut self) {
        let lo = self.min_changed;

        for i in lo..self.active {
            for j in max(lo, self.offset(i))..=i {
                let cell = self.cell_mut(i, j);
                cell.bv.clone_from(&cell.ov);
            }
        }

        let mut prev: Option<BigInt> = if lo >= self.band + self.det_start {
            let k = lo - self.band;
            let pivot = self.bv(k, k).clone();
            for i in lo..self.active {
                for j in max(lo, self.offset(i))..=i {
                    self.cell_mut(i, j).bv *= &pivot;
                }
            }
            Some(pivot)
        } else {
            None
        };

        for k in max(self.det_start, lo.saturating_sub(self.band))..self.active {
            let pivot = self.bv(k, k).clone();
            for i in max(lo, k + 1)..self.active {
                for j in max(lo, max(k + 1, self.offset(i)))..=i {
                    self.eliminate(i, j, k, &pivot, prev.as_ref());
                }
            }
            prev = Some(pivot);
        }
        self.min_changed = self.n;
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    /// One Bareiss step on `bv(i, j)`: scale by the pivot, subtract the cross term, and divide
    /// out the previous pivot (exactly, when there is one).
    fn eliminate(&mut self, i: usize, j: usize, k: usize, pivot: &BigInt, prev: Option<&BigInt>) {
        let num = {
            let mij = self.bv(i, j);
            let mik = self.bv(i, k);
            let mjk = self.bv(j, k);
            mij * pivot - mik * mjk
        };
        let val = match prev {
            Some(den) => exact_div(num, den),
            None => num,
        };
        self.cell_mut(i, j).bv = val;
    }

    /// Number of stored entries in row `i`.
    #[inline(always)]
    fn row_len(&self, i: usize) -> usize {
        min(i + 1, self.band)
    }

    /// Arena index of the first stored entry of row `i`.
    #[inline(always)]
    fn row_start(&self, i: usize) -> usize {
        if i <= self.band {
            tri(i)
        } else {
            tri(self.band) + (i - self.band) * self.band
        }
    }

    /// Arena index of entry `(i, j)` for `i >= j`, or `None` when the column lies outside the
    /// stored band of row `i`.
    #[inline(always)]
    fn cell_index(&self, i: usize, j: usize) -> Option<usize> {
        debug_assert!(j <= i && i < self.n, "entry ({i}, {j}) is not a lower-band coordinate");
        let offset = self.offset(i);
        (j >= offset).then(|| self.row_start(i) + j - offset)
    }

    /// Returns the `(i, j)` cell, in either index order; out-of-band reads hit the zero cell.
    #[inline(always)]
    fn cell(&self, i: usize, j: usize) -> &Cell {
        let (i, j) = if i < j { (j, i) } else { (i, j) };
        match self.cell_index(i, j) {
            Some(idx) => &self.cells[idx],
            None => &self.zero,
        }
    }

    /// Returns the `(i, j)` cell mutably, in either index order.
    ///
    /// # Panics
    /// Panics if the entry lies outside the stored band.
    #[inline(always)]
    fn cell_mut(&mut self, i: usize, j: usize) -> &mut Cell {
        let (i, j) = if i < j { (j, i) } else { (i, j) };
        let idx = self.cell_index(i, j).expect("write to an out-of-band entry");
        &mut self.cells[idx]
    }
}
