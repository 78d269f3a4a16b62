use alloc::{vec, vec::Vec};

use mazing_core::BigInt;
use num_traits::{One, Zero};

use crate::utils::{exact_div, tri};

// SYMMETRIC DENSE MATRIX
// ================================================================================================

/// A dense symmetric matrix of big integers backed by a triangular arena.
///
/// Entry `(i, j)` with `i >= j` lives at `tri(i) + j`; the mirrored entry resolves to the same
/// cell, so only the lower triangle is ever stored or computed.
#[derive(Debug, Clone)]
pub struct SymMatrix {
    n: usize,
    entries: Vec<BigInt>,
}

impl SymMatrix {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns the `n` x `n` zero matrix.
    pub fn zero(n: usize) -> Self {
        Self {
            n,
            entries: vec![BigInt::zero(); tri(n)],
        }
    }

    /// Returns `scale` times the `n` x `n` identity matrix.
    pub fn scaled_identity(n: usize, scale: i64) -> Self {
        let mut m = Self::zero(n);
        for i in 0..n {
            m.entries[tri(i) + i] = BigInt::from(scale);
        }
        m
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the size of the matrix.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns the `(i, j)` entry, in either index order.
    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> &BigInt {
        let (i, j) = if i < j { (j, i) } else { (i, j) };
        &self.entries[tri(i) + j]
    }

    // ARITHMETIC
    // --------------------------------------------------------------------------------------------

    /// Sets `self` to the product `a * b`.
    ///
    /// Only the lower triangle is computed; the operands must commute so that the product is
    /// again symmetric.
    pub fn mul_into(&mut self, a: &SymMatrix, b: &SymMatrix) {
        let n = self.n;
        for i in 0..n {
            for j in 0..=i {
                let mut acc = BigInt::zero();
                for k in 0..n {
                    acc += a.at(i, k) * b.at(k, j);
                }
                self.entries[tri(i) + j] = acc;
            }
        }
    }

    /// Sets `self` to `src * M`, where `M` is the tridiagonal matrix with 4 on the main diagonal
    /// and −1 on the first sub- and superdiagonals.
    ///
    /// Computed directly as `4*src(i,j) - src(i-1,j) - src(i+1,j)` per cell, which is cheaper
    /// than a general product by a full matrix.
    pub fn mul_tridiag_into(&mut self, src: &SymMatrix) {
        let n = self.n;
        for i in 0..n {
            for j in 0..=i {
                let mut cell = src.at(i, j) << 2usize;
                if i > 0 {
                    cell -= src.at(i - 1, j);
                }
                if i + 1 < n {
                    cell -= src.at(i + 1, j);
                }
                self.entries[tri(i) + j] = cell;
            }
        }
    }

    /// Subtracts `other` from `self` entrywise.
    pub fn sub_assign(&mut self, other: &SymMatrix) {
        for (dst, src) in self.entries.iter_mut().zip(&other.entries) {
            *dst -= src;
        }
    }

    /// Copies the entries of `src` into `self`.
    pub fn copy_from(&mut self, src: &SymMatrix) {
        for (dst, s) in self.entries.iter_mut().zip(&src.entries) {
            dst.clone_from(s);
        }
    }

    // DETERMINANT
    // --------------------------------------------------------------------------------------------

    /// Runs the fraction-free Bareiss elimination in place and returns the determinant.
    ///
    /// The empty matrix has determinant one.
    pub fn into_determinant(mut self) -> BigInt {
        let n = self.n;
        if n == 0 {
            return BigInt::one();
        }

        let mut prev: Option<BigInt> = None;
        for k in 0..n {
            let pivot = self.at(k, k).clone();
            for i in (k + 1)..n {
                for j in (k + 1)..=i {
                    let num = {
                        let mij = self.at(i, j);
                        let mik = self.at(i, k);
                        let mjk = self.at(j, k);
                        mij * &pivot - mik * mjk
                    };
                    self.entries[tri(i) + j] = match &prev {
                        Some(den) => exact_div(num, den),
                        None => num,
                    };
                }
            }
            prev = Some(pivot);
        }
        let last = tri(n) - 1;
        self.entries.swap_remove(last)
    }
}

// TESTS
// ================================================================================================
