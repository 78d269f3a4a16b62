use mazing_core::BigInt;

use crate::matrix::BandMatrix;

// GRID LAPLACIAN
// ================================================================================================

/// Builds the reduced Laplacian of the `width` x `height` grid graph as a band matrix.
///
/// Cells are numbered row-major. The diagonal holds each cell's degree (2 in the corners, 3 on
/// the borders, 4 in the interior) and every grid edge contributes a −1 at `(i, i - 1)` within a
/// grid row and `(i, i - width)` across grid rows, giving a band of `width + 1` entries per row.
/// The first pivot is excluded (`det_start = 1`): by the matrix-tree theorem the determinant of
/// the remaining submatrix is the number of spanning trees of the grid.
pub fn grid_laplacian(width: usize, height: usize) -> BandMatrix {
    let n = width * height;
    let mut m = BandMatrix::new(n, width + 1, 1);

    for i in 0..n {
        let first_row = i < width;
        let last_row = i >= n - width;
        let first_col = i % width == 0;
        let last_col = i % width == width - 1;

        let degree = usize::from(!first_row)
            + usize::from(!last_row)
            + usize::from(!first_col)
            + usize::from(!last_col);
        *m.ov_mut(i, i) = BigInt::from(degree);

        if !first_row {
            *m.ov_mut(i, i - width) = BigInt::from(-1);
        }
        if !first_col {
            *m.ov_mut(i, i - 1) = BigInt::from(-1);
        }
    }
    m
}

// TESTS
// ================================================================================================
