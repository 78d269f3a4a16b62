use mazing_core::{BigInt, MazeError};
use num_traits::One;
use tracing::instrument;

use crate::dense::SymMatrix;

// SPANNING TREE COUNT
// ================================================================================================

/// Returns the exact number of distinct perfect mazes on a `width` x `height` grid, i.e. the
/// number of spanning trees of the grid's adjacency graph.
///
/// The count is the determinant of a block-tridiagonal matrix over the planar dual of the grid.
/// That determinant obeys a Chebyshev-like recurrence in the grid height whose doubling form is
/// iterated here over the bits of `height`, so the whole computation is O(log height) products
/// of `(width - 1)` x `(width - 1)` big-integer matrices followed by one dense elimination.
///
/// # Errors
/// Returns [`MazeError::InvalidDimension`] if either dimension is zero.
#[instrument]
pub fn count(width: usize, height: usize) -> Result<BigInt, MazeError> {
    if width == 0 || height == 0 {
        return Err(MazeError::InvalidDimension { width, height });
    }
    // a single row or column of cells is a path graph, which is its own unique spanning tree;
    // the recurrence below would degenerate to 0x0 matrices for width 1
    if width == 1 || height == 1 {
        return Ok(BigInt::one());
    }
    Ok(dual_determinant(width, height))
}

/// Runs the doubling recurrence and evaluates the final determinant.
///
/// Tracks the recurrence pair `(a, b)` and lookahead `c` through the bits of `height`, from the
/// most significant set bit down to the least: a squaring step per bit, an advance-by-one step
/// for each set bit, and a refresh of `c` after either.
fn dual_determinant(width: usize, height: usize) -> BigInt {
    let n = width - 1;

    let mut a = SymMatrix::scaled_identity(n, -1);
    let mut b = SymMatrix::zero(n);
    let mut c = SymMatrix::scaled_identity(n, 1);

    // scratch space, reused across iterations
    let mut new_a = SymMatrix::zero(n);
    let mut new_b = SymMatrix::zero(n);
    let mut temp = SymMatrix::zero(n);

    let mut bit = 1usize << height.ilog2();
    while bit > 0 {
        // a, b := b^2 - a^2, bc - ab
        new_a.mul_into(&b, &b);
        temp.mul_into(&a, &a);
        new_a.sub_assign(&temp);

        new_b.mul_into(&b, &c);
        temp.mul_into(&a, &b);
        new_b.sub_assign(&temp);

        core::mem::swap(&mut a, &mut new_a);
        core::mem::swap(&mut b, &mut new_b);

        if height & bit != 0 {
            // a, b := b, bM - a
            new_a.copy_from(&b);
            new_b.mul_tridiag_into(&b);
            new_b.sub_assign(&a);
            core::mem::swap(&mut a, &mut new_a);
            core::mem::swap(&mut b, &mut new_b);
        }

        // c := bM - a
        c.mul_tridiag_into(&b);
        c.sub_assign(&a);

        bit >>= 1;
    }

    b.into_determinant()
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::laplacian::grid_laplacian;

    #[rstest]
    #[case(1, 1, "1")]
    #[case(2, 1, "1")]
    #[case(1, 10, "1")]
    #[case(10, 1, "1")]
    #[case(2, 2, "4")]
    #[case(2, 3, "15")]
    #[case(3, 2, "15")]
    #[case(3, 3, "192")]
    #[case(4, 4, "100352")]
    #[case(4, 5, "1972736")]
    #[case(5, 4, "1972736")]
    #[case(5, 5, "557568000")]
    #[case(6, 6, "32565539635200")]
    fn counts_known_grids(#[case] width: usize, #[case] height: usize, #[case] expected: &str) {
        assert_eq!(count(width, height).unwrap(), expected.parse::<BigInt>().unwrap());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(count(0, 3), Err(MazeError::InvalidDimension { width: 0, height: 3 }));
        assert_eq!(count(3, 0), Err(MazeError::InvalidDimension { width: 3, height: 0 }));
        assert_eq!(count(0, 0), Err(MazeError::InvalidDimension { width: 0, height: 0 }));
    }

    #[test]
    fn count_matches_laplacian_determinant() {
        for width in 2..=5 {
            for height in 2..=5 {
                let mut m = grid_laplacian(width, height);
                m.rebuild();
                assert_eq!(
                    count(width, height).unwrap(),
                    *m.det(),
                    "count disagrees with the Laplacian determinant for {width}x{height}"
                );
            }
        }
    }

    proptest! {
        #[test]
        fn count_is_symmetric_in_the_dimensions(width in 1usize..=6, height in 1usize..=6) {
            prop_assert_eq!(count(width, height).unwrap(), count(height, width).unwrap());
        }
    }
}
