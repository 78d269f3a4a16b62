use mazing_core::{BigInt, Chain, Maze, MazeError};
use num_traits::{One, Signed, Zero};
use tracing::instrument;

use crate::{laplacian::grid_laplacian, matrix::BandMatrix};

// RANK DESCENT
// ================================================================================================

/// Returns the perfect maze of rank `index` on the `width` x `height` grid.
///
/// Walks the grid cells from the last down to the first, deciding for each candidate edge (the
/// edge to the cell's northern neighbour, then the one to its western neighbour) whether the
/// maze at the residual rank contains it. The number of spanning trees that survive deleting the
/// edge is read off an incrementally maintained elimination of the grid Laplacian; the edge is
/// included exactly when the residual rank reaches past that number. Included edges contract
/// their endpoints into one super-node, excluded edges stay deleted, and the active part of the
/// matrix shrinks with every decided cell.
///
/// # Errors
/// Returns [`MazeError::InvalidDimension`] if either dimension is zero, and
/// [`MazeError::IndexOutOfRange`] if `index` is negative or at least the number of mazes on the
/// grid.
#[instrument(skip(index))]
pub fn maze_by_index(width: usize, height: usize, index: &BigInt) -> Result<Maze, MazeError> {
    if width == 0 || height == 0 {
        return Err(MazeError::InvalidDimension { width, height });
    }
    if index.is_negative() {
        return Err(MazeError::IndexOutOfRange);
    }

    let mut m = grid_laplacian(width, height);
    let n = m.num_rows();
    let mut maze = Maze::new(width, height);
    let mut chain = Chain::new(n);
    let mut residual = index.clone();

    m.rebuild();

    for cell in (1..n).rev() {
        m.set_active_rows(cell + 1);

        if cell >= width {
            // the edge to the northern neighbour
            if try_edge(&mut m, &mut residual, &mut chain, cell - width, cell) {
                maze.open_between(cell - width, cell);
            }
        }
        if cell % width != 0 {
            // the edge to the western neighbour
            if try_edge(&mut m, &mut residual, &mut chain, cell - 1, cell) {
                maze.open_between(cell - 1, cell);
            }
        }
    }

    if !residual.is_zero() {
        return Err(MazeError::IndexOutOfRange);
    }
    Ok(maze)
}

/// Decides whether the edge between cells `from` and `to` belongs to the maze at the residual
/// rank, updating the working Laplacian, the residual rank, the node chain, and returning the
/// decision.
///
/// The matrix rows in play are the roots of the two cells' super-nodes. Mazes that exclude the
/// edge come first in the enumeration order: the edge is deleted from the Laplacian, the
/// elimination is updated, and the surviving spanning-tree count of the active submatrix is
/// compared against the residual rank. On inclusion the deletion edits stay (together with the
/// contraction they amount to merging the super-nodes), row and column of the absorbed root are
/// cleared out of the band with a unit pivot left on its diagonal, and the residual rank drops
/// by the without-edge count.
fn try_edge(
    m: &mut BandMatrix,
    residual: &mut BigInt,
    chain: &mut Chain,
    from: usize,
    to: usize,
) -> bool {
    let mut n_i = chain.root(to);
    let mut n_j = chain.root(from);
    if n_i < n_j {
        core::mem::swap(&mut n_i, &mut n_j);
    }

    // a negative entry is the count of undecided edges between the super-nodes; anything else
    // means none is left and the two are already connected
    if !m.ov(n_i, n_j).is_negative() {
        return false;
    }

    // delete the edge: both endpoint degrees drop and one multi-edge goes away
    *m.ov_mut(n_i, n_i) -= 1u32;
    *m.ov_mut(n_j, n_j) -= 1u32;
    *m.ov_mut(n_i, n_j) += 1u32;
    m.mark_changed(n_j, n_i);
    m.update();

    if &*residual < m.det() {
        return false;
    }

    // the edge is in the maze: contract the super-nodes, folding row n_i into row n_j
    let merged = m.ov(n_i, n_i) + m.ov(n_i, n_j);
    *m.ov_mut(n_j, n_j) += merged;
    m.mark_changed(n_j, n_i);

    let start = n_j.saturating_sub(m.band() - 1);
    let end = (n_i + m.band()).min(m.num_rows());
    for k in start..end {
        let val = m.ov(n_i, k).clone();
        if k == n_i {
            if !val.is_one() {
                *m.ov_mut(n_i, n_i) = BigInt::one();
                m.mark_changed(n_i, n_i);
            }
        } else if !val.is_zero() {
            *m.ov_mut(n_j, k) += &val;
            m.mark_changed(n_j, k);
            *m.ov_mut(n_i, k) = BigInt::zero();
            m.mark_changed(n_i, k);
        }
    }

    *residual -= m.det();
    chain.link(n_i, n_j);
    true
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeSet, vec::Vec};

    use itertools::Itertools;
    use mazing_core::Direction;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::count::count;

    fn edges_of(maze: &Maze) -> Vec<(usize, usize)> {
        maze.edges().collect()
    }

    /// All edges of the `width` x `height` grid graph as `(lower, higher)` index pairs.
    fn grid_edges(width: usize, height: usize) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                if x + 1 < width {
                    edges.push((i, i + 1));
                }
                if y + 1 < height {
                    edges.push((i, i + width));
                }
            }
        }
        edges
    }

    /// True if the edge set connects all `n` vertices.
    fn connects(n: usize, edges: &[(usize, usize)]) -> bool {
        let mut chain = Chain::new(n);
        for &(a, b) in edges {
            chain.link(a, b);
        }
        (0..n).all(|i| chain.root(i) == 0)
    }

    #[test]
    fn first_mazes_on_a_2x2_grid() {
        let maze = maze_by_index(2, 2, &BigInt::zero()).unwrap();
        assert_eq!(edges_of(&maze), vec![(0, 1), (0, 2), (2, 3)]);

        let maze = maze_by_index(2, 2, &BigInt::one()).unwrap();
        assert_eq!(edges_of(&maze), vec![(0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn first_maze_on_a_3x3_grid() {
        let maze = maze_by_index(3, 3, &BigInt::zero()).unwrap();
        assert_eq!(
            edges_of(&maze),
            vec![(0, 1), (0, 3), (1, 2), (3, 4), (3, 6), (4, 5), (6, 7), (7, 8)]
        );
    }

    #[test]
    fn single_cell_grid_has_the_empty_maze() {
        let maze = maze_by_index(1, 1, &BigInt::zero()).unwrap();
        assert_eq!(maze.num_cells(), 1);
        assert_eq!(maze.edges().count(), 0);
    }

    #[test]
    fn every_index_yields_a_spanning_tree() {
        for (width, height) in [(1, 1), (1, 4), (4, 1), (2, 2), (2, 3), (3, 3), (4, 2)] {
            let total = count(width, height).unwrap();
            let n = width * height;

            let mut index = BigInt::zero();
            while index < total {
                let maze = maze_by_index(width, height, &index)
                    .unwrap_or_else(|_| panic!("index {index} of {width}x{height} failed"));
                let edges = edges_of(&maze);
                assert_eq!(edges.len(), n - 1, "edge count at index {index}");
                assert!(connects(n, &edges), "disconnected maze at index {index}");
                index += 1u32;
            }
        }
    }

    #[test]
    fn connectivity_masks_stay_symmetric() {
        let total = count(3, 3).unwrap();
        let mut index = BigInt::zero();
        while index < total {
            let maze = maze_by_index(3, 3, &index).unwrap();
            for y in 0..3 {
                for x in 0..2 {
                    assert_eq!(
                        maze.is_open(x, y, Direction::East),
                        maze.is_open(x + 1, y, Direction::West)
                    );
                }
            }
            for y in 0..2 {
                for x in 0..3 {
                    assert_eq!(
                        maze.is_open(x, y, Direction::South),
                        maze.is_open(x, y + 1, Direction::North)
                    );
                }
            }
            index += 1u32;
        }
    }

    #[test]
    fn enumeration_is_injective_and_surjective() {
        // brute force: a spanning tree of the 3x3 grid is a connected choice of 8 of its 12 edges
        let n = 9;
        let all_edges = grid_edges(3, 3);
        let expected: BTreeSet<Vec<(usize, usize)>> = all_edges
            .iter()
            .copied()
            .combinations(n - 1)
            .filter(|edges| connects(n, edges))
            .map(|mut edges| {
                edges.sort_unstable();
                edges
            })
            .collect();
        assert_eq!(expected.len(), 192);

        let mut enumerated = BTreeSet::new();
        let total = count(3, 3).unwrap();
        let mut index = BigInt::zero();
        while index < total {
            let maze = maze_by_index(3, 3, &index).unwrap();
            let mut edges = edges_of(&maze);
            edges.sort_unstable();
            assert!(enumerated.insert(edges), "duplicate maze at index {index}");
            index += 1u32;
        }

        assert_eq!(enumerated, expected);
    }

    #[test]
    fn spot_checks_on_a_4x4_grid() {
        let total = count(4, 4).unwrap();
        assert_eq!(total, BigInt::from(100352));

        for index in [BigInt::zero(), BigInt::from(99999), &total - 1u32] {
            let maze = maze_by_index(4, 4, &index).unwrap();
            let edges = edges_of(&maze);
            assert_eq!(edges.len(), 15);
            assert!(connects(16, &edges));
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        assert_eq!(maze_by_index(3, 3, &BigInt::from(192)), Err(MazeError::IndexOutOfRange));
        assert_eq!(maze_by_index(2, 2, &BigInt::from(4)), Err(MazeError::IndexOutOfRange));
        assert_eq!(maze_by_index(1, 1, &BigInt::one()), Err(MazeError::IndexOutOfRange));
        assert_eq!(maze_by_index(2, 2, &BigInt::from(-1)), Err(MazeError::IndexOutOfRange));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert_eq!(
            maze_by_index(0, 2, &BigInt::zero()),
            Err(MazeError::InvalidDimension { width: 0, height: 2 })
        );
        assert_eq!(
            maze_by_index(2, 0, &BigInt::zero()),
            Err(MazeError::InvalidDimension { width: 2, height: 0 })
        );
    }

    /// The incremental elimination state must agree with a from-scratch rebuild at every point
    /// of the descent, pending edits included.
    #[test]
    fn incremental_state_matches_rebuild_throughout_a_descent() {
        let (width, height) = (3, 4);
        let mut m = grid_laplacian(width, height);
        let n = m.num_rows();
        let mut chain = Chain::new(n);
        let mut residual = BigInt::from(1234);
        m.rebuild();

        fn assert_state_consistent(m: &BandMatrix) {
            let mut updated = m.clone();
            updated.update();
            let mut rebuilt = m.clone();
            rebuilt.rebuild();
            assert_eq!(updated.det(), rebuilt.det());
        }

        for cell in (1..n).rev() {
            m.set_active_rows(cell + 1);
            if cell >= width {
                try_edge(&mut m, &mut residual, &mut chain, cell - width, cell);
                assert_state_consistent(&m);
            }
            if cell % width != 0 {
                try_edge(&mut m, &mut residual, &mut chain, cell - 1, cell);
                assert_state_consistent(&m);
            }
        }
        assert!(residual.is_zero());
    }
}
