#![cfg_attr(not(feature = "std"), no_std)]

//! Exact enumeration and unranking of the perfect mazes on a rectangular grid.
//!
//! A perfect maze on a W x H grid of cells is a spanning tree of the grid's adjacency graph.
//! [`count`] returns the exact number of such trees; [`maze_by_index`] returns the tree at a
//! given rank in the enumeration order. Both operate on arbitrary-precision integers throughout,
//! so results are exact at any grid size.
//!
//! Counting runs a doubling recurrence on small dense matrices over the planar dual of the grid
//! (O(log H) matrix products). Unranking maintains a fraction-free Bareiss elimination of the
//! grid Laplacian inside a symmetric band matrix, recomputing only the suffix each edge decision
//! disturbs.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod count;
mod dense;
mod laplacian;
mod matrix;
mod unrank;
mod utils;

pub use count::count;
pub use laplacian::grid_laplacian;
pub use matrix::BandMatrix;
pub use unrank::maze_by_index;

// RE-EXPORTS
// ================================================================================================

pub use mazing_core::{BigInt, Chain, Direction, Maze, MazeError};
