#![cfg_attr(not(feature = "std"), no_std)]

//! Shared data model for the mazing workspace: the maze representation itself, the union-find
//! structure used while deciding which edges a maze contains, and the workspace error type.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod chain;
pub use chain::Chain;

mod errors;
pub use errors::MazeError;

mod maze;
pub use maze::{Direction, Maze};

// RE-EXPORTS
// ================================================================================================

/// The arbitrary-precision integer type used throughout the workspace.
pub use num_bigint::BigInt;
