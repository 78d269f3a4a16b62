use alloc::{vec, vec::Vec};

// DIRECTION
// ================================================================================================

/// One of the four cardinal directions in which a cell wall can be open.
///
/// The discriminants are the connectivity-mask bits of [`Maze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0x1,
    East = 0x2,
    South = 0x4,
    West = 0x8,
}

impl Direction {
    /// All four directions, in mask-bit order.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Returns the connectivity-mask bit for this direction.
    #[inline(always)]
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Returns the direction pointing the opposite way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

// MAZE
// ================================================================================================

/// A perfect maze on a rectangular grid of cells.
///
/// Each cell carries a 4-bit connectivity mask with one [`Direction`] bit per open wall. Cells
/// are numbered row-major with `(0, 0)` in the top-left corner; south is towards larger `y`.
/// Openings are always symmetric: a cell open to the east has an eastern neighbour open to the
/// west. When all edges have been decided the open walls form a spanning tree of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    conn: Vec<u8>,
}

impl Maze {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a `width` x `height` maze with every wall closed.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            conn: vec![0; width * height],
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the width of the maze in cells.
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the maze in cells.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of cells in the maze.
    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        self.conn.len()
    }

    /// Returns the connectivity mask of the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates lie outside the grid.
    pub fn mask(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) is outside the grid");
        self.conn[y * self.width + x]
    }

    /// Returns the connectivity masks of all cells in row-major order.
    pub fn masks(&self) -> &[u8] {
        &self.conn
    }

    /// Returns true if the wall of the cell at `(x, y)` facing `dir` is open.
    pub fn is_open(&self, x: usize, y: usize, dir: Direction) -> bool {
        self.mask(x, y) & dir.mask() != 0
    }

    /// Iterates over the open edges as `(lower, higher)` pairs of row-major cell indices.
    ///
    /// Each edge appears exactly once, keyed by the east and south bits of its lower endpoint.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.conn.iter().enumerate().flat_map(move |(i, &mask)| {
            let east = (mask & Direction::East.mask() != 0).then_some((i, i + 1));
            let south = (mask & Direction::South.mask() != 0).then_some((i, i + width));
            east.into_iter().chain(south)
        })
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Opens the shared wall between two cells given by row-major index.
    ///
    /// Both cells' masks are updated, keeping the connectivity symmetric.
    ///
    /// # Panics
    /// Panics if the cells are not adjacent in the grid.
    pub fn open_between(&mut self, a: usize, b: usize) {
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        if b == a + self.width {
            self.conn[a] |= Direction::South.mask();
            self.conn[b] |= Direction::North.mask();
        } else if b == a + 1 && b % self.width != 0 {
            self.conn[a] |= Direction::East.mask();
            self.conn[b] |= Direction::West.mask();
        } else {
            panic!("cells {a} and {b} are not adjacent");
        }
    }
}

// TESTS
// ================================================================================================
