use mazing_engine::{Direction, Maze};

// ASCII RENDERING
// ================================================================================================

/// Renders the maze as ASCII art.
///
/// Cells are drawn as `+---+` boxes with openings where the connectivity bits are set; the
/// output ends with a blank line.
pub fn render(maze: &Maze) -> String {
    let mut out = String::new();

    for y in 0..maze.height() {
        for x in 0..maze.width() {
            out.push_str(if maze.is_open(x, y, Direction::North) { "+   " } else { "+---" });
        }
        out.push_str("+\n|");

        for x in 0..maze.width() {
            out.push_str("   ");
            out.push_str(if maze.is_open(x, y, Direction::East) { " " } else { "|" });
        }
        out.push('\n');
    }

    for _ in 0..maze.width() {
        out.push_str("+---");
    }
    out.push_str("+\n\n");

    out
}

// TESTS
// ================================================================================================
