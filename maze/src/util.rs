use crate::classify::PathMark;
use crate::error::{MazeError, Result};
use crate::grid::{Grid, Point};

/// Build a grid from rows of text, the inverse of the grid's `Display`.
///
/// `.` empty, `#` wall, `S` start, `E` end, and `b`, `d`, `m` for empty
/// cells on a bfs, dfs or mixed path.
pub fn parse_rows<S: AsRef<str>>(lines: &[S]) -> Result<Grid> {
    let rows = lines.len();
    let columns = lines.first().map_or(0, |l| l.as_ref().chars().count());

    let mut grid = Grid::new(rows, columns)?;

    for (row, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.chars().count() != columns {
            return Err(MazeError::InvalidDimensions {
                rows,
                columns: line.chars().count(),
            });
        }

        for (col, c) in line.chars().enumerate() {
            let point = Point { row, col };
            match c {
                '.' => {}
                '#' => grid.set_wall(point)?,
                'S' => grid.set_start(point)?,
                'E' => grid.set_end(point)?,
                'b' => grid.cell_mut(point).mark = Some(PathMark::Bfs),
                'd' => grid.cell_mut(point).mark = Some(PathMark::Dfs),
                'm' => grid.cell_mut(point).mark = Some(PathMark::Mixed),
                found => return Err(MazeError::Parse { row, col, found }),
            }
        }
    }

    Ok(grid)
}
