use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classify::PathMark;
use crate::error::{MazeError, Result};

/// Smallest accepted number of rows or columns
pub const MIN_SIZE: usize = 5;
/// Largest accepted number of rows or columns
pub const MAX_SIZE: usize = 50;

/// Offsets visited by [`Grid::neighbors_of`]: east, south, west, north.
/// The order decides which cell wins a tie during traversal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

/// One grid position. The path mark is independent of the kind but only
/// ever set on empty cells.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub mark: Option<PathMark>,
}

impl Cell {
    /// Start and end cells are the terminals of a search
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, CellKind::Start | CellKind::End)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match (self.kind, self.mark) {
                (CellKind::Wall, _) => "#",
                (CellKind::Start, _) => "S",
                (CellKind::End, _) => "E",
                (CellKind::Empty, None) => ".",
                (CellKind::Empty, Some(PathMark::Bfs)) => "b",
                (CellKind::Empty, Some(PathMark::Dfs)) => "d",
                (CellKind::Empty, Some(PathMark::Mixed)) => "m",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular grid of cells together with the positions of its terminals.
///
/// The grid is the sole owner of cell data; `start` and `end` only refer to
/// cells by coordinate. Its size is fixed for its lifetime, a resize means
/// building a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create an all-empty grid, rejecting sizes outside [`MIN_SIZE`, `MAX_SIZE`]
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        check_dimensions(rows, columns)?;

        Ok(Self {
            rows,
            columns,
            cells: vec![vec![Cell::default(); columns]; rows],
            start: None,
            end: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Check if the provided point lies inside the grid
    pub fn is_valid(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }

    pub fn cell(&self, point: Point) -> Option<Cell> {
        self.cells
            .get(point.row)
            .and_then(|row| row.get(point.col))
            .copied()
    }

    /// Iterate over every position in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| Point { row, col }))
    }

    /// Iterate over the positions currently carrying the given mark
    pub fn marked(&self, mark: PathMark) -> impl Iterator<Item = Point> + '_ {
        self.points()
            .filter(move |p| self.cells[p.row][p.col].mark == Some(mark))
    }

    fn check(&self, point: Point) -> Result<()> {
        if self.is_valid(point) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                point,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    pub(crate) fn cell_mut(&mut self, point: Point) -> &mut Cell {
        &mut self.cells[point.row][point.col]
    }

    /// Turn the cell into a wall. Terminals are left alone.
    pub fn set_wall(&mut self, point: Point) -> Result<()> {
        self.check(point)?;

        let cell = self.cell_mut(point);
        if cell.is_terminal() {
            debug!("ignoring wall on terminal cell {}", point);
            return Ok(());
        }

        *cell = Cell {
            kind: CellKind::Wall,
            mark: None,
        };
        Ok(())
    }

    /// Move the start to the provided point
    pub fn set_start(&mut self, point: Point) -> Result<()> {
        self.place_terminal(point, CellKind::Start)
    }

    /// Move the end to the provided point
    pub fn set_end(&mut self, point: Point) -> Result<()> {
        self.place_terminal(point, CellKind::End)
    }

    fn place_terminal(&mut self, point: Point, kind: CellKind) -> Result<()> {
        self.check(point)?;

        let previous = match kind {
            CellKind::Start => self.start,
            _ => self.end,
        };

        // the vacated cell becomes empty again, its mark is not touched
        if let Some(previous) = previous.filter(|p| *p != point) {
            self.cell_mut(previous).kind = CellKind::Empty;
        }

        // one cell never holds both terminals
        match (self.cells[point.row][point.col].kind, kind) {
            (CellKind::End, CellKind::Start) => self.end = None,
            (CellKind::Start, CellKind::End) => self.start = None,
            _ => {}
        }

        *self.cell_mut(point) = Cell { kind, mark: None };

        match kind {
            CellKind::Start => self.start = Some(point),
            _ => self.end = Some(point),
        }
        Ok(())
    }

    /// Reset the cell to empty, dropping any terminal reference to it
    pub fn erase(&mut self, point: Point) -> Result<()> {
        self.check(point)?;

        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }

        *self.cell_mut(point) = Cell::default();
        Ok(())
    }

    /// Remove the path marks from every empty cell
    pub fn clear_paths(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.kind == CellKind::Empty {
                cell.mark = None;
            }
        }
    }

    /// Return an iterator over the in-bounds, non-wall neighbors of the
    /// provided point in east, south, west, north order
    pub fn neighbors_of(&self, node: Point) -> impl Iterator<Item = Point> {
        let mut points = Vec::with_capacity(4);

        for (d_row, d_col) in DIRECTIONS {
            let (Some(row), Some(col)) = (
                node.row.checked_add_signed(d_row),
                node.col.checked_add_signed(d_col),
            ) else {
                continue;
            };
            points.push(Point { row, col });
        }

        // filter to only keep cells that can be walked on
        points.retain(|p| self.is_valid(*p) && self.cells[p.row][p.col].kind != CellKind::Wall);

        points.into_iter()
    }

    /// Create a storage with one value of type T per cell
    pub fn create_storage<T: Default + Clone>(&self) -> CellStorage<T> {
        CellStorage(vec![vec![Default::default(); self.columns]; self.rows])
    }
}

/// Validate a requested grid size
pub fn check_dimensions(rows: usize, columns: usize) -> Result<()> {
    let range = MIN_SIZE..=MAX_SIZE;
    if range.contains(&rows) && range.contains(&columns) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { rows, columns })
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Per-cell values owned by a single search (visited flags, predecessors)
#[derive(Debug, Clone)]
pub struct CellStorage<T>(Vec<Vec<T>>);

impl<T: Copy> CellStorage<T> {
    pub fn get(&self, node: Point) -> T {
        self.0[node.row][node.col]
    }

    pub fn get_mut(&mut self, node: Point) -> &mut T {
        &mut self.0[node.row][node.col]
    }
}
