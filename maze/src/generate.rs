//! Random wall placement.
//!
//! Every non-terminal cell independently becomes a wall with a fixed
//! probability. Nothing guarantees that the start can still reach the end.

use log::debug;
use rand::Rng;

use crate::grid::{Cell, CellKind, Grid};

/// Probability used when the caller doesn't pick one
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

/// Stamps each non-terminal cell of `grid` as a wall with probability
/// `wall_probability`, or as a clean empty cell otherwise.
pub fn scatter_walls<R: Rng>(grid: &mut Grid, wall_probability: f64, rng: &mut R) {
    let mut walls = 0;

    for point in grid.points() {
        let cell = grid.cell_mut(point);
        if cell.is_terminal() {
            continue;
        }

        let kind = if rng.random::<f64>() < wall_probability {
            walls += 1;
            CellKind::Wall
        } else {
            CellKind::Empty
        };
        *cell = Cell { kind, mark: None };
    }

    debug!(
        "scattered {} walls over a {}x{} grid (p={})",
        walls,
        grid.rows(),
        grid.columns(),
        wall_probability
    );
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::classify::PathMark;
    use crate::grid::Point;
    use crate::util::parse_rows;

    #[test]
    fn test_keeps_terminals() {
        let mut grid = Grid::new(20, 20).unwrap();
        grid.set_start(Point::new(3, 4)).unwrap();
        grid.set_end(Point::new(17, 9)).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2 {
            scatter_walls(&mut grid, DEFAULT_WALL_PROBABILITY, &mut rng);

            assert_eq!(grid.start(), Some(Point::new(3, 4)));
            assert_eq!(grid.end(), Some(Point::new(17, 9)));
            assert_eq!(grid.cell(Point::new(3, 4)).unwrap().kind, CellKind::Start);
            assert_eq!(grid.cell(Point::new(17, 9)).unwrap().kind, CellKind::End);
        }
    }

    #[test]
    fn test_extremes() {
        let mut grid = parse_rows(&[
            "S#bd.", //
            ".m...", //
            ".....", //
            ".....", //
            "....E",
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        scatter_walls(&mut grid, 0.0, &mut rng);
        assert_eq!(grid.to_string(), "S....\n.....\n.....\n.....\n....E\n");

        scatter_walls(&mut grid, 1.0, &mut rng);
        assert_eq!(grid.to_string(), "S####\n#####\n#####\n#####\n####E\n");
        assert_eq!(grid.marked(PathMark::Mixed).count(), 0);
    }

    #[test]
    fn test_wall_ratio() {
        let mut grid = Grid::new(50, 50).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        scatter_walls(&mut grid, DEFAULT_WALL_PROBABILITY, &mut rng);

        let walls = grid
            .points()
            .filter(|p| grid.cell(*p).unwrap().kind == CellKind::Wall)
            .count();

        // 750 expected out of 2500
        assert!((600..900).contains(&walls), "walls = {}", walls);
    }
}
