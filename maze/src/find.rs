use std::collections::VecDeque;

use log::{info, trace};

use crate::classify::{classify, Algorithm, PathMark};
use crate::error::{MazeError, Result};
use crate::grid::{CellKind, CellStorage, Grid, Point};

/// What a search reports to the presentation layer, one event per step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveEvent {
    /// A non-terminal cell was taken off the frontier
    Visited(Point),
    /// A cell on the reconstructed path received its final mark
    PathStep(Point, PathMark),
    /// The search is over, always the last event
    Finished(SolveOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub algorithm: Algorithm,
    pub found: bool,
    /// Start to end, both included. Empty if no path was found.
    pub path: Vec<Point>,
    /// Number of edges on the path
    pub path_length: usize,
    /// Number of `Visited` events emitted
    pub visited: usize,
}

impl SolveOutcome {
    fn new(algorithm: Algorithm, path: Vec<Point>, visited: usize) -> Self {
        Self {
            algorithm,
            found: !path.is_empty(),
            path_length: path.len().saturating_sub(1),
            path,
            visited,
        }
    }
}

/// FIFO for breadth-first, LIFO for depth-first
#[derive(Debug, Clone)]
enum Frontier {
    Queue(VecDeque<Point>),
    Stack(Vec<Point>),
}

impl Frontier {
    fn push(&mut self, point: Point) {
        match self {
            Frontier::Queue(queue) => queue.push_back(point),
            Frontier::Stack(stack) => stack.push(point),
        }
    }

    fn pop(&mut self) -> Option<Point> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState {
    Searching,
    /// Marking the found path on the grid, `next` indexes into `path`
    Tracing { path: Vec<Point>, next: usize },
    Done(SolveOutcome),
}

/// A breadth- or depth-first search that advances one event at a time.
///
/// The walls are read from a copy of the grid taken when the search is
/// created, so painting between steps never changes the traversal. Path
/// marks are written to the grid passed to [`PathFinder::step`].
#[derive(Debug, Clone)]
pub struct PathFinder {
    algorithm: Algorithm,
    start: Point,
    goal: Point,
    snapshot: Grid,
    visited: CellStorage<bool>,
    previous: CellStorage<Option<Point>>,
    frontier: Frontier,
    visit_count: usize,
    state: PathFinderState,
}

impl PathFinder {
    pub fn new(algorithm: Algorithm, grid: &Grid) -> Result<Self> {
        let (Some(start), Some(goal)) = (grid.start(), grid.end()) else {
            return Err(MazeError::MissingEndpoints);
        };

        let mut visited: CellStorage<bool> = grid.create_storage();
        let frontier = match algorithm {
            Algorithm::Bfs => {
                *visited.get_mut(start) = true;
                Frontier::Queue(VecDeque::from([start]))
            }
            // depth-first only marks cells once they are popped
            Algorithm::Dfs => Frontier::Stack(vec![start]),
        };

        Ok(Self {
            algorithm,
            start,
            goal,
            snapshot: grid.clone(),
            visited,
            previous: grid.create_storage(),
            frontier,
            visit_count: 0,
            state: PathFinderState::Searching,
        })
    }

    /// Run the search to completion and return the outcome
    pub fn finish(mut self, grid: &mut Grid) -> SolveOutcome {
        loop {
            if let PathFinderState::Done(outcome) = self.state {
                return outcome;
            }
            self.step(grid);
        }
    }

    /// Advance until the next event. Returns `None` once `Finished` has been
    /// emitted.
    pub fn step(&mut self, grid: &mut Grid) -> Option<SolveEvent> {
        loop {
            let event = match self.state {
                PathFinderState::Searching => self.search_step(),
                PathFinderState::Tracing { .. } => self.trace_step(grid),
                PathFinderState::Done(_) => return None,
            };

            if event.is_some() {
                return event;
            }
        }
    }

    fn search_step(&mut self) -> Option<SolveEvent> {
        let Some(node) = self.frontier.pop() else {
            trace!("{}: frontier exhausted", self.algorithm);
            self.state = PathFinderState::Tracing {
                path: Vec::new(),
                next: 0,
            };
            return None;
        };

        // stale duplicates pushed before the cell was first popped are skipped here
        if self.algorithm == Algorithm::Dfs {
            if self.visited.get(node) {
                return None;
            }
            *self.visited.get_mut(node) = true;
        }

        if node == self.goal {
            let path = self.backtrack();
            trace!("{}: reached {} after {} visits", self.algorithm, node, self.visit_count);
            self.state = PathFinderState::Tracing { path, next: 0 };
        } else {
            for neighbor in self.snapshot.neighbors_of(node) {
                if self.visited.get(neighbor) {
                    continue;
                }
                if self.algorithm == Algorithm::Bfs {
                    *self.visited.get_mut(neighbor) = true;
                }
                // for depth-first the most recent push before the first pop wins
                *self.previous.get_mut(neighbor) = Some(node);
                self.frontier.push(neighbor);
            }
        }

        if node == self.start || node == self.goal {
            return None;
        }

        self.visit_count += 1;
        trace!("{}: visited {}", self.algorithm, node);
        Some(SolveEvent::Visited(node))
    }

    /// Walk the predecessors back from the goal, returning the path in start
    /// to goal order
    fn backtrack(&self) -> Vec<Point> {
        let mut path = vec![self.goal];
        let mut current = self.goal;

        while let Some(from) = self.previous.get(current) {
            path.push(from);
            current = from;
        }

        path.reverse();
        path
    }

    fn trace_step(&mut self, grid: &mut Grid) -> Option<SolveEvent> {
        let PathFinderState::Tracing { path, next } = &mut self.state else {
            return None;
        };

        let Some(point) = path.get(*next).copied() else {
            let outcome = SolveOutcome::new(self.algorithm, std::mem::take(path), self.visit_count);
            info!(
                "{} finished: found={} path_length={} visited={}",
                outcome.algorithm, outcome.found, outcome.path_length, outcome.visited
            );
            self.state = PathFinderState::Done(outcome.clone());
            return Some(SolveEvent::Finished(outcome));
        };
        *next += 1;

        if point == self.start || point == self.goal {
            return None;
        }

        // the live grid may have been painted over since the search started
        let Some(cell) = grid.cell(point).filter(|c| c.kind == CellKind::Empty) else {
            trace!("{}: not marking {}, no longer empty", self.algorithm, point);
            return None;
        };

        let mark = classify(cell.mark, self.algorithm);
        grid.cell_mut(point).mark = Some(mark);
        Some(SolveEvent::PathStep(point, mark))
    }

    pub fn state(&self) -> &PathFinderState {
        &self.state
    }
}

/// A search bound to the grid it marks, yielding its events as an iterator.
///
/// Holding the grid mutably for the whole run keeps it from being edited
/// while the search is in flight.
pub struct Solve<'a> {
    finder: PathFinder,
    grid: &'a mut Grid,
}

impl<'a> Solve<'a> {
    pub fn new(algorithm: Algorithm, grid: &'a mut Grid) -> Result<Self> {
        let finder = PathFinder::new(algorithm, grid)?;
        Ok(Self { finder, grid })
    }

    /// The grid as it looks after the last event
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Drain the remaining events and return the outcome
    pub fn finish(self) -> SolveOutcome {
        self.finder.finish(self.grid)
    }
}

impl Iterator for Solve<'_> {
    type Item = SolveEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.finder.step(self.grid)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::util::parse_rows;

    fn p(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    fn create_basic_map() -> Grid {
        parse_rows(&[
            "#######", //
            "#S###E#", //
            "#.###.#", //
            "#.#...#", //
            "#.#.###", //
            "#......", //
            "#######",
        ])
        .unwrap()
    }

    fn assert_valid_path(grid: &Grid, path: &[Point]) {
        assert_eq!(path.first().copied(), grid.start());
        assert_eq!(path.last().copied(), grid.end());
        for pair in path.windows(2) {
            assert!(grid.neighbors_of(pair[0]).any(|n| n == pair[1]));
        }
    }

    #[test]
    fn test_basic_route() {
        for algorithm in [Algorithm::Bfs, Algorithm::Dfs] {
            let mut map = create_basic_map();
            let outcome = PathFinder::new(algorithm, &map).unwrap().finish(&mut map);

            assert!(matches!(
                outcome,
                SolveOutcome {
                    found: true,
                    path_length: 12,
                    ..
                }
            ));
            assert_valid_path(&map, &outcome.path);
            assert_eq!(map.marked(algorithm.tag()).count(), 11);
        }
    }

    #[test]
    fn test_basic_no_route() {
        let mut map = create_basic_map();
        map.set_wall(p(5, 3)).unwrap();

        for algorithm in [Algorithm::Bfs, Algorithm::Dfs] {
            let outcome = PathFinder::new(algorithm, &map).unwrap().finish(&mut map);
            assert!(matches!(
                outcome,
                SolveOutcome {
                    found: false,
                    path_length: 0,
                    ..
                }
            ));
            assert!(outcome.path.is_empty());
        }

        // nothing got marked
        assert_eq!(map, {
            let mut m = create_basic_map();
            m.set_wall(p(5, 3)).unwrap();
            m
        });
    }

    #[test]
    fn test_missing_endpoints() {
        let mut map = Grid::new(5, 5).unwrap();
        assert!(matches!(
            PathFinder::new(Algorithm::Bfs, &map),
            Err(MazeError::MissingEndpoints)
        ));

        map.set_start(p(0, 0)).unwrap();
        assert!(matches!(
            Solve::new(Algorithm::Dfs, &mut map),
            Err(MazeError::MissingEndpoints)
        ));
    }

    #[test]
    fn test_bfs_open_grid() {
        let mut map = parse_rows(&[
            "S....", //
            ".....", //
            ".....", //
            ".....", //
            "....E",
        ])
        .unwrap();

        let events: Vec<_> = Solve::new(Algorithm::Bfs, &mut map).unwrap().collect();

        let visited: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SolveEvent::Visited(p) => Some(*p),
                _ => None,
            })
            .collect();
        // every cell but the terminals, in breadth-first order
        assert_eq!(visited.len(), 23);
        assert_eq!(&visited[..3], &[p(0, 1), p(1, 0), p(0, 2)]);

        let Some(SolveEvent::Finished(outcome)) = events.last() else {
            panic!("last event must be Finished");
        };
        assert!(outcome.found);
        assert_eq!(outcome.path_length, 8);
        assert_eq!(outcome.visited, 23);
        // east first, then south
        assert_eq!(
            outcome.path,
            vec![
                p(0, 0),
                p(0, 1),
                p(0, 2),
                p(0, 3),
                p(0, 4),
                p(1, 4),
                p(2, 4),
                p(3, 4),
                p(4, 4)
            ]
        );

        let steps: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SolveEvent::PathStep(..)))
            .cloned()
            .collect();
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0], SolveEvent::PathStep(p(0, 1), PathMark::Bfs));
        assert_eq!(
            map.to_string(),
            "Sbbbb\n....b\n....b\n....b\n....E\n"
        );
    }

    #[test]
    fn test_dfs_latest_push_wins() {
        // the end is right next to the start, but it gets pushed again from
        // (3, 3) before it is first popped
        let mut map = parse_rows(&[
            ".....", //
            ".....", //
            "..SE.", //
            ".....", //
            ".....",
        ])
        .unwrap();

        let outcome = PathFinder::new(Algorithm::Dfs, &map)
            .unwrap()
            .finish(&mut map);

        assert!(outcome.found);
        assert_eq!(outcome.path_length, 15);
        assert_eq!(outcome.visited, 16);
        assert_eq!(outcome.path[1], p(1, 2));
        assert_eq!(outcome.path[14], p(3, 3));
        assert_valid_path(&map, &outcome.path);

        // breadth-first goes straight there
        let outcome = PathFinder::new(Algorithm::Bfs, &map)
            .unwrap()
            .finish(&mut map);
        assert_eq!(outcome.path, vec![p(2, 2), p(2, 3)]);
        assert_eq!(outcome.visited, 0);
    }

    #[test]
    fn test_step_after_finish() {
        let mut map = create_basic_map();
        let mut finder = PathFinder::new(Algorithm::Bfs, &map).unwrap();

        let mut finished = 0;
        while let Some(event) = finder.step(&mut map) {
            if let SolveEvent::Finished(_) = event {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert!(finder.step(&mut map).is_none());
        assert!(matches!(finder.state(), PathFinderState::Done(_)));

        // finishing an already finished search hands back the same outcome
        let outcome = finder.finish(&mut map);
        assert_eq!(outcome.path_length, 12);
    }

    #[test]
    fn test_snapshot_isolation() {
        let mut map = parse_rows(&[
            "S....", //
            ".....", //
            ".....", //
            ".....", //
            "....E",
        ])
        .unwrap();

        let mut finder = PathFinder::new(Algorithm::Bfs, &map).unwrap();
        finder.step(&mut map);

        // wall off the end after the search started, the search still gets there
        map.set_wall(p(3, 4)).unwrap();
        map.set_wall(p(4, 3)).unwrap();
        map.set_wall(p(0, 1)).unwrap();

        let outcome = finder.finish(&mut map);
        assert!(outcome.found);
        assert_eq!(outcome.path_length, 8);

        // cells that turned into walls are not marked
        assert_eq!(map.cell(p(0, 1)).unwrap().kind, CellKind::Wall);
        assert_eq!(map.cell(p(0, 1)).unwrap().mark, None);
        assert_eq!(map.cell(p(3, 4)).unwrap().mark, None);
        assert_eq!(map.marked(PathMark::Bfs).count(), 5);
    }
}
