//! Grid maze editing and breadth-/depth-first path visualization.
//!
//! A [`GridSession`] owns a rectangular [`Grid`] of walls, a start and an
//! end. Searches report what they do as a stream of [`SolveEvent`]s so a
//! renderer can animate the frontier and the found path at its own pace,
//! see [`render::play`]. Cells on a path are marked with the algorithm that
//! found them, or as mixed when both algorithms' paths cross them.

pub mod classify;
pub mod config;
pub mod error;
pub mod find;
pub mod generate;
pub mod grid;
pub mod render;
pub mod session;
pub mod util;

pub use classify::{classify, Algorithm, PathMark};
pub use config::Settings;
pub use error::{MazeError, Result};
pub use find::{PathFinder, PathFinderState, Solve, SolveEvent, SolveOutcome};
pub use grid::{Cell, CellKind, Grid, Point, MAX_SIZE, MIN_SIZE};
pub use render::Renderer;
pub use session::{GridSession, PaintMode};
