use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use crate::classify::Algorithm;
use crate::config::Settings;
use crate::error::{MazeError, Result};
use crate::find::{PathFinder, Solve, SolveEvent, SolveOutcome};
use crate::generate::scatter_walls;
use crate::grid::{check_dimensions, Grid, Point};
use crate::render::{self, Renderer};

/// What painting a cell does
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PaintMode {
    #[default]
    Wall,
    Start,
    End,
    Erase,
}

impl Display for PaintMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PaintMode::Wall => "wall",
                PaintMode::Start => "start",
                PaintMode::End => "end",
                PaintMode::Erase => "erase",
            }
        )
    }
}

impl FromStr for PaintMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "wall" => Ok(PaintMode::Wall),
            "start" => Ok(PaintMode::Start),
            "end" => Ok(PaintMode::End),
            "erase" => Ok(PaintMode::Erase),
            _ => Err(anyhow::anyhow!("Invalid paint mode: {}", s)),
        }
    }
}

/// Everything one maze editor works on: the grid with its terminals, the
/// current paint mode, the settings and an optional search advanced one
/// step at a time.
#[derive(Debug, Clone)]
pub struct GridSession {
    grid: Grid,
    mode: PaintMode,
    settings: Settings,
    search: Option<PathFinder>,
}

impl GridSession {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            grid: Grid::new(settings.rows, settings.columns)?,
            mode: PaintMode::default(),
            settings,
            search: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        self.mode = mode;
    }

    /// Apply `mode` to a single cell
    pub fn paint(&mut self, mode: PaintMode, point: Point) -> Result<()> {
        match mode {
            PaintMode::Wall => self.grid.set_wall(point),
            PaintMode::Start => self.grid.set_start(point),
            PaintMode::End => self.grid.set_end(point),
            PaintMode::Erase => self.grid.erase(point),
        }
    }

    /// Apply the current mode to a single cell
    pub fn paint_at(&mut self, point: Point) -> Result<()> {
        self.paint(self.mode, point)
    }

    pub fn clear_paths(&mut self) {
        self.grid.clear_paths();
    }

    /// Scatter walls using the thread-local random generator
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        scatter_walls(&mut self.grid, self.settings.wall_probability, rng);
    }

    /// Replace the grid with an empty one of the given size. An in-flight
    /// stepped search is dropped.
    pub fn reset(&mut self, rows: usize, columns: usize) -> Result<()> {
        if let Err(e) = check_dimensions(rows, columns) {
            warn!("{}", e);
            return Err(e);
        }

        if self.search.take().is_some() {
            debug!("dropping search in progress");
        }
        self.grid = Grid::new(rows, columns)?;
        debug!("reset grid to {}x{}", rows, columns);
        Ok(())
    }

    fn ensure_endpoints(&self) -> Result<()> {
        match (self.grid.start(), self.grid.end()) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(MazeError::MissingEndpoints),
        }
    }

    /// Clear the existing path marks and search with `algorithm`, yielding
    /// the events as an iterator
    pub fn solve(&mut self, algorithm: Algorithm) -> Result<Solve<'_>> {
        self.ensure_endpoints()?;
        self.grid.clear_paths();
        self.solve_keep_paths(algorithm)
    }

    /// Search without clearing first, so cells on both a bfs and a dfs path
    /// end up mixed
    pub fn solve_keep_paths(&mut self, algorithm: Algorithm) -> Result<Solve<'_>> {
        let solve = Solve::new(algorithm, &mut self.grid)?;
        self.search = None;
        Ok(solve)
    }

    /// Clear the paths and run `algorithm` through the renderer, sleeping
    /// after every event for the configured delay
    pub fn play<R: Renderer + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        renderer: &mut R,
        sleep: impl FnMut(Duration),
    ) -> Result<SolveOutcome> {
        self.ensure_endpoints()?;
        self.search = None;
        self.grid.clear_paths();

        let solve = Solve::new(algorithm, &mut self.grid)?;
        Ok(render::play(solve, &self.settings, renderer, sleep))
    }

    /// Clear the paths and begin a search that is advanced with
    /// [`GridSession::step`], leaving the grid free to be painted between
    /// steps. Replaces any search already in progress.
    pub fn start_search(&mut self, algorithm: Algorithm) -> Result<()> {
        let finder = PathFinder::new(algorithm, &self.grid)?;
        self.grid.clear_paths();
        self.search = Some(finder);
        Ok(())
    }

    /// Advance the search started with [`GridSession::start_search`]
    pub fn step(&mut self) -> Option<SolveEvent> {
        let event = self.search.as_mut()?.step(&mut self.grid);
        if matches!(event, None | Some(SolveEvent::Finished(_))) {
            self.search = None;
        }
        event
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }
}
