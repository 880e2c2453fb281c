use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::Algorithm;
use crate::error::{MazeError, Result};
use crate::find::SolveEvent;
use crate::generate::DEFAULT_WALL_PROBABILITY;
use crate::grid::check_dimensions;

/// Settings for a [`GridSession`](crate::GridSession) and the pace its
/// events are played back at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub algorithm: Algorithm,
    pub wall_probability: f64,
    /// Pause after each visited cell
    pub visit_delay_ms: u64,
    /// Pause after each cell marked on the path
    pub path_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 20,
            algorithm: Algorithm::Bfs,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            visit_delay_ms: 20,
            path_delay_ms: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| MazeError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.rows, self.columns)
            .map_err(|e| MazeError::InvalidSettings(e.to_string()))?;

        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(MazeError::InvalidSettings(format!(
                "wall_probability must be between 0 and 1, got {}",
                self.wall_probability
            )));
        }

        Ok(())
    }

    /// How long a renderer should wait after drawing the event
    pub fn delay_for(&self, event: &SolveEvent) -> Duration {
        match event {
            SolveEvent::Visited(_) => Duration::from_millis(self.visit_delay_ms),
            SolveEvent::PathStep(..) => Duration::from_millis(self.path_delay_ms),
            SolveEvent::Finished(_) => Duration::ZERO,
        }
    }
}
