use std::time::Duration;

use crate::config::Settings;
use crate::find::{Solve, SolveEvent, SolveOutcome};
use crate::grid::Grid;

/// The presentation layer a search reports to
pub trait Renderer {
    /// Draw the grid after `event` was applied to it
    fn draw(&mut self, grid: &Grid, event: &SolveEvent);
}

impl<F: FnMut(&Grid, &SolveEvent)> Renderer for F {
    fn draw(&mut self, grid: &Grid, event: &SolveEvent) {
        self(grid, event)
    }
}

/// Feed every event of `solve` to the renderer, pausing after each one for
/// the delay the settings give it.
///
/// `sleep` does the waiting, pass a no-op to render as fast as possible.
pub fn play<R: Renderer + ?Sized>(
    mut solve: Solve<'_>,
    settings: &Settings,
    renderer: &mut R,
    mut sleep: impl FnMut(Duration),
) -> SolveOutcome {
    while let Some(event) = solve.next() {
        renderer.draw(solve.grid(), &event);

        let delay = settings.delay_for(&event);
        if !delay.is_zero() {
            sleep(delay);
        }

        if let SolveEvent::Finished(outcome) = event {
            return outcome;
        }
    }

    solve.finish()
}
