use std::io::Write;

use log::{info, warn};
use maze::{Algorithm, Grid, GridSession, PaintMode, Point, Renderer, Settings, SolveEvent};

/// Prints the grid to the terminal, redrawing in place after every event
struct TextRenderer {
    frames: usize,
}

impl Renderer for TextRenderer {
    fn draw(&mut self, grid: &Grid, event: &SolveEvent) {
        // only the marks are drawn, redraw when one changes
        if let SolveEvent::Visited(_) = event {
            return;
        }

        let mut frame = String::new();
        if self.frames > 0 {
            // move the cursor back to the top of the previous frame
            frame.push_str(&format!("\x1b[{}A", grid.rows()));
        }
        frame.push_str(&grid.to_string());

        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(frame.as_bytes()).and_then(|_| out.flush()) {
            warn!("failed to draw frame: {}", e);
        }
        self.frames += 1;
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    // settings can be given as a json file, defaults otherwise
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    let first = settings.algorithm;

    let mut session = GridSession::new(settings)?;
    let (rows, columns) = (session.grid().rows(), session.grid().columns());
    session.paint(PaintMode::Start, Point::new(0, 0))?;
    session.paint(PaintMode::End, Point::new(rows - 1, columns - 1))?;
    session.randomize();

    let mut renderer = TextRenderer { frames: 0 };
    let outcome = session.play(first, &mut renderer, std::thread::sleep)?;
    info!("{:?}", outcome);
    if !outcome.found {
        println!("No path from start to end, {} cells visited", outcome.visited);
        return Ok(());
    }

    // overlay the other algorithm to show where the two paths agree
    let second = match first {
        Algorithm::Bfs => Algorithm::Dfs,
        Algorithm::Dfs => Algorithm::Bfs,
    };
    let overlay = session.solve_keep_paths(second)?.finish();
    renderer.draw(session.grid(), &SolveEvent::Finished(overlay.clone()));

    println!(
        "{}: {} steps, {} visited / {}: {} steps, {} visited",
        first,
        outcome.path_length,
        outcome.visited,
        second,
        overlay.path_length,
        overlay.visited
    );

    Ok(())
}
