//! Terminal driver for the sorting visualizer

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use sv_algorithms::{compare_all, input, VisualizerConfig};
use sv_core::{PlaybackController, PlaybackOutcome};

mod render;

use render::TerminalRenderer;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => VisualizerConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => VisualizerConfig::default(),
    };
    config.validate()?;

    info!(
        "Visualizing {} ({}, {} space) on {} elements",
        config.algorithm,
        config.algorithm.time_complexity(),
        config.algorithm.space_complexity(),
        config.size
    );
    info!("{}", config.algorithm.description());

    let array = input::random_array(config.size, &mut rand::thread_rng());
    let controller = PlaybackController::new(array.clone(), config.speed()?);

    println!("{}", compare_all(&array));

    let renderer = Arc::new(TerminalRenderer::new(controller.clone()));
    controller.add_subscriber(renderer.clone());
    renderer.draw();

    let trace = controller.generate_trace(&config.algorithm)?;

    if config.step_mode {
        controller.load_for_stepping(trace)?;
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            let (cursor, total) = controller.progress();
            println!("Next Step ({}/{}) - press Enter, or q to quit", cursor, total);
            line.clear();
            if stdin.read_line(&mut line)? == 0 || line.trim() == "q" {
                break;
            }
            if controller.advance_one()?.is_none() {
                break;
            }
        }
    } else {
        let runtime = tokio::runtime::Runtime::new()?;
        let run = controller.start(trace)?;
        let outcome = runtime.block_on(async {
            tokio::select! {
                outcome = run.drive() => outcome,
                _ = tokio::signal::ctrl_c() => {
                    if let Err(e) = controller.cancel() {
                        warn!("Cancel failed: {}", e);
                    }
                    PlaybackOutcome::Cancelled
                }
            }
        });
        info!("Playback finished: {:?}", outcome);
    }

    renderer.draw();
    Ok(())
}
