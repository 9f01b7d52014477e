use std::io;

use clap::Parser;
use log::{error, info};

use space_collector::config::Config;
use space_collector::rendering::{OutputTarget, ScreenBuffer};
use space_collector::terminal_io::{InputSource, SimulatedInput, TerminalGuard};
use space_collector::{Game, GameError, HighScoreStore};

fn main() -> Result<(), GameError> {
    let config = Config::parse();
    simple_logging::log_to_file(&config.log_file, config.log_level()).map_err(GameError::Logging)?;
    info!("Starting Space Collector.");

    let store = HighScoreStore::new(&config.high_score_file);

    let summary = if config.headless {
        info!("Headless mode enabled ({}x{}).", config.width, config.height);
        let game = Game::new(
            store,
            InputSource::Simulated(SimulatedInput::demo_script()),
            OutputTarget::ScreenBuffer(ScreenBuffer::new(config.width, config.height)),
            (config.width, config.height),
            true,
            config.rng(),
        );
        game.with_max_frames(config.frames).run()?
    } else {
        let guard = TerminalGuard::enter()?;
        let size = crossterm::terminal::size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
        info!("Terminal size: {}x{}", size.0, size.1);
        let game = Game::new(
            store,
            InputSource::Terminal,
            OutputTarget::Stdout(io::stdout()),
            size,
            guard.reports_release(),
            config.rng(),
        );
        let summary = game.with_max_frames(config.frames).run();
        drop(guard);
        summary?
    };

    info!(
        "Exiting after {} frames: score {}, high score {}.",
        summary.frames, summary.score, summary.high_score
    );
    Ok(())
}
