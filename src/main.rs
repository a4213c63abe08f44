//! Terminal platformer (default binary).
//!
//! Usage: `tui-platformer [MAP]`. See `GameConfig` for the environment variables.

use std::fs::File;

use anyhow::{Context, Result};

use tui_platformer::core::{FrameClock, GameLoop, GameState, TerminationReason};
use tui_platformer::input::TerminalInput;
use tui_platformer::term::{TerminalRenderer, TerminalSink};
use tui_platformer::GameConfig;

fn main() -> Result<()> {
    let mut config = GameConfig::from_env()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.map_path = Some(path.into());
    }
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    let state = GameState::new(config.load_map()?);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    if !term.keyboard_enhanced() {
        log::info!(
            "terminal does not report key releases, held keys expire after {} ms",
            config.key_release_ms
        );
    }
    let result = run(&mut term, state, &config);
    // Always try to restore terminal state.
    let restored = term.exit();

    let (reason, score) = result?;
    restored?;

    match reason {
        TerminationReason::ReachedExit => println!("Good work! Final score: {}", score),
        TerminationReason::Quit | TerminationReason::Escape => println!("Score: {}", score),
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    state: GameState,
    config: &GameConfig,
) -> Result<(TerminationReason, u32)> {
    let mut game = GameLoop::new(
        state,
        TerminalInput::new(config.key_release_ms),
        TerminalSink::new(term),
        FrameClock::new(config.fps),
    );
    let reason = game.run()?;
    let state = game.into_state();
    log::info!(
        "session over: {} after {} ticks, score {}",
        reason.as_str(),
        state.tick_count(),
        state.score()
    );
    Ok((reason, state.score()))
}

/// The screen belongs to the game, so logs only go to a file.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
