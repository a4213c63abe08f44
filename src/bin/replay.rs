//! Headless replay: drives the game loop from a JSON input script.
//!
//! ```text
//! replay script.json
//! ```
//!
//! Script: `{ "map": "level.txt" | null, "dt": 0.0333, "frames": ["", "R", "RJ", "L"] }`.
//! Each frame lists the held keys (`L` left, `R` right, `J` jump). A relative map path
//! is resolved against the script's directory; `null` uses the bundled level.
//! Prints one JSON line per tick, then a summary line.

use std::convert::Infallible;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use tui_platformer::core::{FixedClock, FrameSink, GameLoop, GameState, ScriptedInput};
use tui_platformer::types::{HeldKeys, FRAME_MS};
use tui_platformer::GameConfig;

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    map: Option<PathBuf>,
    #[serde(default = "default_dt")]
    dt: f32,
    frames: Vec<String>,
}

fn default_dt() -> f32 {
    FRAME_MS as f32 / 1000.0
}

#[derive(Debug, Serialize)]
struct TraceLine {
    tick: u64,
    x: i32,
    y: i32,
    vy: f32,
    resting: bool,
    facing: &'static str,
    score: u32,
    exit_unlocked: bool,
    running: bool,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    termination: &'a str,
    ticks: u64,
    score: u32,
    exit_unlocked: bool,
}

/// Records one trace line per presented frame.
#[derive(Default)]
struct TraceSink {
    lines: Vec<TraceLine>,
}

impl FrameSink for TraceSink {
    type Error = Infallible;

    fn present(&mut self, state: &GameState) -> Result<(), Infallible> {
        let p = state.player();
        self.lines.push(TraceLine {
            tick: state.tick_count(),
            x: p.bounds.x,
            y: p.bounds.y,
            vy: p.vertical_velocity,
            resting: p.resting,
            facing: p.facing.as_str(),
            score: state.score(),
            exit_unlocked: state.exit_unlocked(),
            running: state.running(),
        });
        Ok(())
    }
}

fn parse_keys(frame: &str) -> Result<HeldKeys> {
    let mut keys = HeldKeys::NONE;
    for ch in frame.chars() {
        match ch.to_ascii_uppercase() {
            'L' => keys.left = true,
            'R' => keys.right = true,
            'J' => keys.jump = true,
            ' ' => {}
            other => bail!("unknown key {:?} in frame {:?}", other, frame),
        }
    }
    Ok(keys)
}

fn load_state(script: &Script, script_path: &Path) -> Result<GameState> {
    let mut config = GameConfig::default();
    config.map_path = script.map.as_ref().map(|map| match script_path.parent() {
        Some(dir) if map.is_relative() => dir.join(map),
        _ => map.clone(),
    });
    Ok(GameState::new(config.load_map()?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: replay <script.json>");
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("read script {}", path.display()))?;
    let script: Script = serde_json::from_str(&text)
        .with_context(|| format!("parse script {}", path.display()))?;
    if script.dt.is_nan() || script.dt <= 0.0 {
        bail!("dt must be positive, got {}", script.dt);
    }

    let keys = script
        .frames
        .iter()
        .map(|f| parse_keys(f.as_str()))
        .collect::<Result<Vec<_>>>()?;
    log::info!("replaying {} frames from {}", keys.len(), path.display());

    let state = load_state(&script, &path)?;
    let mut game = GameLoop::new(
        state,
        ScriptedInput::from_keys(keys),
        TraceSink::default(),
        FixedClock::new(script.dt),
    );
    let reason = match game.run() {
        Ok(reason) => reason,
        Err(never) => match never {},
    };

    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    for line in &game.sink().lines {
        serde_json::to_writer(&mut out, line)?;
        writeln!(out)?;
    }
    let state = game.state();
    let summary = Summary {
        termination: reason.as_str(),
        ticks: state.tick_count(),
        score: state.score(),
        exit_unlocked: state.exit_unlocked(),
    };
    serde_json::to_writer(&mut out, &summary)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
