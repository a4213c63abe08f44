//! Game loop - clock, input, update, render, repeat until the session ends.
//!
//! The loop is `Running -> Terminated(reason)`. Termination is only observed at
//! iteration boundaries: a tick always finishes (and is presented) before the loop
//! returns.
//!
//! I/O sits behind three seams so the loop itself stays deterministic under test:
//! [`InputSource`] for keys, [`FrameSink`] for rendering and [`Clock`] for time.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::thread;
use std::time::{Duration, Instant};

use crate::game_state::{GameState, TerminationReason};
use crate::types::{HeldKeys, InputFrame, InputSource};

/// Supplies the elapsed time for each iteration.
pub trait Clock {
    /// Seconds since the previous call
    fn tick(&mut self) -> f32;
}

/// Receives the state after every tick.
pub trait FrameSink {
    type Error;

    fn present(&mut self, state: &GameState) -> Result<(), Self::Error>;
}

/// Frame limiter over the wall clock.
///
/// Each call sleeps off whatever is left of the frame budget and returns the real
/// time since the previous call, so a slow platform just sees larger steps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            frame: Duration::from_secs(1) / fps,
            last: Instant::now(),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt.as_secs_f32()
    }
}

/// Constant step, for headless runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.dt
    }
}

/// Plays back a fixed list of input frames, then reports `quit`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = HeldKeys>) -> Self {
        Self::new(keys.into_iter().map(InputFrame::held))
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or(InputFrame {
            quit: true,
            ..InputFrame::default()
        })
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    type Error = Infallible;

    fn present(&mut self, _state: &GameState) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct GameLoop<I, S, C> {
    state: GameState,
    input: I,
    sink: S,
    clock: C,
}

impl<I, S, C> GameLoop<I, S, C>
where
    I: InputSource,
    S: FrameSink,
    C: Clock,
{
    pub fn new(state: GameState, input: I, sink: S, clock: C) -> Self {
        Self {
            state,
            input,
            sink,
            clock,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run one iteration. Returns the termination reason once the session is over.
    pub fn step(&mut self) -> Result<Option<TerminationReason>, S::Error> {
        if let Some(reason) = self.state.termination() {
            return Ok(Some(reason));
        }

        let dt = self.clock.tick();
        let frame = self.input.poll();

        if frame.quit {
            self.state.terminate(TerminationReason::Quit);
            return Ok(self.state.termination());
        }
        if frame.escape {
            self.state.terminate(TerminationReason::Escape);
            return Ok(self.state.termination());
        }

        self.state.tick(dt, frame.held);
        self.sink.present(&self.state)?;
        Ok(self.state.termination())
    }

    /// Iterate until the session terminates.
    pub fn run(&mut self) -> Result<TerminationReason, S::Error> {
        loop {
            if let Some(reason) = self.step()? {
                return Ok(reason);
            }
        }
    }
}
