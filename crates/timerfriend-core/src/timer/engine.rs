//! Countdown engine implementation.
//!
//! The engine is a tick-driven state machine. It does not read the clock and
//! schedules nothing: the caller delivers `tick()` once per second while the
//! engine reports that it is still running.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new();
//! let first = engine.start(5)?;
//! let generation = engine.generation();
//! // Every 1000 ms:
//! match engine.tick_for(generation) {
//!     Tick::Running(frame) => repaint(frame),
//!     Tick::Completed { last } => finish(last),
//!     Tick::Idle | Tick::Stale => stop_scheduling(),
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::format::format_minutes_seconds;
use crate::error::{Result, ValidationError};

pub const MS_PER_MINUTE: u64 = 60_000;
/// Fixed decrement applied by every tick.
pub const TICK_MS: u64 = 1000;

/// Invariant: `remaining_ms <= total_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    pub total_ms: u64,
    pub remaining_ms: u64,
    pub running: bool,
}

impl TimerState {
    /// 1.0 at start, 0.0 when done.
    pub fn progress(&self) -> f32 {
        if self.total_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms as f64 / self.total_ms as f64) as f32
    }
}

/// One display update: radial progress and the digital readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub progress: f32,
    /// `None` hides the readout.
    pub label: Option<String>,
}

impl Frame {
    pub fn cleared() -> Self {
        Self {
            progress: 0.0,
            label: None,
        }
    }
}

/// Result of delivering one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// No countdown is running.
    Idle,
    /// The tick belongs to a countdown that has since been replaced or stopped.
    Stale,
    Running(Frame),
    /// This was the final tick. `last` is the frame for the final second;
    /// the display should then drop to progress 0.0.
    Completed { last: Frame },
}

impl Tick {
    /// Whether the caller should schedule another tick.
    pub fn keep_scheduling(&self) -> bool {
        matches!(self, Tick::Running(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountdownEngine {
    state: TimerState,
    total_minutes: u64,
    generation: u64,
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn remaining_ms(&self) -> u64 {
        self.state.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.state.total_ms
    }

    pub fn total_minutes(&self) -> u64 {
        self.total_minutes
    }

    /// Identifies the current countdown chain. Changes on every start and stop.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The frame the display should currently show.
    pub fn current_frame(&self) -> Frame {
        if !self.state.running {
            return Frame::cleared();
        }
        Frame {
            progress: self.state.progress(),
            label: Some(format_minutes_seconds(self.state.remaining_ms)),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh countdown, silently replacing any running one.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `total_minutes` is not positive or the
    /// duration does not fit in milliseconds. The engine is left untouched.
    pub fn start(&mut self, total_minutes: i64) -> Result<Frame> {
        if total_minutes <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "total_minutes".into(),
                message: format!("must be positive, got {total_minutes}"),
            }
            .into());
        }
        let minutes = total_minutes as u64;
        let total_ms = minutes
            .checked_mul(MS_PER_MINUTE)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "total_minutes".into(),
                message: format!("{total_minutes} minutes overflows the countdown"),
            })?;

        if self.state.running {
            debug!(
                remaining_ms = self.state.remaining_ms,
                "replacing active countdown"
            );
        }

        self.generation = self.generation.wrapping_add(1);
        self.total_minutes = minutes;
        self.state = TimerState {
            total_ms,
            remaining_ms: total_ms,
            running: true,
        };
        debug!(total_minutes = minutes, generation = self.generation, "countdown started");
        Ok(Frame {
            progress: 1.0,
            label: Some(format_minutes_seconds(total_ms)),
        })
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.state.running {
            return Tick::Idle;
        }

        let frame = Frame {
            progress: self.state.progress(),
            label: Some(format_minutes_seconds(self.state.remaining_ms)),
        };

        if self.state.remaining_ms <= TICK_MS {
            self.state.remaining_ms = 0;
            self.state.running = false;
            debug!(generation = self.generation, "countdown completed");
            return Tick::Completed { last: frame };
        }

        self.state.remaining_ms -= TICK_MS;
        Tick::Running(frame)
    }

    /// [`tick`](Self::tick), but only for the chain identified by `generation`.
    pub fn tick_for(&mut self, generation: u64) -> Tick {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "ignoring stale tick"
            );
            return Tick::Stale;
        }
        self.tick()
    }

    /// Abandon the countdown. Returns the frame to display.
    pub fn stop(&mut self) -> Frame {
        self.generation = self.generation.wrapping_add(1);
        self.state.running = false;
        self.state.remaining_ms = 0;
        Frame::cleared()
    }
}
