use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Lifecycle notifications produced by the overlay.
/// Hosts drain them after each callback; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        total_minutes: u64,
        generation: u64,
        at: DateTime<Utc>,
    },
    /// Explicit stop, or a countdown cut short by a dismiss.
    CountdownStopped {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownCompleted {
        total_minutes: u64,
        at: DateTime<Utc>,
    },
    SurfaceTapped {
        position: Position,
        at: DateTime<Utc>,
    },
    DismissRequested {
        from: Position,
        target: Position,
        generation: u64,
        at: DateTime<Utc>,
    },
    /// The presenter rejected a move mid-gesture.
    SurfaceLost {
        at: DateTime<Utc>,
    },
    /// The dismiss animation finished and the overlay was torn down.
    SurfaceRemoved {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The serde tag, handy for logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::CountdownStarted { .. } => "CountdownStarted",
            Event::CountdownStopped { .. } => "CountdownStopped",
            Event::CountdownCompleted { .. } => "CountdownCompleted",
            Event::SurfaceTapped { .. } => "SurfaceTapped",
            Event::DismissRequested { .. } => "DismissRequested",
            Event::SurfaceLost { .. } => "SurfaceLost",
            Event::SurfaceRemoved { .. } => "SurfaceRemoved",
        }
    }
}
