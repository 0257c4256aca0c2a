mod dial;
mod engine;
mod format;

pub use dial::{sweep_degrees, DialGeometry, DialMarker, DIAL_MARKER_COUNT, DIAL_START_DEGREES};
pub use engine::{CountdownEngine, Frame, Tick, TimerState, MS_PER_MINUTE, TICK_MS};
pub use format::format_minutes_seconds;
