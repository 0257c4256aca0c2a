//! # TimerFriend Core Library
//!
//! This library provides the logic behind TimerFriend's floating countdown
//! widget: a small always-on-top surface that can be dragged around, flung
//! onto a dismiss zone to remove it, and that shows a running countdown as a
//! radial dial plus a `M:SS` readout.
//!
//! ## Architecture
//!
//! - **Gesture Controller**: a four-state machine (`Idle`, `PossibleTap`,
//!   `Dragging`, `Dismissing`) that turns pointer events into surface moves
//!   and a dismiss decision
//! - **Countdown Engine**: a tick-driven state machine; the caller delivers
//!   one `tick()` per second and the engine reports whether to keep going
//! - **Presenter**: the trait the host windowing layer implements; the core
//!   never owns layout, it only tests rectangles the host reports
//! - **Overlay**: composes the above and guards every scheduled callback with
//!   a generation number so nothing stale can mutate state
//!
//! ## Key Components
//!
//! - [`Overlay`]: single entry point for host callbacks
//! - [`GestureController`]: drag/dismiss state machine
//! - [`CountdownEngine`]: countdown state machine
//! - [`OverlayPresenter`]: host boundary
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod overlay;
pub mod presenter;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, PresenterError, ValidationError};
pub use events::Event;
pub use geometry::{Position, Rect, TouchPoint};
pub use gesture::{
    DismissAnimation, DismissRequest, DismissZoneState, GestureController, GestureOutcome,
    GestureState, IntersectionMode, PointerEvent, PointerPhase,
};
pub use overlay::{AnimationStatus, Overlay, TickStatus};
pub use presenter::{HeadlessPresenter, OverlayPresenter, PresenterCall, ScreenLayout};
pub use storage::Config;
pub use timer::{format_minutes_seconds, CountdownEngine, Frame, Tick, TimerState};
