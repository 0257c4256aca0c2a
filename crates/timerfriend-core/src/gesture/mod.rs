mod controller;
mod dismiss;
mod pointer;

pub use controller::{
    DismissRequest, DismissZoneState, DragSession, GestureController, GestureOutcome,
    GestureState, IntersectionMode,
};
pub use dismiss::{ease_in, AnimationFrame, DismissAnimation, DEFAULT_DISMISS_DURATION_MS};
pub use pointer::{PointerEvent, PointerPhase};
