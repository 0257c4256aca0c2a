//! Drag/dismiss gesture state machine.
//!
//! One controller drives one draggable surface. It disambiguates a tap from a
//! drag, keeps the surface glued to the pointer, fades the dismiss zone in as
//! the pointer travels down, and hands off to the dismiss animation once the
//! surface touches the zone.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> PossibleTap -> Dragging -> (Idle | Dismissing)
//!              \-> Idle (tap or cancel)
//! ```
//!
//! `Dismissing` is terminal for the session: only a new pointer-down leaves it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::pointer::{PointerEvent, PointerPhase};
use crate::geometry::{Position, Rect, TouchPoint};
use crate::presenter::OverlayPresenter;
use crate::storage::GestureConfig;

/// How the surface and the dismiss zone are tested against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntersectionMode {
    /// Any strict overlap of the two rectangles.
    #[default]
    Overlap,
    /// The surface center must lie inside the zone.
    Center,
}

impl IntersectionMode {
    pub fn hits(self, surface: &Rect, zone: &Rect) -> bool {
        match self {
            IntersectionMode::Overlap => surface.intersects(zone),
            IntersectionMode::Center => !surface.is_empty() && zone.contains(surface.center()),
        }
    }
}

/// Anchors recorded at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub anchor_position: Position,
    pub anchor_touch: TouchPoint,
    pub start_drag_y: f32,
}

impl DragSession {
    fn begin(position: Position, touch: TouchPoint) -> Self {
        Self {
            anchor_position: position,
            anchor_touch: touch,
            start_drag_y: touch.y,
        }
    }

    fn target_for(&self, touch: TouchPoint) -> Position {
        let (dx, dy) = touch.delta_from(self.anchor_touch);
        self.anchor_position.offset(dx, dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    PossibleTap(DragSession),
    Dragging(DragSession),
    Dismissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DismissZoneState {
    pub visible: bool,
    pub highlight: f32,
}

/// Hand-off to the dismiss animation: where the surface was when it hit the
/// zone, and the zone center it should shrink into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissRequest {
    pub from: Position,
    pub target: Position,
}

/// What a single pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// The event had no meaning in the current state.
    Ignored,
    /// A new session started.
    Pressed,
    Moved(Position),
    Tapped,
    /// Drag ended normally; the surface stays where it was dropped.
    Released(Position),
    Cancelled,
    DismissRequested(DismissRequest),
    /// The presenter rejected a move; the session was abandoned.
    SurfaceLost,
}

#[derive(Debug, Clone)]
pub struct GestureController {
    config: GestureConfig,
    position: Position,
    state: GestureState,
    zone: DismissZoneState,
}

impl GestureController {
    pub fn new(config: GestureConfig, position: Position) -> Self {
        Self {
            config,
            position,
            state: GestureState::Idle,
            zone: DismissZoneState::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn dismiss_zone(&self) -> DismissZoneState {
        self.zone
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Movement (in raw pixels) a pointer must exceed before a press becomes a drag.
    pub fn drag_threshold_px(&self) -> f32 {
        self.config.drag_threshold_dp * self.config.density
    }

    pub fn fade_distance_px(&self) -> f32 {
        self.config.fade_distance_dp * self.config.density
    }

    /// Dismiss-zone highlight for a pointer at `current_y` in a drag that began at `start_y`.
    pub fn highlight_for(&self, start_y: f32, current_y: f32) -> f32 {
        let travel = current_y - start_y;
        let distance = self.fade_distance_px();
        if !(distance > f32::EPSILON) {
            return if travel > 0.0 { 1.0 } else { 0.0 };
        }
        let h = (travel / distance).clamp(0.0, 1.0);
        if h.is_nan() {
            0.0
        } else {
            h
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Feed one pointer event. Effects are applied to `presenter` immediately.
    pub fn handle<P>(&mut self, event: PointerEvent, presenter: &mut P) -> GestureOutcome
    where
        P: OverlayPresenter + ?Sized,
    {
        let touch = event.touch();
        match (self.state, event.phase) {
            (_, PointerPhase::Down) => self.press(touch, presenter),
            (GestureState::PossibleTap(session), PointerPhase::Move) => {
                if touch.distance_from(session.anchor_touch) > self.drag_threshold_px() {
                    debug!(x = touch.x, y = touch.y, "drag threshold crossed");
                    self.state = GestureState::Dragging(session);
                    self.zone = DismissZoneState {
                        visible: true,
                        highlight: 0.0,
                    };
                    presenter.show_dismiss_zone();
                    self.drag_to(session, touch, presenter)
                } else {
                    match self.move_surface(session.target_for(touch), presenter) {
                        Some(position) => GestureOutcome::Moved(position),
                        None => self.abandon(presenter),
                    }
                }
            }
            (GestureState::Dragging(session), PointerPhase::Move) => {
                self.drag_to(session, touch, presenter)
            }
            (GestureState::PossibleTap(_), PointerPhase::Up) => {
                debug!("gesture classified as tap");
                self.state = GestureState::Idle;
                GestureOutcome::Tapped
            }
            (GestureState::PossibleTap(_), PointerPhase::Cancel) => {
                self.state = GestureState::Idle;
                GestureOutcome::Cancelled
            }
            (GestureState::Dragging(_), PointerPhase::Up) => {
                self.end_drag(presenter);
                debug!(x = self.position.x, y = self.position.y, "drag released");
                GestureOutcome::Released(self.position)
            }
            (GestureState::Dragging(_), PointerPhase::Cancel) => {
                self.end_drag(presenter);
                debug!("drag cancelled");
                GestureOutcome::Cancelled
            }
            (GestureState::Idle | GestureState::Dismissing, _) => GestureOutcome::Ignored,
        }
    }

    /// Drop any active session and hide the dismiss zone if it is shown.
    pub fn reset<P>(&mut self, presenter: &mut P)
    where
        P: OverlayPresenter + ?Sized,
    {
        if self.zone.visible {
            presenter.hide_dismiss_zone();
        }
        self.zone = DismissZoneState::default();
        self.state = GestureState::Idle;
    }

    /// Position written by the dismiss animation.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn press<P>(&mut self, touch: TouchPoint, presenter: &mut P) -> GestureOutcome
    where
        P: OverlayPresenter + ?Sized,
    {
        if self.state != GestureState::Idle {
            debug!("pointer-down replaces active session");
            self.reset(presenter);
        }
        self.state = GestureState::PossibleTap(DragSession::begin(self.position, touch));
        GestureOutcome::Pressed
    }

    fn drag_to<P>(&mut self, session: DragSession, touch: TouchPoint, presenter: &mut P) -> GestureOutcome
    where
        P: OverlayPresenter + ?Sized,
    {
        let Some(position) = self.move_surface(session.target_for(touch), presenter) else {
            return self.abandon(presenter);
        };

        if let Some(request) = self.dismiss_hit(presenter) {
            debug!(
                from_x = request.from.x,
                from_y = request.from.y,
                target_x = request.target.x,
                target_y = request.target.y,
                "surface hit dismiss zone"
            );
            self.state = GestureState::Dismissing;
            return GestureOutcome::DismissRequested(request);
        }

        let highlight = self.highlight_for(session.start_drag_y, touch.y);
        self.zone.highlight = highlight;
        presenter.set_dismiss_zone_opacity(highlight);
        trace!(x = position.x, y = position.y, highlight, "drag move");
        GestureOutcome::Moved(position)
    }

    fn dismiss_hit<P>(&self, presenter: &P) -> Option<DismissRequest>
    where
        P: OverlayPresenter + ?Sized,
    {
        // Missing geometry means a stale surface or zone: no intersection.
        let surface = presenter.surface_rect()?;
        let zone = presenter.dismiss_zone_rect()?;
        self.config
            .intersection
            .hits(&surface, &zone)
            .then(|| DismissRequest {
                from: surface.origin(),
                target: zone.center(),
            })
    }

    fn move_surface<P>(&mut self, target: Position, presenter: &mut P) -> Option<Position>
    where
        P: OverlayPresenter + ?Sized,
    {
        match presenter.move_surface(target) {
            Ok(()) => {
                self.position = target;
                Some(target)
            }
            Err(e) => {
                warn!(error = %e, "surface move rejected, abandoning gesture");
                None
            }
        }
    }

    fn abandon<P>(&mut self, presenter: &mut P) -> GestureOutcome
    where
        P: OverlayPresenter + ?Sized,
    {
        self.reset(presenter);
        GestureOutcome::SurfaceLost
    }

    fn end_drag<P>(&mut self, presenter: &mut P)
    where
        P: OverlayPresenter + ?Sized,
    {
        self.reset(presenter);
    }
}
