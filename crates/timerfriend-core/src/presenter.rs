//! The boundary between the core and the host windowing layer.
//!
//! The core never owns layout: it pushes effects through [`OverlayPresenter`]
//! and reads rectangles back as per-callback snapshots. [`HeadlessPresenter`]
//! is an in-memory implementation that models the screen well enough to run
//! the full gesture/countdown loop without a window system.

use serde::{Deserialize, Serialize};

use crate::error::PresenterError;
use crate::geometry::{Position, Rect};

/// Effects the core requests from the host, plus the geometry it reads back.
pub trait OverlayPresenter {
    /// Reposition the draggable surface. Fails if the surface is gone.
    fn move_surface(&mut self, position: Position) -> Result<(), PresenterError>;

    /// Only used while the dismiss animation runs.
    fn set_surface_scale(&mut self, scale: f32);

    /// Attach the surface if it is not on screen yet.
    fn show_surface(&mut self);

    /// Detach the surface (countdown finished or stopped).
    fn hide_surface(&mut self);

    fn show_dismiss_zone(&mut self);

    fn hide_dismiss_zone(&mut self);

    fn set_dismiss_zone_opacity(&mut self, value: f32);

    /// Terminal: tear down every surface and end the overlay.
    fn remove_surface_and_stop(&mut self);

    fn update_progress_display(&mut self, progress: f32);

    fn update_time_label(&mut self, text: &str);

    fn hide_time_label(&mut self);

    /// Current on-screen rect of the surface, `None` if it no longer exists.
    fn surface_rect(&self) -> Option<Rect>;

    /// Current on-screen rect of the dismiss zone, `None` if it is not shown.
    fn dismiss_zone_rect(&self) -> Option<Rect>;
}

/// Screen and surface dimensions used by [`HeadlessPresenter`].
///
/// The dismiss zone is anchored bottom-center, `zone_bottom_margin` pixels
/// above the bottom edge of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLayout {
    pub screen_width: i32,
    pub screen_height: i32,
    pub surface_width: i32,
    pub surface_height: i32,
    pub zone_width: i32,
    pub zone_height: i32,
    pub zone_bottom_margin: i32,
}

impl ScreenLayout {
    pub fn dismiss_zone_rect(&self) -> Rect {
        let left = self.screen_width.saturating_sub(self.zone_width) / 2;
        let top = self
            .screen_height
            .saturating_sub(self.zone_bottom_margin)
            .saturating_sub(self.zone_height);
        Rect::from_origin_size(Position::new(left, top), self.zone_width, self.zone_height)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            screen_width: 1080,
            screen_height: 1920,
            surface_width: 200,
            surface_height: 200,
            zone_width: 160,
            zone_height: 160,
            zone_bottom_margin: 150,
        }
    }
}

/// One recorded presenter invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum PresenterCall {
    MoveSurface { position: Position },
    SetSurfaceScale { scale: f32 },
    ShowSurface,
    HideSurface,
    ShowDismissZone,
    HideDismissZone,
    SetDismissZoneOpacity { value: f32 },
    RemoveSurfaceAndStop,
    UpdateProgressDisplay { progress: f32 },
    UpdateTimeLabel { text: String },
    HideTimeLabel,
}

/// In-memory presenter with a simple screen model.
///
/// The surface starts attached at the given position. Every call is recorded
/// in order, including rejected moves.
#[derive(Debug, Clone)]
pub struct HeadlessPresenter {
    layout: ScreenLayout,
    surface_position: Position,
    surface_attached: bool,
    surface_scale: f32,
    zone_visible: bool,
    zone_opacity: f32,
    progress: f32,
    label: Option<String>,
    stopped: bool,
    calls: Vec<PresenterCall>,
}

impl HeadlessPresenter {
    pub fn new(layout: ScreenLayout, initial: Position) -> Self {
        Self {
            layout,
            surface_position: initial,
            surface_attached: true,
            surface_scale: 1.0,
            zone_visible: false,
            zone_opacity: 0.0,
            progress: 0.0,
            label: None,
            stopped: false,
            calls: Vec::new(),
        }
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    pub fn surface_position(&self) -> Position {
        self.surface_position
    }

    pub fn surface_attached(&self) -> bool {
        self.surface_attached
    }

    pub fn surface_scale(&self) -> f32 {
        self.surface_scale
    }

    pub fn zone_visible(&self) -> bool {
        self.zone_visible
    }

    pub fn zone_opacity(&self) -> f32 {
        self.zone_opacity
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<PresenterCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls matching `pred`.
    pub fn count_calls(&self, pred: impl Fn(&PresenterCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Simulate the host removing the surface behind the core's back.
    pub fn detach_surface(&mut self) {
        self.surface_attached = false;
    }

    fn record(&mut self, call: PresenterCall) {
        self.calls.push(call);
    }
}

impl OverlayPresenter for HeadlessPresenter {
    fn move_surface(&mut self, position: Position) -> Result<(), PresenterError> {
        self.record(PresenterCall::MoveSurface { position });
        if !self.surface_attached {
            return Err(PresenterError::SurfaceGone);
        }
        self.surface_position = position;
        Ok(())
    }

    fn set_surface_scale(&mut self, scale: f32) {
        self.record(PresenterCall::SetSurfaceScale { scale });
        self.surface_scale = scale.clamp(0.0, 1.0);
    }

    fn show_surface(&mut self) {
        self.record(PresenterCall::ShowSurface);
        if !self.stopped {
            self.surface_attached = true;
        }
    }

    fn hide_surface(&mut self) {
        self.record(PresenterCall::HideSurface);
        self.surface_attached = false;
    }

    fn show_dismiss_zone(&mut self) {
        self.record(PresenterCall::ShowDismissZone);
        self.zone_visible = true;
    }

    fn hide_dismiss_zone(&mut self) {
        self.record(PresenterCall::HideDismissZone);
        self.zone_visible = false;
    }

    fn set_dismiss_zone_opacity(&mut self, value: f32) {
        self.record(PresenterCall::SetDismissZoneOpacity { value });
        self.zone_opacity = value;
    }

    fn remove_surface_and_stop(&mut self) {
        self.record(PresenterCall::RemoveSurfaceAndStop);
        self.surface_attached = false;
        self.zone_visible = false;
        self.stopped = true;
    }

    fn update_progress_display(&mut self, progress: f32) {
        self.record(PresenterCall::UpdateProgressDisplay { progress });
        self.progress = progress;
    }

    fn update_time_label(&mut self, text: &str) {
        self.record(PresenterCall::UpdateTimeLabel {
            text: text.to_string(),
        });
        self.label = Some(text.to_string());
    }

    fn hide_time_label(&mut self) {
        self.record(PresenterCall::HideTimeLabel);
        self.label = None;
    }

    fn surface_rect(&self) -> Option<Rect> {
        if !self.surface_attached {
            return None;
        }
        let rect = Rect::from_origin_size(
            self.surface_position,
            self.layout.surface_width,
            self.layout.surface_height,
        );
        Some(rect.scaled_about_center(self.surface_scale))
    }

    fn dismiss_zone_rect(&self) -> Option<Rect> {
        self.zone_visible.then(|| self.layout.dismiss_zone_rect())
    }
}
