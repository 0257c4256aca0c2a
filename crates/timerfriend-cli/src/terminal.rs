//! Terminal rendition of the overlay surface.
//!
//! Geometry and gesture bookkeeping are delegated to [`HeadlessPresenter`];
//! this type only adds a one-line status display on stderr.

use std::io::Write;

use timerfriend_core::{HeadlessPresenter, OverlayPresenter, Position, PresenterError, Rect};

const BAR_WIDTH: usize = 30;

pub struct TerminalPresenter {
    inner: HeadlessPresenter,
    dirty: bool,
}

impl TerminalPresenter {
    pub fn new(inner: HeadlessPresenter) -> Self {
        Self { inner, dirty: false }
    }

    /// Redraw the status line if anything visible changed since the last call.
    pub fn flush(&mut self, sweep_degrees: f32) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        let line = render_line(self.inner.progress(), self.inner.label(), sweep_degrees);
        let mut err = std::io::stderr().lock();
        // A closed stderr must not take the countdown down with it.
        let _ = write!(err, "\r{line}");
        let _ = err.flush();
    }

    /// Move past the status line so later output starts on a fresh row.
    pub fn finish(&mut self) {
        eprintln!();
    }
}

/// `[#########.....] 4:59  (29.9°)`, or a blank bar once the label is hidden.
pub fn render_line(progress: f32, label: Option<&str>, sweep_degrees: f32) -> String {
    let filled = (progress.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    match label {
        Some(text) => format!("[{bar}] {text:>6}  ({sweep_degrees:.1}°)"),
        None => format!("[{bar}] {:>6}", "--:--"),
    }
}

impl OverlayPresenter for TerminalPresenter {
    fn move_surface(&mut self, position: Position) -> Result<(), PresenterError> {
        self.inner.move_surface(position)
    }

    fn set_surface_scale(&mut self, scale: f32) {
        self.inner.set_surface_scale(scale);
    }

    fn show_surface(&mut self) {
        self.inner.show_surface();
    }

    fn hide_surface(&mut self) {
        self.inner.hide_surface();
    }

    fn show_dismiss_zone(&mut self) {
        self.inner.show_dismiss_zone();
    }

    fn hide_dismiss_zone(&mut self) {
        self.inner.hide_dismiss_zone();
    }

    fn set_dismiss_zone_opacity(&mut self, value: f32) {
        self.inner.set_dismiss_zone_opacity(value);
    }

    fn remove_surface_and_stop(&mut self) {
        self.inner.remove_surface_and_stop();
    }

    fn update_progress_display(&mut self, progress: f32) {
        self.inner.update_progress_display(progress);
        self.dirty = true;
    }

    fn update_time_label(&mut self, text: &str) {
        self.inner.update_time_label(text);
        self.dirty = true;
    }

    fn hide_time_label(&mut self) {
        self.inner.hide_time_label();
        self.dirty = true;
    }

    fn surface_rect(&self) -> Option<Rect> {
        self.inner.surface_rect()
    }

    fn dismiss_zone_rect(&self) -> Option<Rect> {
        self.inner.dismiss_zone_rect()
    }
}
