//! Composition root wiring gestures, countdown and dismiss animation to a presenter.
//!
//! The host delivers every callback here: pointer events, ticks and animation
//! steps. Ticks and animation steps carry the generation they were scheduled
//! for; anything that does not match the live chain is dropped, so a host that
//! is slow to cancel a timer can never resurrect a stopped countdown or move a
//! surface that is already gone.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::gesture::{DismissAnimation, GestureController, GestureOutcome, PointerEvent};
use crate::presenter::OverlayPresenter;
use crate::storage::Config;
use crate::timer::{sweep_degrees, CountdownEngine, Frame, Tick};

/// What the host should do with its tick timer after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Finished,
    /// Stale or idle tick; stop scheduling this chain.
    Ignored,
}

/// What the host should do with its animation driver after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Continue,
    Finished,
    Ignored,
}

pub struct Overlay<P: OverlayPresenter> {
    presenter: P,
    gesture: GestureController,
    countdown: CountdownEngine,
    dismissal: Option<DismissAnimation>,
    dismiss_generation: u64,
    dismiss_duration_ms: u64,
    torn_down: bool,
    events: Vec<Event>,
}

impl<P: OverlayPresenter> Overlay<P> {
    pub fn new(presenter: P, config: &Config) -> Self {
        let gesture =
            GestureController::new(config.gesture.clone(), config.layout.initial_position());
        Self::with_parts(presenter, gesture, config.animation.dismiss_duration_ms)
    }

    pub fn with_parts(presenter: P, gesture: GestureController, dismiss_duration_ms: u64) -> Self {
        Self {
            presenter,
            gesture,
            countdown: CountdownEngine::new(),
            dismissal: None,
            dismiss_generation: 0,
            dismiss_duration_ms,
            torn_down: false,
            events: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    /// The running dismiss animation, if any.
    pub fn dismissal(&self) -> Option<&DismissAnimation> {
        self.dismissal.as_ref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current sweep of the radial dial in degrees.
    pub fn dial_sweep_degrees(&self) -> f32 {
        let state = self.countdown.state();
        sweep_degrees(state.progress(), self.countdown.total_minutes())
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Countdown ────────────────────────────────────────────────────

    /// Start (or restart) the countdown and return the generation the host
    /// must pass back with every tick.
    ///
    /// # Errors
    ///
    /// Fails for non-positive durations, or once the overlay has been torn
    /// down. Nothing changes on error.
    pub fn start_countdown(&mut self, minutes: i64) -> Result<u64> {
        if self.torn_down {
            return Err(CoreError::OverlayClosed);
        }
        let frame = self.countdown.start(minutes)?;
        let generation = self.countdown.generation();

        self.presenter.show_surface();
        self.apply_frame(&frame);
        self.push(Event::CountdownStarted {
            total_minutes: self.countdown.total_minutes(),
            generation,
            at: Utc::now(),
        });
        info!(minutes, generation, "countdown started");
        Ok(generation)
    }

    /// Stop the countdown and take the surface off screen.
    pub fn stop_countdown(&mut self) {
        if self.torn_down || !self.countdown.is_running() {
            return;
        }
        let remaining_ms = self.countdown.remaining_ms();
        let frame = self.countdown.stop();
        self.apply_frame(&frame);
        self.retire_surface();
        self.push(Event::CountdownStopped {
            remaining_ms,
            at: Utc::now(),
        });
        info!(remaining_ms, "countdown stopped");
    }

    pub fn on_tick(&mut self, generation: u64) -> TickStatus {
        if self.torn_down {
            return TickStatus::Ignored;
        }
        match self.countdown.tick_for(generation) {
            Tick::Running(frame) => {
                self.apply_frame(&frame);
                TickStatus::Continue
            }
            Tick::Completed { last } => {
                self.apply_frame(&last);
                self.apply_frame(&Frame::cleared());
                self.retire_surface();
                self.push(Event::CountdownCompleted {
                    total_minutes: self.countdown.total_minutes(),
                    at: Utc::now(),
                });
                info!("countdown completed");
                TickStatus::Finished
            }
            Tick::Idle | Tick::Stale => TickStatus::Ignored,
        }
    }

    // ── Gestures ─────────────────────────────────────────────────────

    pub fn on_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        if self.torn_down || self.dismissal.is_some() {
            return GestureOutcome::Ignored;
        }

        let outcome = self.gesture.handle(event, &mut self.presenter);
        match outcome {
            GestureOutcome::Tapped => self.push(Event::SurfaceTapped {
                position: self.gesture.position(),
                at: Utc::now(),
            }),
            GestureOutcome::DismissRequested(request) => {
                self.dismiss_generation = self.dismiss_generation.wrapping_add(1);
                let generation = self.dismiss_generation;
                self.dismissal = Some(DismissAnimation::new(
                    generation,
                    request,
                    self.dismiss_duration_ms,
                ));
                self.push(Event::DismissRequested {
                    from: request.from,
                    target: request.target,
                    generation,
                    at: Utc::now(),
                });
                info!(generation, "dismiss animation requested");
            }
            GestureOutcome::SurfaceLost => self.push(Event::SurfaceLost { at: Utc::now() }),
            _ => {}
        }
        outcome
    }

    /// Apply one animation step. `scale` runs from 1.0 down to 0.0; a scale
    /// of zero (or below) completes the animation and tears the overlay down.
    pub fn on_animation_step(&mut self, generation: u64, scale: f32) -> AnimationStatus {
        let Some(animation) = self.dismissal else {
            return AnimationStatus::Ignored;
        };
        if animation.generation() != generation || scale.is_nan() {
            debug!(
                stale = generation,
                current = animation.generation(),
                "ignoring stale animation step"
            );
            return AnimationStatus::Ignored;
        }

        let scale = scale.clamp(0.0, 1.0);
        let position = animation.position_for(scale);
        self.presenter.set_surface_scale(scale);
        if let Err(e) = self.presenter.move_surface(position) {
            debug!(error = %e, "animation move rejected");
        }
        self.gesture.set_position(position);

        if scale > 0.0 {
            return AnimationStatus::Continue;
        }

        self.dismissal = None;
        if self.countdown.is_running() {
            let remaining_ms = self.countdown.remaining_ms();
            self.countdown.stop();
            self.push(Event::CountdownStopped {
                remaining_ms,
                at: Utc::now(),
            });
        }
        self.gesture.reset(&mut self.presenter);
        self.presenter.remove_surface_and_stop();
        self.torn_down = true;
        self.push(Event::SurfaceRemoved { at: Utc::now() });
        info!("surface dismissed");
        AnimationStatus::Finished
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_frame(&mut self, frame: &Frame) {
        self.presenter.update_progress_display(frame.progress);
        match &frame.label {
            Some(text) => self.presenter.update_time_label(text),
            None => self.presenter.hide_time_label(),
        }
    }

    fn retire_surface(&mut self) {
        self.gesture.reset(&mut self.presenter);
        self.presenter.hide_surface();
    }

    fn push(&mut self, event: Event) {
        debug!(kind = event.kind(), "overlay event");
        self.events.push(event);
    }
}
