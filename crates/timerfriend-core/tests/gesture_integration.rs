//! Integration tests for drag, tap and dismiss through the overlay.

use timerfriend_core::gesture::GestureState;
use timerfriend_core::{
    AnimationStatus, Config, Event, GestureController, GestureOutcome, HeadlessPresenter,
    IntersectionMode, Overlay, OverlayPresenter, PointerEvent, Position, PresenterCall,
    PresenterError, Rect,
};

fn overlay_with(config: Config) -> Overlay<HeadlessPresenter> {
    let presenter = HeadlessPresenter::new(
        config.layout.screen_layout(),
        config.layout.initial_position(),
    );
    Overlay::new(presenter, &config)
}

fn overlay() -> Overlay<HeadlessPresenter> {
    overlay_with(Config::default())
}

fn is_show_zone(c: &PresenterCall) -> bool {
    matches!(c, PresenterCall::ShowDismissZone)
}

fn is_remove(c: &PresenterCall) -> bool {
    matches!(c, PresenterCall::RemoveSurfaceAndStop)
}

/// Drag from (100, 200) into the default dismiss zone.
fn drag_into_zone(o: &mut Overlay<HeadlessPresenter>) -> GestureOutcome {
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(120.0, 400.0));
    o.on_pointer(PointerEvent::moved(600.0, 1650.0))
}

#[test]
fn test_tap_is_reported_and_surface_stays_put() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(50.0, 150.0));
    o.on_pointer(PointerEvent::moved(53.0, 154.0));
    assert_eq!(o.on_pointer(PointerEvent::up(53.0, 154.0)), GestureOutcome::Tapped);

    let events = o.drain_events();
    assert!(matches!(
        events.as_slice(),
        [Event::SurfaceTapped { position, .. }] if *position == Position::new(3, 104)
    ));
    assert_eq!(o.presenter().count_calls(is_show_zone), 0);
}

#[test]
fn test_drag_and_release_keeps_dropped_position() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(130.0, 260.0));
    o.on_pointer(PointerEvent::moved(250.5, 380.7));
    let out = o.on_pointer(PointerEvent::up(250.5, 380.7));

    assert_eq!(out, GestureOutcome::Released(Position::new(150, 280)));
    assert_eq!(o.gesture().position(), Position::new(150, 280));
    assert_eq!(o.presenter().surface_position(), Position::new(150, 280));
    assert!(!o.presenter().zone_visible());
    assert!(!o.gesture().dismiss_zone().visible);
    assert_eq!(o.presenter().count_calls(is_remove), 0);
}

#[test]
fn test_next_drag_starts_from_dropped_position() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(200.0, 300.0));
    o.on_pointer(PointerEvent::up(200.0, 300.0));

    o.on_pointer(PointerEvent::down(500.0, 500.0));
    o.on_pointer(PointerEvent::moved(480.0, 530.0));
    assert_eq!(o.gesture().position(), Position::new(80, 230));
}

#[test]
fn test_highlight_follows_downward_travel() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(100.0, 350.0));
    assert!((o.gesture().dismiss_zone().highlight - 0.5).abs() < 1e-6);
    assert!((o.presenter().zone_opacity() - 0.5).abs() < 1e-6);

    o.on_pointer(PointerEvent::moved(100.0, 650.0));
    assert_eq!(o.gesture().dismiss_zone().highlight, 1.0);

    o.on_pointer(PointerEvent::moved(100.0, 100.0));
    assert_eq!(o.gesture().dismiss_zone().highlight, 0.0);
}

#[test]
fn test_dismiss_is_requested_once_and_later_moves_ignored() {
    let mut o = overlay();
    let out = drag_into_zone(&mut o);
    let GestureOutcome::DismissRequested(request) = out else {
        panic!("expected dismiss request, got {out:?}");
    };
    assert_eq!(request.from, Position::new(500, 1550));
    assert_eq!(request.target, Position::new(540, 1690));
    assert_eq!(o.gesture().state(), GestureState::Dismissing);

    let calls_before = o.presenter().calls().len();
    assert_eq!(
        o.on_pointer(PointerEvent::moved(700.0, 1700.0)),
        GestureOutcome::Ignored
    );
    assert_eq!(o.on_pointer(PointerEvent::up(700.0, 1700.0)), GestureOutcome::Ignored);
    assert_eq!(o.presenter().calls().len(), calls_before);

    let dismissals = o
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::DismissRequested { .. }))
        .count();
    assert_eq!(dismissals, 1);
}

#[test]
fn test_dismiss_animation_removes_surface() {
    let mut o = overlay();
    let generation = o.start_countdown(5).unwrap();
    o.on_tick(generation);
    drag_into_zone(&mut o);

    let animation = *o.dismissal().expect("animation should be running");
    let frames = animation.frames(16);
    let mut statuses = Vec::new();
    for frame in &frames {
        statuses.push(o.on_animation_step(animation.generation(), frame.scale));
    }

    assert_eq!(statuses.last(), Some(&AnimationStatus::Finished));
    assert!(statuses[..statuses.len() - 1]
        .iter()
        .all(|s| *s == AnimationStatus::Continue));
    assert!(o.is_torn_down());
    assert!(o.presenter().is_stopped());
    assert_eq!(o.presenter().count_calls(is_remove), 1);
    assert_eq!(o.gesture().position(), Position::new(540, 1690));
    assert!(!o.countdown().is_running());
    assert_eq!(o.gesture().state(), GestureState::Idle);
    assert!(!o.gesture().dismiss_zone().visible);
    assert!(!o.presenter().zone_visible());

    let kinds: Vec<_> = o.drain_events().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        [
            "CountdownStarted",
            "DismissRequested",
            "CountdownStopped",
            "SurfaceRemoved"
        ]
    );

    // Everything after teardown is dropped.
    assert_eq!(
        o.on_animation_step(animation.generation(), 0.0),
        AnimationStatus::Ignored
    );
    assert_eq!(o.on_pointer(PointerEvent::down(1.0, 1.0)), GestureOutcome::Ignored);
    assert!(o.start_countdown(1).is_err());
}

#[test]
fn test_animation_scales_and_moves_surface() {
    let mut o = overlay();
    drag_into_zone(&mut o);
    let generation = o.dismissal().map(|a| a.generation()).unwrap();

    assert_eq!(o.on_animation_step(generation, 0.5), AnimationStatus::Continue);
    assert_eq!(o.presenter().surface_scale(), 0.5);
    assert_eq!(o.presenter().surface_position(), Position::new(520, 1620));
    assert!(!o.is_torn_down());
}

#[test]
fn test_stale_animation_generation_is_ignored() {
    let mut o = overlay();
    drag_into_zone(&mut o);
    let generation = o.dismissal().map(|a| a.generation()).unwrap();
    let calls_before = o.presenter().calls().len();

    assert_eq!(
        o.on_animation_step(generation + 1, 0.0),
        AnimationStatus::Ignored
    );
    assert_eq!(o.on_animation_step(generation, f32::NAN), AnimationStatus::Ignored);
    assert_eq!(o.presenter().calls().len(), calls_before);
    assert!(!o.is_torn_down());
}

#[test]
fn test_pointer_ignored_while_animating() {
    let mut o = overlay();
    drag_into_zone(&mut o);
    assert_eq!(o.on_pointer(PointerEvent::down(10.0, 10.0)), GestureOutcome::Ignored);
    assert_eq!(o.gesture().state(), GestureState::Dismissing);
}

#[test]
fn test_cancel_mid_drag_hides_zone_without_dismiss() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    // Just above the zone, no overlap yet.
    o.on_pointer(PointerEvent::moved(560.0, 1400.0));
    assert!(o.presenter().zone_visible());

    assert_eq!(
        o.on_pointer(PointerEvent::cancel(560.0, 1400.0)),
        GestureOutcome::Cancelled
    );
    assert_eq!(o.gesture().state(), GestureState::Idle);
    assert!(!o.presenter().zone_visible());
    assert!(o.dismissal().is_none());
    assert_eq!(o.presenter().count_calls(is_remove), 0);
}

#[test]
fn test_cancel_with_stale_zone_geometry_returns_to_idle() {
    // A presenter whose zone never reports a rect cannot trigger a dismiss,
    // even while the surface sits right on top of where the zone would be.
    struct NoZone(HeadlessPresenter);

    impl OverlayPresenter for NoZone {
        fn move_surface(&mut self, position: Position) -> Result<(), PresenterError> {
            self.0.move_surface(position)
        }
        fn set_surface_scale(&mut self, scale: f32) {
            self.0.set_surface_scale(scale)
        }
        fn show_surface(&mut self) {
            self.0.show_surface()
        }
        fn hide_surface(&mut self) {
            self.0.hide_surface()
        }
        fn show_dismiss_zone(&mut self) {
            self.0.show_dismiss_zone()
        }
        fn hide_dismiss_zone(&mut self) {
            self.0.hide_dismiss_zone()
        }
        fn set_dismiss_zone_opacity(&mut self, value: f32) {
            self.0.set_dismiss_zone_opacity(value)
        }
        fn remove_surface_and_stop(&mut self) {
            self.0.remove_surface_and_stop()
        }
        fn update_progress_display(&mut self, progress: f32) {
            self.0.update_progress_display(progress)
        }
        fn update_time_label(&mut self, text: &str) {
            self.0.update_time_label(text)
        }
        fn hide_time_label(&mut self) {
            self.0.hide_time_label()
        }
        fn surface_rect(&self) -> Option<Rect> {
            self.0.surface_rect()
        }
        fn dismiss_zone_rect(&self) -> Option<Rect> {
            None
        }
    }

    let config = Config::default();
    let mut presenter = NoZone(HeadlessPresenter::new(
        config.layout.screen_layout(),
        config.layout.initial_position(),
    ));
    let mut g = GestureController::new(config.gesture.clone(), config.layout.initial_position());

    g.handle(PointerEvent::down(100.0, 200.0), &mut presenter);
    let out = g.handle(PointerEvent::moved(600.0, 1650.0), &mut presenter);
    assert_eq!(out, GestureOutcome::Moved(Position::new(500, 1550)));
    assert!(g.is_dragging());

    assert_eq!(
        g.handle(PointerEvent::cancel(600.0, 1650.0), &mut presenter),
        GestureOutcome::Cancelled
    );
    assert_eq!(g.state(), GestureState::Idle);
    assert!(!presenter.0.zone_visible());
    assert_eq!(presenter.0.count_calls(is_remove), 0);
}

#[test]
fn test_rejected_move_abandons_gesture() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(100.0, 260.0));
    assert!(o.presenter().zone_visible());

    o.presenter_mut().detach_surface();
    assert_eq!(
        o.on_pointer(PointerEvent::moved(100.0, 300.0)),
        GestureOutcome::SurfaceLost
    );
    assert_eq!(o.gesture().state(), GestureState::Idle);
    assert!(!o.presenter().zone_visible());
    assert_eq!(o.gesture().position(), Position::new(0, 160));

    // No retry: later moves without a new press do nothing.
    assert_eq!(
        o.on_pointer(PointerEvent::moved(100.0, 320.0)),
        GestureOutcome::Ignored
    );
    assert!(matches!(
        o.drain_events().as_slice(),
        [Event::SurfaceLost { .. }]
    ));
}

#[test]
fn test_center_mode_lets_surface_graze_the_zone() {
    let mut config = Config::default();
    config.gesture.intersection = IntersectionMode::Center;
    let mut o = overlay_with(config);

    o.on_pointer(PointerEvent::down(100.0, 200.0));
    // Surface rect (300,1450)-(500,1650) overlaps the zone corner only.
    let out = o.on_pointer(PointerEvent::moved(400.0, 1550.0));
    assert_eq!(out, GestureOutcome::Moved(Position::new(300, 1450)));

    // Surface center (540,1690) is inside the zone.
    let out = o.on_pointer(PointerEvent::moved(540.0, 1690.0));
    assert!(matches!(out, GestureOutcome::DismissRequested(_)));
}

#[test]
fn test_new_press_replaces_session() {
    let mut o = overlay();
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(100.0, 300.0));
    assert!(o.gesture().is_dragging());

    assert_eq!(o.on_pointer(PointerEvent::down(50.0, 50.0)), GestureOutcome::Pressed);
    assert!(!o.presenter().zone_visible());
    assert!(matches!(o.gesture().state(), GestureState::PossibleTap(_)));
}

/// Presenter whose host refuses every move while `locked` is set.
struct Locked {
    inner: HeadlessPresenter,
    locked: bool,
}

impl Locked {
    fn new() -> Self {
        let config = Config::default();
        Self {
            inner: HeadlessPresenter::new(
                config.layout.screen_layout(),
                config.layout.initial_position(),
            ),
            locked: false,
        }
    }
}

impl OverlayPresenter for Locked {
    fn move_surface(&mut self, position: Position) -> Result<(), PresenterError> {
        if self.locked {
            return Err(PresenterError::Rejected("window is locked".into()));
        }
        self.inner.move_surface(position)
    }
    fn set_surface_scale(&mut self, scale: f32) {
        self.inner.set_surface_scale(scale)
    }
    fn show_surface(&mut self) {
        self.inner.show_surface()
    }
    fn hide_surface(&mut self) {
        self.inner.hide_surface()
    }
    fn show_dismiss_zone(&mut self) {
        self.inner.show_dismiss_zone()
    }
    fn hide_dismiss_zone(&mut self) {
        self.inner.hide_dismiss_zone()
    }
    fn set_dismiss_zone_opacity(&mut self, value: f32) {
        self.inner.set_dismiss_zone_opacity(value)
    }
    fn remove_surface_and_stop(&mut self) {
        self.inner.remove_surface_and_stop()
    }
    fn update_progress_display(&mut self, progress: f32) {
        self.inner.update_progress_display(progress)
    }
    fn update_time_label(&mut self, text: &str) {
        self.inner.update_time_label(text)
    }
    fn hide_time_label(&mut self) {
        self.inner.hide_time_label()
    }
    fn surface_rect(&self) -> Option<Rect> {
        self.inner.surface_rect()
    }
    fn dismiss_zone_rect(&self) -> Option<Rect> {
        self.inner.dismiss_zone_rect()
    }
}

#[test]
fn test_host_rejection_mid_drag_abandons_session() {
    let mut o = Overlay::new(Locked::new(), &Config::default());
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(100.0, 260.0));
    assert!(o.presenter().inner.zone_visible());

    o.presenter_mut().locked = true;
    assert_eq!(
        o.on_pointer(PointerEvent::moved(100.0, 300.0)),
        GestureOutcome::SurfaceLost
    );
    assert_eq!(o.gesture().state(), GestureState::Idle);
    assert!(!o.presenter().inner.zone_visible());
    assert_eq!(o.gesture().position(), Position::new(0, 160));
}

#[test]
fn test_host_rejection_during_animation_still_tears_down() {
    let mut o = Overlay::new(Locked::new(), &Config::default());
    o.on_pointer(PointerEvent::down(100.0, 200.0));
    o.on_pointer(PointerEvent::moved(120.0, 400.0));
    let out = o.on_pointer(PointerEvent::moved(600.0, 1650.0));
    assert!(matches!(out, GestureOutcome::DismissRequested(_)));

    o.presenter_mut().locked = true;
    let generation = o.dismissal().map(|a| a.generation()).unwrap();
    assert_eq!(o.on_animation_step(generation, 0.5), AnimationStatus::Continue);
    assert_eq!(o.on_animation_step(generation, 0.0), AnimationStatus::Finished);

    assert!(o.is_torn_down());
    assert!(o.presenter().inner.is_stopped());
    assert!(!o.gesture().dismiss_zone().visible);
}
