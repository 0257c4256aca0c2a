//! Replay a scripted pointer/tick session against a headless overlay.
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   {"action": "start", "minutes": 5},
//!   {"action": "tick", "count": 3},
//!   {"action": "pointer", "phase": "down", "x": 100.0, "y": 200.0},
//!   {"action": "pointer", "phase": "move", "x": 540.0, "y": 1700.0},
//!   {"action": "stop"}
//! ]
//! ```
//!
//! Dismiss animations are played to completion right after the pointer step
//! that requested them, sampled at `animation.frame_interval_ms`.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use timerfriend_core::{
    AnimationStatus, Config, GestureOutcome, HeadlessPresenter, Overlay, PointerEvent, Position,
};
use tracing::{debug, warn};

use super::{load_config, print_json_line};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ScriptStep {
    Start {
        minutes: i64,
    },
    Stop,
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },
    Pointer(PointerEvent),
}

fn default_tick_count() -> u32 {
    1
}

/// Final state printed after the last step.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub steps: usize,
    pub torn_down: bool,
    pub running: bool,
    pub remaining_ms: u64,
    pub label: Option<String>,
    pub surface_position: Position,
    pub surface_attached: bool,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(text)
}

fn read_script(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

struct Simulation {
    overlay: Overlay<HeadlessPresenter>,
    generation: u64,
    frame_interval_ms: u64,
    print_calls: bool,
}

impl Simulation {
    fn new(config: &Config, print_calls: bool) -> Self {
        let presenter = HeadlessPresenter::new(
            config.layout.screen_layout(),
            config.layout.initial_position(),
        );
        Self {
            overlay: Overlay::new(presenter, config),
            generation: 0,
            frame_interval_ms: config.animation.frame_interval_ms,
            print_calls,
        }
    }

    fn apply(&mut self, step: &ScriptStep) {
        match step {
            ScriptStep::Start { minutes } => match self.overlay.start_countdown(*minutes) {
                Ok(generation) => self.generation = generation,
                Err(e) => warn!(error = %e, "start rejected"),
            },
            ScriptStep::Stop => self.overlay.stop_countdown(),
            ScriptStep::Tick { count } => {
                for _ in 0..*count {
                    self.overlay.on_tick(self.generation);
                }
            }
            ScriptStep::Pointer(event) => {
                let outcome = self.overlay.on_pointer(*event);
                debug!(?outcome, "pointer step");
                if matches!(outcome, GestureOutcome::DismissRequested(_)) {
                    self.play_dismissal();
                }
            }
        }
    }

    fn play_dismissal(&mut self) {
        let Some(animation) = self.overlay.dismissal().copied() else {
            return;
        };
        for frame in animation.frames(self.frame_interval_ms) {
            if self.overlay.on_animation_step(animation.generation(), frame.scale)
                != AnimationStatus::Continue
            {
                break;
            }
        }
    }

    fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let calls = self.overlay.presenter_mut().take_calls();
        if self.print_calls {
            for call in &calls {
                print_json_line(call)?;
            }
        }
        for event in self.overlay.drain_events() {
            print_json_line(&event)?;
        }
        Ok(())
    }

    fn summary(&self, steps: usize) -> Summary {
        let presenter = self.overlay.presenter();
        let countdown = self.overlay.countdown();
        Summary {
            steps,
            torn_down: self.overlay.is_torn_down(),
            running: countdown.is_running(),
            remaining_ms: countdown.remaining_ms(),
            label: presenter.label().map(str::to_string),
            surface_position: presenter.surface_position(),
            surface_attached: presenter.surface_attached(),
        }
    }
}

pub fn run(
    config_path: Option<&Path>,
    source: &str,
    print_calls: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let steps = parse_script(&read_script(source)?)?;

    let mut sim = Simulation::new(&config, print_calls);
    for step in &steps {
        sim.apply(step);
        sim.flush()?;
    }

    println!(
        "{}",
        serde_json::json!({ "summary": sim.summary(steps.len()) })
    );
    Ok(())
}
