use std::path::Path;
use std::time::Duration;

use timerfriend_core::{HeadlessPresenter, Overlay, TickStatus};
use tracing::{debug, warn};

use super::{load_config, print_json_line};
use crate::terminal::TerminalPresenter;

type TerminalOverlay = Overlay<TerminalPresenter>;

fn flush(overlay: &mut TerminalOverlay) -> Result<(), Box<dyn std::error::Error>> {
    let sweep = overlay.dial_sweep_degrees();
    overlay.presenter_mut().flush(sweep);
    for event in overlay.drain_events() {
        print_json_line(&event)?;
    }
    Ok(())
}

pub fn run(
    config_path: Option<&Path>,
    minutes: Option<i64>,
    tick_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let minutes = minutes.unwrap_or_else(|| i64::from(config.countdown.default_minutes));
    let tick_ms = tick_ms.unwrap_or(config.countdown.tick_interval_ms).max(1);

    let presenter = TerminalPresenter::new(HeadlessPresenter::new(
        config.layout.screen_layout(),
        config.layout.initial_position(),
    ));
    let mut overlay = Overlay::new(presenter, &config);
    let generation = overlay.start_countdown(minutes)?;
    flush(&mut overlay)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(&mut overlay, generation, tick_ms));
    overlay.presenter_mut().finish();
    result
}

async fn drive(
    overlay: &mut TerminalOverlay,
    generation: u64,
    tick_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    // The first tick of a tokio interval fires immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listening = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let status = overlay.on_tick(generation);
                flush(overlay)?;
                if status != TickStatus::Continue {
                    debug!(?status, "tick chain ended");
                    return Ok(());
                }
            }
            signal = &mut ctrl_c, if listening => match signal {
                Ok(()) => {
                    overlay.stop_countdown();
                    flush(overlay)?;
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "cannot listen for ctrl-c");
                    listening = false;
                }
            },
        }
    }
}
