//! Live session driver.
//!
//! The engine has no internal timers; this command owns the tick loop. A
//! current-thread tokio runtime drives `tick()` on the configured interval
//! until Ctrl-C (soundscapes) or scenario completion, printing each event
//! as a JSON line.

use std::sync::Arc;
use std::time::Duration;

use attune_core::{Config, Event, SimulatedBackend, SoundscapeEngine};

pub fn run_soundscape(
    category_id: &str,
    volume: Option<f32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = SoundscapeEngine::new(&config, Arc::new(SimulatedBackend));

    if let Some(v) = volume {
        print_event(&engine.set_volume(v))?;
    }
    for event in engine.play_soundscape(category_id)? {
        print_event(&event)?;
    }

    drive(engine, config.session.tick_interval_ms, false)
}

pub fn run_scenario(
    scenario_id: &str,
    volume: Option<f32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = SoundscapeEngine::new(&config, Arc::new(SimulatedBackend));

    if let Some(v) = volume {
        print_event(&engine.set_volume(v))?;
    }
    for event in engine.play_scenario(scenario_id)? {
        print_event(&event)?;
    }

    drive(engine, config.session.tick_interval_ms, true)
}

pub fn print_status() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let engine = SoundscapeEngine::new(&config, Arc::new(SimulatedBackend));
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

fn drive(
    mut engine: SoundscapeEngine,
    tick_interval_ms: u64,
    until_complete: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_interval_ms.max(10)));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let mut done = false;
                    for event in engine.tick() {
                        if until_complete && matches!(event, Event::ScenarioCompleted { .. }) {
                            done = true;
                        }
                        print_event(&event)?;
                    }
                    if done {
                        return Ok::<_, Box<dyn std::error::Error>>(());
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    for event in engine.stop() {
                        print_event(&event)?;
                    }
                    return Ok(());
                }
            }
        }
    })
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
