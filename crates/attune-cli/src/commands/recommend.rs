use std::sync::Arc;

use attune_core::{Config, SimulatedBackend, SoundscapeEngine};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = SoundscapeEngine::new(&config, Arc::new(SimulatedBackend));
    let recommendation = engine.recommendation();
    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}
