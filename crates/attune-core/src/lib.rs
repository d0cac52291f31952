//! # Attune Core Library
//!
//! Core logic for the Attune adaptive soundscape engine. The CLI binary is
//! a thin layer over this library; every operation is available without a
//! GUI.
//!
//! ## Architecture
//!
//! - **Catalog**: static category/scenario tables, read-only after startup
//! - **Adaptive selection**: simulated biometric state turned into a
//!   recommended category and a concrete track variant
//! - **Playback**: a controller owning at most one live audio handle over a
//!   swappable [`AudioBackend`]
//! - **Scenario runner**: a wall-clock state machine that requires the
//!   caller to periodically invoke `tick()` for phase advancement
//!
//! ## Key Components
//!
//! - [`SoundscapeEngine`]: explicitly constructed facade over all of the above
//! - [`CatalogRegistry`]: category/scenario lookups
//! - [`PlaybackController`]: transport and the single-handle invariant
//! - [`ScenarioRunner`]: guided-session phase state machine
//! - [`Config`]: application configuration management

pub mod adaptive;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod playback;
pub mod scenario;

pub use adaptive::{AdaptiveSelector, BiometricState};
pub use catalog::{CatalogRegistry, Category, Intensity, Scenario, Track};
pub use config::Config;
pub use engine::{Recommendation, SoundscapeEngine};
pub use error::{ConfigError, CoreError, PlaybackError, ValidationError};
pub use events::Event;
pub use playback::{
    AudioBackend, AudioHandle, OpenOptions, PlaybackController, PlaybackStatus, SimulatedBackend,
};
pub use scenario::{RunnerState, ScenarioRunner};
