use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackStatus;

/// Every state change in the engine produces an Event.
/// Consumers poll; the core never pushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PlaybackStarted {
        category_id: String,
        track_name: String,
        /// True when the backend failed to open and playback is simulated.
        simulated: bool,
        at: DateTime<Utc>,
    },
    PlaybackPaused {
        at: DateTime<Utc>,
    },
    PlaybackResumed {
        at: DateTime<Utc>,
    },
    PlaybackStopped {
        at: DateTime<Utc>,
    },
    VolumeChanged {
        volume: f32,
        at: DateTime<Utc>,
    },
    /// Auto-adapt switched the active soundscape to a new recommendation.
    CategorySwitched {
        from_category: String,
        to_category: String,
        at: DateTime<Utc>,
    },
    ScenarioStarted {
        scenario_id: String,
        phase_count: usize,
        phase_duration_ms: u64,
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        scenario_id: String,
        phase_index: usize,
        phase_name: String,
        at: DateTime<Utc>,
    },
    ScenarioCompleted {
        scenario_id: String,
        at: DateTime<Utc>,
    },
    ScenarioStopped {
        scenario_id: String,
        at: DateTime<Utc>,
    },
    BiometricsRefreshed {
        circadian_phase: f64,
        energy: u8,
        stress: u8,
        at: DateTime<Utc>,
    },
    StatusSnapshot {
        status: PlaybackStatus,
        at: DateTime<Utc>,
    },
}
