//! Static soundscape catalog.
//!
//! Categories bundle interchangeable looping tracks tagged by intensity;
//! scenarios are fixed-duration guided sessions bound to one category.
//! The catalog is built once at startup and never mutated. Unknown ids
//! resolve to `None` so callers can branch without error handling.

use serde::{Deserialize, Serialize};

/// Intensity tag for a track variant within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
    /// Variant intended for biometric-driven selection.
    Adaptive,
}

/// A single looping audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// Opaque source reference handed to the audio backend.
    pub source: String,
    /// Nominal duration in seconds (loops are re-entered seamlessly).
    pub duration_secs: u64,
    pub intensity: Intensity,
}

/// A themed soundscape category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub tracks: Vec<Track>,
}

/// A fixed-duration, multi-phase guided session bound to one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Total duration in minutes, divided evenly across phases.
    pub duration_min: u64,
    pub phases: Vec<String>,
    pub category_id: String,
    pub color: String,
    pub icon: String,
}

impl Scenario {
    /// Total duration in milliseconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_ms(&self) -> u64 {
        self.duration_min.saturating_mul(60).saturating_mul(1000)
    }

    /// Even per-phase budget in milliseconds, `None` when there are no phases.
    pub fn phase_duration_ms(&self) -> Option<u64> {
        if self.phases.is_empty() {
            return None;
        }
        Some(self.duration_ms() / self.phases.len() as u64)
    }
}

/// Read-only registry of categories and scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRegistry {
    categories: Vec<Category>,
    scenarios: Vec<Scenario>,
}

impl CatalogRegistry {
    /// Build a registry from explicit tables (for tests and embedders).
    pub fn new(categories: Vec<Category>, scenarios: Vec<Scenario>) -> Self {
        Self {
            categories,
            scenarios,
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The built-in catalog shipped with the engine.
    pub fn builtin() -> Self {
        Self {
            categories: builtin_categories(),
            scenarios: builtin_scenarios(),
        }
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn track(name: &str, source: &str, duration_secs: u64, intensity: Intensity) -> Track {
    Track {
        name: name.into(),
        source: source.into(),
        duration_secs,
        intensity,
    }
}

fn builtin_categories() -> Vec<Category> {
    vec![
        Category {
            id: "focus".into(),
            name: "Focus".into(),
            description: "Steady textures for deep work".into(),
            color: "#3b82f6".into(),
            icon: "target".into(),
            tracks: vec![
                track("Still Air", "focus/still_air.ogg", 420, Intensity::Low),
                track("Workbench", "focus/workbench.ogg", 480, Intensity::Medium),
                track("Momentum", "focus/momentum.ogg", 390, Intensity::High),
                track("Tidal Focus", "focus/tidal_focus.ogg", 600, Intensity::Adaptive),
            ],
        },
        Category {
            id: "relax".into(),
            name: "Relax".into(),
            description: "Soft ambience to wind down".into(),
            color: "#22c55e".into(),
            icon: "leaf".into(),
            tracks: vec![
                track("Slow Rain", "relax/slow_rain.ogg", 540, Intensity::Low),
                track("Evening Field", "relax/evening_field.ogg", 510, Intensity::Medium),
                track("Warm Current", "relax/warm_current.ogg", 450, Intensity::Adaptive),
            ],
        },
        Category {
            id: "sleep".into(),
            name: "Sleep".into(),
            description: "Deep, dark tones for the night".into(),
            color: "#6366f1".into(),
            icon: "moon".into(),
            tracks: vec![
                track("Night Hum", "sleep/night_hum.ogg", 720, Intensity::Low),
                track("Deep Drift", "sleep/deep_drift.ogg", 660, Intensity::Adaptive),
            ],
        },
        Category {
            id: "activity".into(),
            name: "Activity".into(),
            description: "Brighter textures for movement".into(),
            color: "#f59e0b".into(),
            icon: "bolt".into(),
            tracks: vec![
                track("Open Road", "activity/open_road.ogg", 360, Intensity::Medium),
                track("Upswing", "activity/upswing.ogg", 330, Intensity::High),
                track("Daylight", "activity/daylight.ogg", 400, Intensity::Adaptive),
            ],
        },
    ]
}

fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "deep-work".into(),
            name: "Deep Work".into(),
            duration_min: 50,
            phases: vec![
                "Settle In".into(),
                "Deep Focus".into(),
                "Sustain".into(),
                "Wrap Up".into(),
            ],
            category_id: "focus".into(),
            color: "#3b82f6".into(),
            icon: "target".into(),
        },
        Scenario {
            id: "wind-down".into(),
            name: "Wind Down".into(),
            duration_min: 20,
            phases: vec![
                "Arrive".into(),
                "Slow Breathing".into(),
                "Body Scan".into(),
                "Rest".into(),
            ],
            category_id: "relax".into(),
            color: "#22c55e".into(),
            icon: "leaf".into(),
        },
        Scenario {
            id: "power-nap".into(),
            name: "Power Nap".into(),
            duration_min: 24,
            phases: vec!["Descend".into(), "Sleep".into(), "Surface".into()],
            category_id: "sleep".into(),
            color: "#6366f1".into(),
            icon: "moon".into(),
        },
        Scenario {
            id: "morning-reset".into(),
            name: "Morning Reset".into(),
            duration_min: 10,
            phases: vec!["Wake".into(), "Stretch".into()],
            category_id: "activity".into(),
            color: "#f59e0b".into(),
            icon: "bolt".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_categories() {
        let catalog = CatalogRegistry::builtin();
        assert_eq!(catalog.categories().len(), 4);
        for id in ["focus", "relax", "sleep", "activity"] {
            assert!(catalog.category(id).is_some(), "missing category {id}");
        }
    }

    #[test]
    fn every_builtin_category_has_tracks() {
        let catalog = CatalogRegistry::builtin();
        for c in catalog.categories() {
            assert!(!c.tracks.is_empty(), "category {} has no tracks", c.id);
        }
    }

    #[test]
    fn every_builtin_scenario_references_a_category() {
        let catalog = CatalogRegistry::builtin();
        for s in catalog.scenarios() {
            assert!(
                catalog.category(&s.category_id).is_some(),
                "scenario {} points at unknown category {}",
                s.id,
                s.category_id
            );
            assert!(!s.phases.is_empty());
        }
    }

    #[test]
    fn unknown_ids_return_none() {
        let catalog = CatalogRegistry::builtin();
        assert!(catalog.category("nope").is_none());
        assert!(catalog.scenario("nope").is_none());
    }

    #[test]
    fn phase_duration_divides_evenly() {
        let catalog = CatalogRegistry::builtin();
        let s = catalog.scenario("wind-down").unwrap();
        assert_eq!(s.duration_ms(), 20 * 60 * 1000);
        assert_eq!(s.phase_duration_ms(), Some(5 * 60 * 1000));
    }

    #[test]
    fn zero_phase_scenario_has_no_phase_duration() {
        let s = Scenario {
            id: "empty".into(),
            name: "Empty".into(),
            duration_min: 10,
            phases: vec![],
            category_id: "focus".into(),
            color: String::new(),
            icon: String::new(),
        };
        assert_eq!(s.phase_duration_ms(), None);
    }
}
