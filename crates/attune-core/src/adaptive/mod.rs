//! Adaptive category and track selection.
//!
//! The selector owns the simulated [`BiometricState`] and turns it into a
//! recommended category and a concrete track variant. Both decisions are
//! pure functions of the state and the wall-clock hour, so they are exposed
//! as free functions alongside the stateful wrapper.

use chrono::Timelike;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use crate::catalog::{Category, Intensity, Track};

mod biometrics;
pub use biometrics::{circadian_phase_for_hour, BiometricState};

/// Stress level above which `relax` overrides the daytime default.
const STRESS_OVERRIDE: u8 = 6;
/// Energy level at or below which a circadian dip forces `relax`.
const LOW_ENERGY: u8 = 3;

/// Recommend a category id for the given state and hour.
///
/// The precedence order is a total decision table; the first matching row
/// wins and no two rows can both fire.
pub fn recommend_category(state: &BiometricState, hour: u8) -> &'static str {
    if hour >= 22 || hour <= 6 {
        return "sleep";
    }
    if state.stress > STRESS_OVERRIDE {
        return "relax";
    }
    if state.energy <= LOW_ENERGY && state.circadian_phase < 0.5 {
        return "relax";
    }
    if (9..=17).contains(&hour) {
        return "focus";
    }
    "activity"
}

/// Pick a track variant from `category` for the given state.
///
/// Prefers `low` intensity near the circadian trough or under high stress,
/// `high` intensity when energy and alertness peak together, and the
/// `adaptive` variant otherwise. Falls back to the second track when no
/// adaptive variant exists, then to the first track. Returns `None` only
/// for an empty track list.
pub fn select_track_variant<'a>(
    category: &'a Category,
    state: &BiometricState,
) -> Option<&'a Track> {
    if category.tracks.is_empty() {
        return None;
    }

    let preferred = if state.circadian_phase < 0.3 || state.stress > 7 {
        Intensity::Low
    } else if state.energy > 7 && state.circadian_phase > 0.8 {
        Intensity::High
    } else {
        Intensity::Adaptive
    };

    if let Some(t) = category.tracks.iter().find(|t| t.intensity == preferred) {
        return Some(t);
    }
    if preferred == Intensity::Adaptive && category.tracks.len() > 1 {
        return category.tracks.get(1);
    }
    category.tracks.first()
}

/// Owns the simulated biometric state and a seeded RNG for drift.
#[derive(Debug, Clone)]
pub struct AdaptiveSelector {
    state: BiometricState,
    rng: Mcg128Xsl64,
}

impl AdaptiveSelector {
    pub fn new() -> Self {
        Self::with_seed(now_seed())
    }

    /// Deterministic construction for tests and replayable sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: BiometricState::default(),
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &BiometricState {
        &self.state
    }

    /// Replace the simulated state wholesale (seam for a real sensor feed).
    pub fn set_state(&mut self, state: BiometricState) {
        self.state = state;
    }

    /// Refresh against the current local hour.
    pub fn refresh(&mut self) {
        let hour = chrono::Local::now().hour() as u8;
        self.refresh_at_hour(hour);
    }

    /// Refresh against an explicit hour (periodic drivers and tests).
    pub fn refresh_at_hour(&mut self, hour: u8) {
        self.state.refresh(hour, &mut self.rng);
    }

    /// Recommend a category for the current local hour.
    pub fn recommend(&self) -> &'static str {
        recommend_category(&self.state, chrono::Local::now().hour() as u8)
    }

    pub fn select_track<'a>(&self, category: &'a Category) -> Option<&'a Track> {
        select_track_variant(category, &self.state)
    }
}

impl Default for AdaptiveSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn now_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRegistry;

    fn state(circadian: f64, energy: u8, stress: u8) -> BiometricState {
        BiometricState {
            circadian_phase: circadian,
            energy,
            stress,
            ..Default::default()
        }
    }

    #[test]
    fn night_hours_force_sleep_regardless_of_state() {
        // Stress and energy values that would otherwise pick relax or high
        // intensity must not matter at night.
        let stressed = state(0.9, 9, 9);
        assert_eq!(recommend_category(&stressed, 23), "sleep");
        assert_eq!(recommend_category(&stressed, 22), "sleep");
        assert_eq!(recommend_category(&stressed, 0), "sleep");
        assert_eq!(recommend_category(&stressed, 6), "sleep");
    }

    #[test]
    fn stress_overrides_daytime_focus() {
        let stressed = state(0.4, 5, 8);
        assert_eq!(recommend_category(&stressed, 12), "relax");
    }

    #[test]
    fn circadian_dip_with_low_energy_recommends_relax() {
        let tired = state(0.4, 2, 3);
        assert_eq!(recommend_category(&tired, 19), "relax");
    }

    #[test]
    fn business_hours_recommend_focus() {
        let neutral = state(0.4, 5, 4);
        assert_eq!(recommend_category(&neutral, 9), "focus");
        assert_eq!(recommend_category(&neutral, 17), "focus");
    }

    #[test]
    fn evening_default_is_activity() {
        let neutral = state(0.7, 6, 4);
        assert_eq!(recommend_category(&neutral, 19), "activity");
        assert_eq!(recommend_category(&neutral, 7), "activity");
    }

    #[test]
    fn low_circadian_prefers_low_intensity() {
        let catalog = CatalogRegistry::builtin();
        let focus = catalog.category("focus").unwrap();
        let t = select_track_variant(focus, &state(0.2, 5, 4)).unwrap();
        assert_eq!(t.intensity, Intensity::Low);
    }

    #[test]
    fn high_stress_prefers_low_intensity() {
        let catalog = CatalogRegistry::builtin();
        let focus = catalog.category("focus").unwrap();
        let t = select_track_variant(focus, &state(0.7, 5, 8)).unwrap();
        assert_eq!(t.intensity, Intensity::Low);
    }

    #[test]
    fn peak_energy_prefers_high_intensity() {
        let catalog = CatalogRegistry::builtin();
        let focus = catalog.category("focus").unwrap();
        let t = select_track_variant(focus, &state(0.9, 8, 4)).unwrap();
        assert_eq!(t.intensity, Intensity::High);
    }

    #[test]
    fn neutral_state_prefers_adaptive_variant() {
        let catalog = CatalogRegistry::builtin();
        let focus = catalog.category("focus").unwrap();
        let t = select_track_variant(focus, &state(0.5, 5, 4)).unwrap();
        assert_eq!(t.intensity, Intensity::Adaptive);
    }

    #[test]
    fn missing_adaptive_falls_back_to_second_track() {
        let category = Category {
            id: "bare".into(),
            name: "Bare".into(),
            description: String::new(),
            color: String::new(),
            icon: String::new(),
            tracks: vec![
                Track {
                    name: "one".into(),
                    source: "one.ogg".into(),
                    duration_secs: 60,
                    intensity: Intensity::Low,
                },
                Track {
                    name: "two".into(),
                    source: "two.ogg".into(),
                    duration_secs: 60,
                    intensity: Intensity::Medium,
                },
            ],
        };
        let t = select_track_variant(&category, &state(0.5, 5, 4)).unwrap();
        assert_eq!(t.name, "two");
    }

    #[test]
    fn empty_track_list_selects_nothing() {
        let category = Category {
            id: "empty".into(),
            name: "Empty".into(),
            description: String::new(),
            color: String::new(),
            icon: String::new(),
            tracks: vec![],
        };
        assert!(select_track_variant(&category, &state(0.5, 5, 4)).is_none());
    }

    #[test]
    fn seeded_selectors_are_deterministic() {
        let mut a = AdaptiveSelector::with_seed(42);
        let mut b = AdaptiveSelector::with_seed(42);
        for _ in 0..10 {
            a.refresh_at_hour(12);
            b.refresh_at_hour(12);
        }
        assert_eq!(a.state().energy, b.state().energy);
        assert_eq!(a.state().stress, b.state().stress);
    }
}
