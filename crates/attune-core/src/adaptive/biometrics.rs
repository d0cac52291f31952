//! Simulated biometric state.
//!
//! There is no real sensor input: circadian phase is derived from the
//! wall-clock hour via a fixed day-partition table, and energy/stress drift
//! stochastically on each refresh. State is process-local and resets on
//! restart.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Heuristic biometric snapshot driving adaptive selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricState {
    /// 0.0-1.0 alertness approximation derived from the hour of day.
    pub circadian_phase: f64,
    /// Energy level, 1-10.
    pub energy: u8,
    /// Stress level, 1-10.
    pub stress: u8,
    /// Optional external signal; carried but not yet used by the heuristics.
    pub weather: Option<String>,
    /// Optional external signal; carried but not yet used by the heuristics.
    pub location: Option<String>,
    pub refreshed_at: DateTime<Utc>,
}

impl Default for BiometricState {
    fn default() -> Self {
        Self {
            circadian_phase: 0.5,
            energy: 5,
            stress: 4,
            weather: None,
            location: None,
            refreshed_at: Utc::now(),
        }
    }
}

/// Fixed day-partition table mapping hour of day to circadian phase.
///
/// Morning peak, post-lunch dip, afternoon/evening recovery, low overnight.
pub fn circadian_phase_for_hour(hour: u8) -> f64 {
    match hour {
        6..=9 => 0.9,
        10..=13 => 0.4,
        14..=21 => 0.7,
        _ => 0.2,
    }
}

impl BiometricState {
    /// Recompute circadian phase for `hour` and perturb energy/stress by
    /// one step in either direction, clamped to [1, 10].
    pub fn refresh<R: Rng>(&mut self, hour: u8, rng: &mut R) {
        self.circadian_phase = circadian_phase_for_hour(hour);
        self.energy = drift(self.energy, rng);
        self.stress = drift(self.stress, rng);
        self.refreshed_at = Utc::now();
    }
}

fn drift<R: Rng>(level: u8, rng: &mut R) -> u8 {
    let step: i8 = rng.gen_range(-1..=1);
    (level as i8 + step).clamp(1, 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn circadian_table_partitions_the_day() {
        assert_eq!(circadian_phase_for_hour(6), 0.9);
        assert_eq!(circadian_phase_for_hour(9), 0.9);
        assert_eq!(circadian_phase_for_hour(10), 0.4);
        assert_eq!(circadian_phase_for_hour(13), 0.4);
        assert_eq!(circadian_phase_for_hour(14), 0.7);
        assert_eq!(circadian_phase_for_hour(21), 0.7);
        assert_eq!(circadian_phase_for_hour(22), 0.2);
        assert_eq!(circadian_phase_for_hour(3), 0.2);
    }

    #[test]
    fn refresh_keeps_levels_in_bounds() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let mut state = BiometricState {
            energy: 1,
            stress: 10,
            ..Default::default()
        };
        for _ in 0..200 {
            state.refresh(12, &mut rng);
            assert!((1..=10).contains(&state.energy));
            assert!((1..=10).contains(&state.stress));
        }
    }

    #[test]
    fn refresh_updates_circadian_from_hour() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let mut state = BiometricState::default();
        state.refresh(7, &mut rng);
        assert_eq!(state.circadian_phase, 0.9);
        state.refresh(23, &mut rng);
        assert_eq!(state.circadian_phase, 0.2);
    }

    #[test]
    fn drift_moves_at_most_one_step() {
        let mut rng = Mcg128Xsl64::seed_from_u64(99);
        for _ in 0..100 {
            let next = drift(5, &mut rng);
            assert!((4..=6).contains(&next));
        }
    }
}
