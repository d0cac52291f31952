//! Scenario runner.
//!
//! A wall-clock-based state machine. It does not own a timer thread - the
//! caller is responsible for calling `tick()` periodically. Stopping or
//! superseding a run simply rewrites the state, so there is no detached
//! timer left to cancel and a stale driver tick in `Idle` is a no-op.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(scenario, phase_index) -> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::Scenario;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    Idle,
    Running,
}

/// Drives a scenario's evenly-divided phases against the wall clock.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    state: RunnerState,
    scenario: Option<Scenario>,
    phase_index: usize,
    phase_duration_ms: u64,
    /// Epoch ms at which the current phase's budget started.
    phase_started_epoch_ms: u64,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self {
            state: RunnerState::Idle,
            scenario: None,
            phase_index: 0,
            phase_duration_ms: 0,
            phase_started_epoch_ms: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn scenario_id(&self) -> Option<&str> {
        self.scenario.as_ref().map(|s| s.id.as_str())
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn current_phase(&self) -> Option<&str> {
        let scenario = self.scenario.as_ref()?;
        scenario.phases.get(self.phase_index).map(String::as_str)
    }

    pub fn phase_duration_ms(&self) -> u64 {
        self.phase_duration_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Transition from any state to `Running` at phase 0, superseding any
    /// previous run. A scenario with no phases is rejected before any state
    /// mutation (the even division would otherwise divide by zero).
    pub fn start(&mut self, scenario: &Scenario) -> Result<Event, ValidationError> {
        let phase_duration_ms = scenario.phase_duration_ms().ok_or_else(|| {
            ValidationError::EmptyCollection(format!("scenario '{}' has no phases", scenario.id))
        })?;

        self.state = RunnerState::Running;
        self.scenario = Some(scenario.clone());
        self.phase_index = 0;
        self.phase_duration_ms = phase_duration_ms;
        self.phase_started_epoch_ms = now_ms();

        Ok(Event::ScenarioStarted {
            scenario_id: scenario.id.clone(),
            phase_count: scenario.phases.len(),
            phase_duration_ms,
            at: Utc::now(),
        })
    }

    /// Cancel the active run immediately. Idempotent.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != RunnerState::Running {
            return None;
        }
        let scenario_id = self.scenario.take().map(|s| s.id).unwrap_or_default();
        self.state = RunnerState::Idle;
        self.phase_index = 0;
        Some(Event::ScenarioStopped {
            scenario_id,
            at: Utc::now(),
        })
    }

    /// Call periodically. Emits at most one phase transition per call; the
    /// final transition also emits exactly one completion event and returns
    /// the runner to `Idle`. Ticks outside `Running` do nothing.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(now_ms())
    }

    fn tick_at(&mut self, now: u64) -> Vec<Event> {
        if self.state != RunnerState::Running {
            return Vec::new();
        }
        let Some(scenario) = self.scenario.as_ref() else {
            return Vec::new();
        };

        let elapsed = now.saturating_sub(self.phase_started_epoch_ms);
        if elapsed < self.phase_duration_ms {
            return Vec::new();
        }

        let mut events = Vec::new();
        let phase_name = scenario
            .phases
            .get(self.phase_index)
            .cloned()
            .unwrap_or_default();
        events.push(Event::PhaseAdvanced {
            scenario_id: scenario.id.clone(),
            phase_index: self.phase_index,
            phase_name,
            at: Utc::now(),
        });

        self.phase_index += 1;
        // Advance the budget by one phase, not to `now`, so a late driver
        // catches up one boundary per tick.
        self.phase_started_epoch_ms = self.phase_started_epoch_ms.saturating_add(self.phase_duration_ms);

        if self.phase_index == scenario.phases.len() {
            let scenario_id = scenario.id.clone();
            self.state = RunnerState::Idle;
            self.scenario = None;
            self.phase_index = 0;
            events.push(Event::ScenarioCompleted {
                scenario_id,
                at: Utc::now(),
            });
        }

        events
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(id: &str, duration_min: u64, phases: &[&str]) -> Scenario {
        Scenario {
            id: id.into(),
            name: id.into(),
            duration_min,
            phases: phases.iter().map(|p| p.to_string()).collect(),
            category_id: "relax".into(),
            color: String::new(),
            icon: String::new(),
        }
    }

    #[test]
    fn start_divides_duration_evenly() {
        let mut runner = ScenarioRunner::new();
        let event = runner
            .start(&scenario("wind-down", 20, &["a", "b", "c", "d"]))
            .unwrap();
        assert_eq!(runner.state(), RunnerState::Running);
        assert_eq!(runner.phase_duration_ms(), 5 * 60 * 1000);
        match event {
            Event::ScenarioStarted {
                phase_count,
                phase_duration_ms,
                ..
            } => {
                assert_eq!(phase_count, 4);
                assert_eq!(phase_duration_ms, 5 * 60 * 1000);
            }
            other => panic!("expected ScenarioStarted, got {other:?}"),
        }
    }

    #[test]
    fn zero_phase_scenario_is_rejected_before_running() {
        let mut runner = ScenarioRunner::new();
        let err = runner.start(&scenario("empty", 10, &[]));
        assert!(err.is_err());
        assert_eq!(runner.state(), RunnerState::Idle);
        // No phase event can ever fire for the rejected scenario.
        assert!(runner.tick().is_empty());
    }

    #[test]
    fn phase_boundaries_fire_at_even_intervals() {
        let mut runner = ScenarioRunner::new();
        runner
            .start(&scenario("wind-down", 20, &["a", "b", "c", "d"]))
            .unwrap();
        let t0 = runner.phase_started_epoch_ms;
        let minute = 60 * 1000u64;

        // Just before the first boundary: nothing.
        assert!(runner.tick_at(t0 + 5 * minute - 1).is_empty());

        for (i, boundary_min) in [5u64, 10, 15].iter().enumerate() {
            let events = runner.tick_at(t0 + boundary_min * minute);
            assert_eq!(events.len(), 1, "boundary at minute {boundary_min}");
            match &events[0] {
                Event::PhaseAdvanced {
                    phase_index,
                    phase_name,
                    ..
                } => {
                    assert_eq!(*phase_index, i);
                    assert_eq!(phase_name, ["a", "b", "c"][i]);
                }
                other => panic!("expected PhaseAdvanced, got {other:?}"),
            }
        }

        // Fourth boundary: final transition plus exactly one completion.
        let events = runner.tick_at(t0 + 20 * minute);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::PhaseAdvanced { phase_index: 3, .. }));
        assert!(matches!(events[1], Event::ScenarioCompleted { .. }));
        assert_eq!(runner.state(), RunnerState::Idle);

        // Stale ticks after completion are no-ops.
        assert!(runner.tick_at(t0 + 25 * minute).is_empty());
    }

    #[test]
    fn late_driver_catches_up_one_boundary_per_tick() {
        let mut runner = ScenarioRunner::new();
        runner.start(&scenario("s", 2, &["a", "b"])).unwrap();
        let t0 = runner.phase_started_epoch_ms;

        // Driver wakes up long past both boundaries.
        let events = runner.tick_at(t0 + 10 * 60 * 1000);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::PhaseAdvanced { phase_index: 0, .. }));

        let events = runner.tick_at(t0 + 10 * 60 * 1000);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Event::ScenarioCompleted { .. }));
    }

    #[test]
    fn superseding_start_replaces_the_run() {
        let mut runner = ScenarioRunner::new();
        runner.start(&scenario("first", 10, &["a", "b"])).unwrap();
        runner.start(&scenario("second", 10, &["x", "y"])).unwrap();
        assert_eq!(runner.scenario_id(), Some("second"));
        assert_eq!(runner.phase_index(), 0);

        let t0 = runner.phase_started_epoch_ms;
        let events = runner.tick_at(t0 + 5 * 60 * 1000);
        match &events[0] {
            Event::PhaseAdvanced { scenario_id, .. } => assert_eq!(scenario_id, "second"),
            other => panic!("expected PhaseAdvanced, got {other:?}"),
        }
    }

    #[test]
    fn stop_cancels_and_is_idempotent() {
        let mut runner = ScenarioRunner::new();
        runner.start(&scenario("s", 10, &["a", "b"])).unwrap();
        let stopped = runner.stop();
        assert!(matches!(stopped, Some(Event::ScenarioStopped { .. })));
        assert_eq!(runner.state(), RunnerState::Idle);
        assert!(runner.stop().is_none());
        assert!(runner.tick().is_empty());
    }
}
