//! Soundscape engine facade.
//!
//! Wires the catalog, adaptive selector, playback controller and scenario
//! runner behind one explicitly constructed value. There is no global
//! instance: callers own the engine, drive `tick()` periodically, and poll
//! `status()` for snapshots. Dropping the engine releases any live audio
//! handle.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::adaptive::{AdaptiveSelector, BiometricState};
use crate::catalog::CatalogRegistry;
use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::playback::{ActiveSource, AudioBackend, PlaybackController, PlaybackStatus, ResumeOutcome};
use crate::scenario::ScenarioRunner;

/// Outcome of a recommendation query, for display layers.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category_id: String,
    pub biometrics: BiometricState,
}

pub struct SoundscapeEngine {
    catalog: CatalogRegistry,
    selector: AdaptiveSelector,
    controller: PlaybackController,
    runner: ScenarioRunner,
    refresh_interval_ms: u64,
    adapt_interval_ms: u64,
    auto_adapt: bool,
    last_refresh_epoch_ms: u64,
    last_adapt_epoch_ms: u64,
}

impl SoundscapeEngine {
    /// Build an engine with the built-in catalog.
    pub fn new(config: &Config, backend: Arc<dyn AudioBackend>) -> Self {
        Self::with_parts(
            CatalogRegistry::builtin(),
            AdaptiveSelector::new(),
            backend,
            config,
        )
    }

    /// Build an engine from explicit parts (tests and embedders).
    pub fn with_parts(
        catalog: CatalogRegistry,
        selector: AdaptiveSelector,
        backend: Arc<dyn AudioBackend>,
        config: &Config,
    ) -> Self {
        let now = now_ms();
        Self {
            catalog,
            selector,
            controller: PlaybackController::new(backend, config.playback.default_volume),
            runner: ScenarioRunner::new(),
            refresh_interval_ms: config.biometrics.refresh_interval_secs.saturating_mul(1000),
            adapt_interval_ms: config.session.adapt_interval_secs.saturating_mul(1000),
            auto_adapt: config.session.auto_adapt,
            last_refresh_epoch_ms: now,
            last_adapt_epoch_ms: now,
        }
    }

    pub fn catalog(&self) -> &CatalogRegistry {
        &self.catalog
    }

    pub fn biometrics(&self) -> &BiometricState {
        self.selector.state()
    }

    /// Replace the simulated biometric state (seam for a real sensor feed).
    pub fn set_biometrics(&mut self, state: BiometricState) {
        self.selector.set_state(state);
    }

    pub fn status(&self) -> PlaybackStatus {
        self.controller.status()
    }

    pub fn snapshot(&self) -> Event {
        Event::StatusSnapshot {
            status: self.controller.status(),
            at: Utc::now(),
        }
    }

    /// Refresh biometrics and recommend a category for right now.
    pub fn recommendation(&mut self) -> Recommendation {
        self.selector.refresh();
        Recommendation {
            category_id: self.selector.recommend().to_string(),
            biometrics: self.selector.state().clone(),
        }
    }

    /// Start adaptive looping playback of a soundscape category.
    ///
    /// Supersedes any scenario run. Unknown ids fail before any state
    /// changes; backend failures degrade to simulated playback instead of
    /// failing.
    pub fn play_soundscape(&mut self, category_id: &str) -> Result<Vec<Event>> {
        let category = self
            .catalog
            .category(category_id)
            .ok_or_else(|| ValidationError::UnknownId {
                kind: "category",
                id: category_id.to_string(),
            })?;

        // Selection decisions always see fresh biometrics.
        self.selector.refresh();
        let track = self.selector.select_track(category).ok_or_else(|| {
            ValidationError::EmptyCollection(format!("category '{category_id}' has no tracks"))
        })?;

        let source = ActiveSource {
            category_id: category.id.clone(),
            scenario_id: None,
            track_name: track.name.clone(),
            source: track.source.clone(),
        };

        let mut events = Vec::new();
        if let Some(stopped) = self.runner.stop() {
            events.push(stopped);
        }
        let simulated = self.controller.play(source.clone())?;
        events.push(Event::PlaybackStarted {
            category_id: source.category_id,
            track_name: source.track_name,
            simulated,
            at: Utc::now(),
        });
        Ok(events)
    }

    /// Start a guided scenario: fixed track for its category, looping
    /// playback, and evenly divided phases driven by `tick()`.
    pub fn play_scenario(&mut self, scenario_id: &str) -> Result<Vec<Event>> {
        let scenario = self
            .catalog
            .scenario(scenario_id)
            .ok_or_else(|| ValidationError::UnknownId {
                kind: "scenario",
                id: scenario_id.to_string(),
            })?
            .clone();

        // Biometrics still refresh on every playback start, even though
        // scenarios bypass adaptive selection.
        self.selector.refresh();

        // Reject before touching playback; the runner would divide by zero.
        if scenario.phase_duration_ms().is_none() {
            return Err(ValidationError::EmptyCollection(format!(
                "scenario '{scenario_id}' has no phases"
            ))
            .into());
        }

        let category =
            self.catalog
                .category(&scenario.category_id)
                .ok_or_else(|| ValidationError::UnknownId {
                    kind: "category",
                    id: scenario.category_id.clone(),
                })?;
        // Scenarios use a fixed mapping rather than adaptive selection.
        let track = category.tracks.first().ok_or_else(|| {
            ValidationError::EmptyCollection(format!(
                "category '{}' has no tracks",
                scenario.category_id
            ))
        })?;

        let source = ActiveSource {
            category_id: category.id.clone(),
            scenario_id: Some(scenario.id.clone()),
            track_name: track.name.clone(),
            source: track.source.clone(),
        };

        let mut events = Vec::new();
        if let Some(stopped) = self.runner.stop() {
            events.push(stopped);
        }
        let simulated = self.controller.play(source.clone())?;
        events.push(Event::PlaybackStarted {
            category_id: source.category_id,
            track_name: source.track_name,
            simulated,
            at: Utc::now(),
        });
        let started = self
            .runner
            .start(&scenario)
            .map_err(crate::error::CoreError::Validation)?;
        events.push(started);
        Ok(events)
    }

    pub fn pause(&mut self) -> Event {
        self.controller.pause();
        Event::PlaybackPaused { at: Utc::now() }
    }

    /// Resume playback; re-plays the remembered category when the resource
    /// was lost (recovery path).
    pub fn resume(&mut self) -> Result<Vec<Event>> {
        match self.controller.resume() {
            ResumeOutcome::Resumed => Ok(vec![Event::PlaybackResumed { at: Utc::now() }]),
            ResumeOutcome::NeedsReplay(category_id) => self.play_soundscape(&category_id),
            ResumeOutcome::NoOp => Ok(Vec::new()),
        }
    }

    /// Stop playback and any scenario run. Idempotent.
    pub fn stop(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(stopped) = self.runner.stop() {
            events.push(stopped);
        }
        self.controller.stop();
        events.push(Event::PlaybackStopped { at: Utc::now() });
        events
    }

    pub fn set_volume(&mut self, volume: f32) -> Event {
        let stored = self.controller.set_volume(volume);
        Event::VolumeChanged {
            volume: stored,
            at: Utc::now(),
        }
    }

    /// Drive periodic work: biometric refresh, scenario phase advancement,
    /// and auto-adapt re-evaluation. Call on a fixed interval.
    pub fn tick(&mut self) -> Vec<Event> {
        let now = now_ms();
        let mut events = Vec::new();

        if now.saturating_sub(self.last_refresh_epoch_ms) >= self.refresh_interval_ms {
            self.last_refresh_epoch_ms = now;
            self.selector.refresh();
            let state = self.selector.state();
            events.push(Event::BiometricsRefreshed {
                circadian_phase: state.circadian_phase,
                energy: state.energy,
                stress: state.stress,
                at: Utc::now(),
            });
        }

        let runner_events = self.runner.tick();
        let completed = runner_events
            .iter()
            .any(|e| matches!(e, Event::ScenarioCompleted { .. }));
        events.extend(runner_events);
        if completed {
            // The session is over; release the audio resource too.
            self.controller.stop();
            events.push(Event::PlaybackStopped { at: Utc::now() });
        }

        if self.auto_adapt && now.saturating_sub(self.last_adapt_epoch_ms) >= self.adapt_interval_ms
        {
            self.last_adapt_epoch_ms = now;
            events.extend(self.re_evaluate_category());
        }

        events
    }

    /// Switch the active soundscape when the recommendation moved. Scenario
    /// playback is never switched from under a running session.
    fn re_evaluate_category(&mut self) -> Vec<Event> {
        let current = match self.controller.active() {
            Some(active) if active.scenario_id.is_none() => active.category_id.clone(),
            _ => return Vec::new(),
        };
        if !self.controller.status().is_playing {
            return Vec::new();
        }

        let recommended = self.selector.recommend();
        if recommended == current {
            return Vec::new();
        }

        match self.play_soundscape(recommended) {
            Ok(started) => {
                let mut events = vec![Event::CategorySwitched {
                    from_category: current,
                    to_category: recommended.to_string(),
                    at: Utc::now(),
                }];
                events.extend(started);
                events
            }
            Err(err) => {
                tracing::warn!(error = %err, "auto-adapt category switch failed");
                Vec::new()
            }
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
