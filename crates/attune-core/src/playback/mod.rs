//! Playback controller.
//!
//! Owns at most one live audio handle. Starting new playback always
//! releases the previous handle before acquiring the next one, and an
//! in-flight guard rejects a second acquisition while one is outstanding,
//! so two live handles can never coexist.
//!
//! Backend failures never propagate to callers: an open that fails
//! downgrades to a simulated playing state (status keeps reporting a
//! consistent picture to the UI) and is logged distinctly so the degrade
//! stays diagnosable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

mod backend;
pub use backend::{AudioBackend, AudioHandle, OpenOptions, SimulatedBackend};

use crate::error::PlaybackError;

/// What the controller is currently bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSource {
    pub category_id: String,
    /// Set when playback belongs to a scenario run.
    pub scenario_id: Option<String>,
    pub track_name: String,
    pub source: String,
}

/// Immutable status snapshot. Never exposes the live handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    /// True when the backend failed and playback is only simulated.
    pub simulated: bool,
    pub category_id: Option<String>,
    pub scenario_id: Option<String>,
    pub track_name: Option<String>,
    pub volume: f32,
    pub position_ms: u64,
}

/// Result of a `resume()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Playback resumed on the live (or simulated) resource.
    Resumed,
    /// The resource is gone but a category is remembered; the caller
    /// should issue a fresh play of this category.
    NeedsReplay(String),
    /// Nothing to resume.
    NoOp,
}

pub struct PlaybackController {
    backend: Arc<dyn AudioBackend>,
    handle: Option<Box<dyn AudioHandle>>,
    active: Option<ActiveSource>,
    playing: bool,
    simulated: bool,
    volume: f32,
    acquiring: bool,
}

impl PlaybackController {
    pub fn new(backend: Arc<dyn AudioBackend>, default_volume: f32) -> Self {
        Self {
            backend,
            handle: None,
            active: None,
            playing: false,
            simulated: false,
            volume: default_volume.clamp(0.0, 1.0),
            acquiring: false,
        }
    }

    /// Start looping playback of `source`, superseding anything active.
    ///
    /// Returns whether playback is simulated. `Err(Busy)` means another
    /// acquisition was already outstanding; existing state is untouched.
    pub fn play(&mut self, source: ActiveSource) -> Result<bool, PlaybackError> {
        if self.acquiring {
            return Err(PlaybackError::Busy);
        }

        // Release old before acquiring new; this ordering is the
        // single-handle invariant.
        self.release_current();

        self.acquiring = true;
        let opened = self.backend.open(
            &source.source,
            OpenOptions {
                looping: true,
                volume: self.volume,
                autoplay: true,
            },
        );
        self.acquiring = false;

        match opened {
            Ok(handle) => {
                self.handle = Some(handle);
                self.simulated = false;
            }
            Err(err) => {
                tracing::warn!(
                    source = %source.source,
                    error = %err,
                    "audio backend open failed; continuing in simulated playback"
                );
                self.handle = None;
                self.simulated = true;
            }
        }

        self.active = Some(source);
        self.playing = true;
        Ok(self.simulated)
    }

    /// Idempotent pause. With no active resource this only normalizes flags.
    ///
    /// A handle that fails to pause is considered lost and released; the
    /// remembered category allows `resume()` to request a fresh play.
    pub fn pause(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            if let Err(err) = handle.pause() {
                tracing::warn!(error = %err, "pause failed; releasing broken handle");
                self.release_current();
            }
        }
        self.playing = false;
    }

    /// Idempotent resume. See [`ResumeOutcome`] for the recovery path.
    pub fn resume(&mut self) -> ResumeOutcome {
        if let Some(handle) = self.handle.as_mut() {
            if let Err(err) = handle.resume() {
                tracing::warn!(error = %err, "resume failed; downgrading to simulated state");
                self.simulated = true;
            }
            self.playing = true;
            return ResumeOutcome::Resumed;
        }
        if self.simulated {
            if self.active.is_some() {
                self.playing = true;
                return ResumeOutcome::Resumed;
            }
        } else if let Some(active) = &self.active {
            return ResumeOutcome::NeedsReplay(active.category_id.clone());
        }
        ResumeOutcome::NoOp
    }

    /// Idempotent stop; releases the resource and clears all state.
    pub fn stop(&mut self) {
        self.release_current();
        self.active = None;
        self.playing = false;
        self.simulated = false;
    }

    /// Clamp to [0, 1], apply to the live handle, and keep as the default
    /// for future plays. Returns the stored value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let clamped = if volume.is_nan() {
            self.volume
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.volume = clamped;
        if let Some(handle) = self.handle.as_mut() {
            if let Err(err) = handle.set_volume(clamped) {
                tracing::warn!(error = %err, "set_volume failed on live handle");
            }
        }
        clamped
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn active(&self) -> Option<&ActiveSource> {
        self.active.as_ref()
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            is_playing: self.playing,
            simulated: self.simulated,
            category_id: self.active.as_ref().map(|a| a.category_id.clone()),
            scenario_id: self.active.as_ref().and_then(|a| a.scenario_id.clone()),
            track_name: self.active.as_ref().map(|a| a.track_name.clone()),
            volume: self.volume,
            position_ms: self.handle.as_ref().map(|h| h.position_ms()).unwrap_or(0),
        }
    }

    fn release_current(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            // Release errors are swallowed: the handle is being discarded
            // either way.
            if let Err(err) = handle.stop() {
                tracing::debug!(error = %err, "stop during release failed");
            }
            if let Err(err) = handle.unload() {
                tracing::debug!(error = %err, "unload during release failed");
            }
        }
    }

    #[cfg(test)]
    fn force_acquiring(&mut self, value: bool) {
        self.acquiring = value;
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release_current();
    }
}
