//! Audio backend abstractions.
//!
//! The engine treats the platform audio subsystem as an opaque capability:
//! a backend opens a source into a handle, and the handle carries the
//! transport operations. Backends are swappable per platform; the crate
//! ships a simulated backend so the engine runs everywhere.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Options applied when opening a source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpenOptions {
    pub looping: bool,
    /// Initial volume, 0.0-1.0.
    pub volume: f32,
    /// Start playing immediately after the open completes.
    pub autoplay: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            looping: true,
            volume: 0.7,
            autoplay: true,
        }
    }
}

/// A single open audio resource.
///
/// At most one handle is live at any time; the controller enforces this.
pub trait AudioHandle: Send {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    fn resume(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError>;
    /// Release the underlying resource. The handle is dead afterwards.
    fn unload(&mut self) -> Result<(), PlaybackError>;
    fn position_ms(&self) -> u64;
}

/// Trait implemented by platform-specific audio backends.
pub trait AudioBackend: Send + Sync {
    fn open(
        &self,
        source: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

/// Backend that tracks transport state without touching any audio device.
///
/// Used as the default on platforms without a wired audio subsystem and as
/// the substrate for the degrade-gracefully policy in tests.
#[derive(Debug, Default)]
pub struct SimulatedBackend;

impl AudioBackend for SimulatedBackend {
    fn open(
        &self,
        source: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        Ok(Box::new(SimulatedHandle {
            source: source.to_string(),
            playing: options.autoplay,
            volume: options.volume,
            position_ms: 0,
        }))
    }
}

struct SimulatedHandle {
    #[allow(dead_code)]
    source: String,
    playing: bool,
    volume: f32,
    position_ms: u64,
}

impl AudioHandle for SimulatedHandle {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.playing = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.playing = false;
        self.position_ms = 0;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        self.volume = volume;
        Ok(())
    }

    fn unload(&mut self) -> Result<(), PlaybackError> {
        self.playing = false;
        Ok(())
    }

    fn position_ms(&self) -> u64 {
        self.position_ms
    }
}
