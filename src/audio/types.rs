//! Audio capability traits, playback state and events

use crate::error::AudioError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Playback state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    PlayingSample,
    Speaking,
}

/// What a single request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Recorded sample is playing
    Sample,
    /// Synthesized speech is playing
    Speech,
    /// A newer request or teardown took over before this one started
    Superseded,
    /// Neither sample nor speech could start
    Silent,
}

/// Voice settings for synthesized speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub rate: f32,
    pub pitch: f32,
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 0.75,
            pitch: 1.1,
            language: "en-US".to_string(),
        }
    }
}

/// Event broadcast to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    SampleStarted { label: String, url: String },
    SpeechStarted { label: String },
    /// Recorded sample unavailable; speech was used instead
    SampleFailed { label: String, reason: String },
    Stopped,
}

/// A loaded sample; the only resource the controller owns while playing
#[async_trait]
pub trait SampleHandle: Send {
    async fn play(&mut self) -> Result<(), AudioError>;
    async fn stop(&mut self) -> Result<(), AudioError>;
    /// Release decoder and output resources
    async fn unload(&mut self) -> Result<(), AudioError>;
}

/// Loads recorded samples
#[async_trait]
pub trait SamplePlayer: Send + Sync {
    async fn load(&self, url: &Url) -> Result<Box<dyn SampleHandle>, AudioError>;
}

/// Text-to-speech engine
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Start speaking `text`; returns once speech has begun
    async fn speak(&self, text: &str, config: &SpeechConfig) -> Result<(), AudioError>;
    /// Cancel any speech in progress
    async fn stop(&self);
}
