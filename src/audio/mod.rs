//! Pronunciation playback
//!
//! Plays a recorded sample when one exists and falls back to synthesized
//! speech on any failure. At most one audible source exists at a time: every
//! request first stops and releases whatever is playing.
//!
//! # Concurrency
//! Loading a sample happens outside the playback lock so teardown never waits
//! on the network. Each request carries a generation number; a load that
//! settles after a newer request (or teardown) releases its handle instead of
//! playing it.

mod types;

pub use types::{
    PlaybackEvent, PlaybackOutcome, PlaybackState, SampleHandle, SamplePlayer, SpeechConfig,
    SpeechEngine,
};

use crate::assets::AssetResolver;
use crate::error::AudioError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, instrument, warn};

/// Currently owned playback resource
#[derive(Default)]
struct PlaybackSlot {
    state: PlaybackState,
    handle: Option<Box<dyn SampleHandle>>,
}

impl PlaybackSlot {
    /// Stop and unload the held sample, if any
    async fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            if let Err(e) = handle.stop().await {
                warn!("Failed to stop sample: {}", e);
            }
            if let Err(e) = handle.unload().await {
                warn!("Failed to unload sample: {}", e);
            }
            debug!("Released sample handle");
        }
        self.state = PlaybackState::Idle;
    }
}

/// Coordinates sample playback and speech fallback for one lesson session
pub struct AudioController {
    player: Arc<dyn SamplePlayer>,
    speech: Arc<dyn SpeechEngine>,
    assets: AssetResolver,
    speech_config: SpeechConfig,
    slot: Arc<Mutex<PlaybackSlot>>,
    generation: AtomicU64,
    event_tx: broadcast::Sender<PlaybackEvent>,
}

impl AudioController {
    pub fn new(
        player: Arc<dyn SamplePlayer>,
        speech: Arc<dyn SpeechEngine>,
        assets: AssetResolver,
        speech_config: SpeechConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            player,
            speech,
            assets,
            speech_config,
            slot: Arc::new(Mutex::new(PlaybackSlot::default())),
            generation: AtomicU64::new(0),
            event_tx,
        }
    }

    /// Subscribe to playback events
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.event_tx.subscribe()
    }

    pub async fn state(&self) -> PlaybackState {
        self.slot.lock().await.state
    }

    pub fn speech_config(&self) -> &SpeechConfig {
        &self.speech_config
    }

    /// Play `label`, preferring the recorded sample when `use_sample` is set
    #[instrument(skip(self))]
    pub async fn request(&self, label: &str, use_sample: bool) -> PlaybackOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut slot = self.slot.lock().await;
            slot.release().await;
            self.speech.stop().await;
        }

        if use_sample {
            match self.play_sample(label, generation).await {
                Ok(outcome) => return outcome,
                Err(e) => {
                    warn!(label = %label, "Sample playback failed, falling back to speech: {}", e);
                    let _ = self.event_tx.send(PlaybackEvent::SampleFailed {
                        label: label.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.speak(label, generation).await
    }

    /// Stop everything and invalidate pending loads
    pub async fn teardown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut slot = self.slot.lock().await;
        slot.release().await;
        self.speech.stop().await;
        let _ = self.event_tx.send(PlaybackEvent::Stopped);
        info!("Audio session torn down");
    }

    /// Report that the current sound ended on its own
    pub async fn mark_finished(&self) {
        let mut slot = self.slot.lock().await;
        if slot.state != PlaybackState::Idle {
            slot.release().await;
            let _ = self.event_tx.send(PlaybackEvent::Stopped);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn play_sample(
        &self,
        label: &str,
        generation: u64,
    ) -> Result<PlaybackOutcome, AudioError> {
        let url = self.assets.sample_url(label)?;
        let mut handle = self.player.load(&url).await?;

        let mut slot = self.slot.lock().await;
        if !self.is_current(generation) {
            debug!(url = %url, "Discarding sample loaded for a superseded request");
            if let Err(e) = handle.unload().await {
                warn!("Failed to unload superseded sample: {}", e);
            }
            return Ok(PlaybackOutcome::Superseded);
        }

        if let Err(e) = handle.play().await {
            if let Err(unload_err) = handle.unload().await {
                warn!("Failed to unload sample after play error: {}", unload_err);
            }
            return Err(e);
        }

        slot.handle = Some(handle);
        slot.state = PlaybackState::PlayingSample;
        info!(url = %url, "Playing sample");
        let _ = self.event_tx.send(PlaybackEvent::SampleStarted {
            label: label.to_string(),
            url: url.to_string(),
        });
        Ok(PlaybackOutcome::Sample)
    }

    async fn speak(&self, label: &str, generation: u64) -> PlaybackOutcome {
        let mut slot = self.slot.lock().await;
        if !self.is_current(generation) {
            return PlaybackOutcome::Superseded;
        }

        match self.speech.speak(label, &self.speech_config).await {
            Ok(()) => {
                slot.state = PlaybackState::Speaking;
                let _ = self.event_tx.send(PlaybackEvent::SpeechStarted {
                    label: label.to_string(),
                });
                PlaybackOutcome::Speech
            }
            Err(e) => {
                error!(label = %label, "Speech synthesis failed: {}", e);
                slot.state = PlaybackState::Idle;
                PlaybackOutcome::Silent
            }
        }
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let handle = match self.slot.try_lock() {
            Ok(mut slot) => slot.handle.take(),
            Err(_) => None,
        };
        let speech = Arc::clone(&self.speech);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Some(mut handle) = handle {
                        let _ = handle.stop().await;
                        let _ = handle.unload().await;
                    }
                    speech.stop().await;
                });
            }
            Err(_) => warn!("Audio controller dropped outside a runtime; playback not released"),
        }
    }
}
