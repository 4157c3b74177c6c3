//! Lesson session lifecycle
//!
//! A [`LessonScreen`] shows one lesson at a time. `open` always closes the
//! previous session before querying the repository, so audio and tracing state
//! never leak from one lesson into the next.

mod lesson;

pub use lesson::{LessonSession, MediaWarning};

use crate::assets::AssetResolver;
use crate::audio::{AudioController, SamplePlayer, SpeechConfig, SpeechEngine};
use crate::error::LessonError;
use crate::lesson::LessonRepository;
use crate::strokes::DEFAULT_STROKE_COLOR;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// What the screen currently presents
pub enum LessonView {
    /// No lesson requested yet, or the last one was closed
    Closed,
    /// Terminal state for a phoneme with no usable lesson
    NotFound { phoneme: String, error: LessonError },
    Ready(LessonSession),
}

/// External collaborators a screen plays audio through
#[derive(Clone)]
pub struct AudioCapabilities {
    pub player: Arc<dyn SamplePlayer>,
    pub speech: Arc<dyn SpeechEngine>,
}

/// Owns the session for whichever lesson is on screen
pub struct LessonScreen {
    repository: Arc<dyn LessonRepository>,
    capabilities: AudioCapabilities,
    assets: AssetResolver,
    speech_config: SpeechConfig,
    stroke_color: String,
    view: LessonView,
}

impl LessonScreen {
    pub fn new(
        repository: Arc<dyn LessonRepository>,
        capabilities: AudioCapabilities,
        assets: AssetResolver,
        speech_config: SpeechConfig,
    ) -> Self {
        Self {
            repository,
            capabilities,
            assets,
            speech_config,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            view: LessonView::Closed,
        }
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }

    pub fn view(&self) -> &LessonView {
        &self.view
    }

    pub fn session(&self) -> Option<&LessonSession> {
        match &self.view {
            LessonView::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut LessonSession> {
        match &mut self.view {
            LessonView::Ready(session) => Some(session),
            _ => None,
        }
    }

    /// Close the current lesson and open the one for `phoneme`
    #[instrument(skip(self))]
    pub async fn open(&mut self, phoneme: &str) -> &LessonView {
        self.close().await;

        self.view = match self.repository.fetch(phoneme).await {
            Ok(Some(record)) => {
                let audio = AudioController::new(
                    self.capabilities.player.clone(),
                    self.capabilities.speech.clone(),
                    self.assets.clone(),
                    self.speech_config.clone(),
                );
                LessonView::Ready(LessonSession::new(
                    record,
                    audio,
                    self.assets.clone(),
                    &self.stroke_color,
                ))
            }
            Ok(None) => {
                warn!("No lesson found for phoneme");
                LessonView::NotFound {
                    phoneme: phoneme.to_string(),
                    error: LessonError::NotFound {
                        phoneme: phoneme.to_string(),
                    },
                }
            }
            Err(e) => {
                error!("Failed to load lesson: {}", e);
                LessonView::NotFound {
                    phoneme: phoneme.to_string(),
                    error: e,
                }
            }
        };

        &self.view
    }

    /// Tear down the current session, if any
    pub async fn close(&mut self) {
        match std::mem::replace(&mut self.view, LessonView::Closed) {
            LessonView::Ready(session) => session.close().await,
            LessonView::NotFound { phoneme, .. } => {
                info!(phoneme = %phoneme, "Leaving not-found lesson");
            }
            LessonView::Closed => {}
        }
    }
}
