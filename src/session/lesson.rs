//! State of one open lesson

use crate::assets::AssetResolver;
use crate::audio::{AudioController, PlaybackOutcome};
use crate::lesson::LessonRecord;
use crate::phonics::{recap_window, tracing_letters, TracingKey};
use crate::strokes::{StrokeStore, ViewSlot};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Media missing from a lesson record, rendered as an inline warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MediaWarning {
    MissingVideo,
    MissingExampleImage { index: usize, label: String },
}

/// Derived state and playback for a loaded lesson
pub struct LessonSession {
    record: LessonRecord,
    letters: Vec<TracingKey>,
    recap: Vec<&'static str>,
    strokes: StrokeStore,
    audio: AudioController,
    assets: AssetResolver,
    expanded: Option<TracingKey>,
}

impl LessonSession {
    pub(super) fn new(
        record: LessonRecord,
        audio: AudioController,
        assets: AssetResolver,
        stroke_color: &str,
    ) -> Self {
        let letters = tracing_letters(&record.phoneme);
        let recap = recap_window(&record.phoneme);

        let mut strokes = StrokeStore::new(stroke_color);
        for key in &letters {
            strokes.initialize(key);
        }

        if recap.is_empty() {
            debug!(phoneme = %record.phoneme, "No recap for phoneme");
        }
        info!(
            phoneme = %record.phoneme,
            letters = ?letters,
            recap = ?recap,
            "Lesson session ready"
        );

        Self {
            record,
            letters,
            recap,
            strokes,
            audio,
            assets,
            expanded: None,
        }
    }

    pub fn record(&self) -> &LessonRecord {
        &self.record
    }

    /// Letterforms to trace, in writing order
    pub fn letters(&self) -> &[TracingKey] {
        &self.letters
    }

    /// Previously taught phonemes, oldest first
    pub fn recap(&self) -> &[&'static str] {
        &self.recap
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.strokes
    }

    pub fn strokes_mut(&mut self) -> &mut StrokeStore {
        &mut self.strokes
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    /// Guide path for a letter's tracing surface
    pub fn guide_path(&self, key: &TracingKey) -> Option<String> {
        match self.assets.guide_url(key) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                warn!(key = %key, "No guide path: {}", e);
                None
            }
        }
    }

    /// Letter shown full-screen, if any
    pub fn expanded(&self) -> Option<&TracingKey> {
        self.expanded.as_ref()
    }

    /// Show `key` in the full-screen view; tracing data is untouched
    pub fn expand(&mut self, key: &TracingKey) -> bool {
        if !self.letters.contains(key) {
            warn!(key = %key, "Cannot expand a letter that is not in this lesson");
            return false;
        }
        if self.expanded.as_ref() == Some(key) {
            return true;
        }
        if let Some(previous) = self.expanded.take() {
            self.strokes.detach_surface(&previous, ViewSlot::Expanded);
        }
        self.expanded = Some(key.clone());
        true
    }

    /// Close the full-screen view; strokes drawn there stay in the store
    pub fn collapse(&mut self) {
        if let Some(key) = self.expanded.take() {
            self.strokes.detach_surface(&key, ViewSlot::Expanded);
        }
    }

    pub fn video_clips(&self) -> Vec<&str> {
        self.record.video_clips()
    }

    pub fn media_warnings(&self) -> Vec<MediaWarning> {
        let mut warnings = Vec::new();
        if self.record.video_clips().is_empty() {
            warnings.push(MediaWarning::MissingVideo);
        }
        for (index, example) in self.record.examples.iter().enumerate() {
            let image = example.image_url.as_deref().unwrap_or("");
            if image.trim().is_empty() {
                warnings.push(MediaWarning::MissingExampleImage {
                    index,
                    label: example.label.clone(),
                });
            }
        }
        warnings
    }

    pub async fn play_lesson_label(&self) -> PlaybackOutcome {
        self.audio.request(&self.record.label, true).await
    }

    pub async fn play_phoneme(&self) -> PlaybackOutcome {
        self.audio.request(&self.record.phoneme, true).await
    }

    pub async fn play_letter(&self, key: &TracingKey) -> PlaybackOutcome {
        self.audio.request(key.as_str(), true).await
    }

    /// Play an example word; `None` when `index` is out of range
    pub async fn play_example(&self, index: usize) -> Option<PlaybackOutcome> {
        let example = self.record.examples.get(index)?;
        Some(self.audio.request(&example.label, true).await)
    }

    pub async fn play_recap(&self, phoneme: &str) -> PlaybackOutcome {
        self.audio.request(phoneme, true).await
    }

    /// Blended words are free-form, so they always use speech
    pub async fn play_blend_word(&self, word: &str) -> PlaybackOutcome {
        self.audio.request(word, false).await
    }

    /// End the session: stop audio and discard all tracing state
    pub(super) async fn close(mut self) {
        self.expanded = None;
        self.audio.teardown().await;
        self.strokes.reset();
        info!(phoneme = %self.record.phoneme, "Lesson session closed");
    }
}
