#![deny(clippy::all)]

use anyhow::Context;
use async_trait::async_trait;
use phonics_lesson::assets::AssetResolver;
use phonics_lesson::audio::{SampleHandle, SamplePlayer, SpeechConfig, SpeechEngine};
use phonics_lesson::config::AppConfig;
use phonics_lesson::lesson::HttpLessonRepository;
use phonics_lesson::phonics::CURRICULUM;
use phonics_lesson::preferences;
use phonics_lesson::session::{AudioCapabilities, LessonScreen, LessonView};
use phonics_lesson::AudioError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Checks that a sample exists with a HEAD request; "playing" is logged only
struct ProbePlayer {
    client: reqwest::Client,
}

impl ProbePlayer {
    fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client for ProbePlayer")?;
        Ok(Self { client })
    }
}

struct LoggedSample {
    url: String,
}

#[async_trait]
impl SampleHandle for LoggedSample {
    async fn play(&mut self) -> Result<(), AudioError> {
        info!(url = %self.url, "Sample playing");
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), AudioError> {
        info!(url = %self.url, "Sample stopped");
        Ok(())
    }

    async fn unload(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

#[async_trait]
impl SamplePlayer for ProbePlayer {
    async fn load(&self, url: &Url) -> Result<Box<dyn SampleHandle>, AudioError> {
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| AudioError::Network(e.to_string()))?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AudioError::MissingAsset(url.to_string()));
        }
        if !status.is_success() {
            return Err(AudioError::Network(format!("{} for {}", status, url)));
        }
        Ok(Box::new(LoggedSample {
            url: url.to_string(),
        }))
    }
}

struct LoggedSpeech;

#[async_trait]
impl SpeechEngine for LoggedSpeech {
    async fn speak(&self, text: &str, config: &SpeechConfig) -> Result<(), AudioError> {
        info!(
            text = %text,
            rate = config.rate,
            pitch = config.pitch,
            language = %config.language,
            "Speaking"
        );
        Ok(())
    }

    async fn stop(&self) {}
}

/// Load configuration from `PHONICS_CONFIG` or the embedded defaults
fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var("PHONICS_CONFIG") {
        Ok(path) => AppConfig::from_path(Path::new(&path))
            .with_context(|| format!("Failed to load config from {}", path)),
        Err(_) => AppConfig::embedded().context("Embedded config.toml is invalid"),
    }
}

fn print_session(view: &LessonView) {
    match view {
        LessonView::Ready(session) => {
            let record = session.record();
            println!("Lesson {} ({})", record.label, record.phoneme);
            let letters: Vec<String> = session.letters().iter().map(|k| k.to_string()).collect();
            println!("  Trace:   {}", letters.join(" "));
            println!("  Recap:   {}", session.recap().join(", "));
            for clip in session.video_clips() {
                println!("  Video:   {}", clip);
            }
            for example in &record.examples {
                println!("  Example: {}", example.label);
            }
            if !record.blending.is_empty() {
                println!("  Blend:   {}", record.blending.join(", "));
            }
            for warning in session.media_warnings() {
                println!("  Warning: {:?}", warning);
            }
        }
        LessonView::NotFound { phoneme, error } => {
            println!("No lesson for {}: {}", phoneme, error);
        }
        LessonView::Closed => println!("No lesson open"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for structured logging
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        info!("No .env file loaded: {}", e);
    }

    let config = load_config()?;
    let mut prefs = preferences::load_preferences();

    if let (Some(last), Some(at)) = (prefs.last_phoneme.as_deref(), prefs.last_opened()) {
        info!(phoneme = %last, opened_at = %at, "Last lesson");
    }

    let phoneme = std::env::args()
        .nth(1)
        .or_else(|| prefs.last_phoneme.clone())
        .unwrap_or_else(|| CURRICULUM[0].to_string());

    let api_key = config
        .repository
        .api_key_env
        .as_deref()
        .and_then(|name| std::env::var(name).ok());
    if api_key.is_none() {
        warn!("No repository API key configured; querying anonymously");
    }

    let repository = HttpLessonRepository::new(&config.repository, api_key)?;
    let assets = AssetResolver::new(&config.media).context("Invalid media base URL")?;
    let capabilities = AudioCapabilities {
        player: Arc::new(ProbePlayer::new()?),
        speech: Arc::new(LoggedSpeech),
    };

    let mut screen = LessonScreen::new(
        Arc::new(repository),
        capabilities,
        assets,
        config.speech.clone(),
    );
    if let Some(color) = prefs.stroke_color.clone() {
        screen = screen.with_stroke_color(color);
    }

    print_session(screen.open(&phoneme).await);

    if let Some(session) = screen.session() {
        let outcome = if prefs.prefer_samples() {
            session.play_lesson_label().await
        } else {
            session.audio().request(&session.record().label, false).await
        };
        info!(outcome = ?outcome, "Played lesson label");

        prefs.record_opened(&phoneme);
        if let Err(e) = preferences::save_preferences(&prefs) {
            warn!("Failed to save preferences: {}", e);
        }
    }

    screen.close().await;
    Ok(())
}
