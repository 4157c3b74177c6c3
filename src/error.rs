use thiserror::Error;

/// Lesson loading errors
///
/// None of these are fatal: every variant ends in the "not found"
/// presentation for the requested phoneme.
#[derive(Debug, Error)]
pub enum LessonError {
    #[error("Lesson fetch failed: {0}")]
    FetchFailed(String),

    #[error("No lesson found for phoneme {phoneme:?}")]
    NotFound { phoneme: String },

    #[error("Invalid lesson record: {0}")]
    InvalidRecord(String),
}

impl From<reqwest::Error> for LessonError {
    fn from(err: reqwest::Error) -> Self {
        LessonError::FetchFailed(err.to_string())
    }
}

/// Sample playback errors
///
/// Only ever surfaced as diagnostics; the controller falls back to speech.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Invalid sample URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Sample URL unavailable: {0}")]
    Media(#[from] MediaError),

    #[error("Sample not found: {0}")]
    MissingAsset(String),

    #[error("Network error while loading sample: {0}")]
    Network(String),

    #[error("Failed to decode sample: {0}")]
    Decode(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),
}

/// Media URL errors shared by samples and tracing guides
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media base URL cannot hold path segments: {0}")]
    UnsupportedBase(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
