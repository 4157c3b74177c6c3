//! Lesson record as delivered by the repository
//!
//! Ingestion is tolerant: list fields may arrive as JSON lists or as strings
//! holding a serialized list, and empty strings count as absent media.

use crate::error::LessonError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Example word shown with the lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub label: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A lesson for one phoneme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLessonRecord")]
pub struct LessonRecord {
    pub id: String,
    pub label: String,
    pub phoneme: String,
    pub video_url: Option<String>,
    /// Alternate clips; `None` or non-empty
    pub video_urls: Option<Vec<String>>,
    pub audio_url: Option<String>,
    pub tracing_url: Option<String>,
    pub examples: Vec<Example>,
    pub blending: Vec<String>,
    pub group_name: Option<String>,
    pub order_index: Option<i64>,
}

/// Either shape a list field is observed in upstream
#[derive(Deserialize)]
#[serde(untagged)]
enum ListField<T> {
    List(Vec<T>),
    Encoded(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdField {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
struct RawLessonRecord {
    id: IdField,
    #[serde(default)]
    label: Option<String>,
    phoneme: String,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    video_urls: Option<Vec<String>>,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    tracing_url: Option<String>,
    #[serde(default)]
    examples: Option<ListField<Example>>,
    #[serde(default)]
    blending: Option<ListField<String>>,
    #[serde(default)]
    group_name: Option<String>,
    #[serde(default)]
    order_index: Option<i64>,
}

/// Decode a list field, applying one parse step to the string shape
fn decode_list<T: DeserializeOwned>(
    field: Option<ListField<T>>,
    name: &str,
) -> Result<Vec<T>, LessonError> {
    match field {
        None => Ok(Vec::new()),
        Some(ListField::List(items)) => Ok(items),
        Some(ListField::Encoded(text)) if text.trim().is_empty() => Ok(Vec::new()),
        Some(ListField::Encoded(text)) => serde_json::from_str(&text)
            .map_err(|e| LessonError::InvalidRecord(format!("{} is not a list: {}", name, e))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TryFrom<RawLessonRecord> for LessonRecord {
    type Error = LessonError;

    fn try_from(raw: RawLessonRecord) -> Result<Self, Self::Error> {
        let id = match raw.id {
            IdField::Number(n) => n.to_string(),
            IdField::Text(s) => s,
        };
        let video_urls = raw
            .video_urls
            .map(|urls| {
                urls.into_iter()
                    .filter(|u| !u.trim().is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|urls| !urls.is_empty());

        Ok(Self {
            label: raw.label.unwrap_or_else(|| raw.phoneme.clone()),
            id,
            phoneme: raw.phoneme,
            video_url: non_empty(raw.video_url),
            video_urls,
            audio_url: non_empty(raw.audio_url),
            tracing_url: non_empty(raw.tracing_url),
            examples: decode_list(raw.examples, "examples")?,
            blending: decode_list(raw.blending, "blending")?,
            group_name: raw.group_name,
            order_index: raw.order_index,
        })
    }
}

impl LessonRecord {
    /// Build a record from a JSON row
    pub fn from_json(value: serde_json::Value) -> Result<Self, LessonError> {
        serde_json::from_value(value).map_err(|e| LessonError::InvalidRecord(e.to_string()))
    }

    /// Video clips to show, in order
    ///
    /// More than one alternate replaces the primary clip. A single alternate
    /// is only used when there is no primary.
    pub fn video_clips(&self) -> Vec<&str> {
        match (&self.video_urls, &self.video_url) {
            (Some(alternates), _) if alternates.len() > 1 => {
                alternates.iter().map(String::as_str).collect()
            }
            (_, Some(primary)) => vec![primary.as_str()],
            (Some(alternates), None) => alternates.iter().map(String::as_str).collect(),
            (None, None) => Vec::new(),
        }
    }
}
