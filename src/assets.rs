//! Public media URLs for pronunciation samples and letter guides

use crate::config::MediaConfig;
use crate::error::{AudioError, MediaError};
use crate::phonics::{resolve_asset_code, TracingKey};
use url::Url;

/// Builds deterministic media URLs from the configured storage layout
#[derive(Debug, Clone)]
pub struct AssetResolver {
    public_base: Url,
    audio_subpath: String,
    audio_extension: String,
    tracing_subpath: String,
    tracing_extension: String,
}

impl AssetResolver {
    pub fn new(media: &MediaConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            public_base: Url::parse(&media.public_base)?,
            audio_subpath: media.audio_subpath.clone(),
            audio_extension: media.audio_extension.clone(),
            tracing_subpath: media.tracing_subpath.clone(),
            tracing_extension: media.tracing_extension.clone(),
        })
    }

    /// URL of the recorded pronunciation for `label`
    pub fn sample_url(&self, label: &str) -> Result<Url, AudioError> {
        let code = resolve_asset_code(label);
        if code.is_empty() {
            return Err(AudioError::MissingAsset(format!(
                "label {:?} has no asset code",
                label
            )));
        }
        self.file_url(&self.audio_subpath, &code, &self.audio_extension)
            .map_err(AudioError::from)
    }

    /// URL of the guide drawn under a tracing surface
    pub fn guide_url(&self, key: &TracingKey) -> Result<Url, MediaError> {
        self.file_url(&self.tracing_subpath, key.as_str(), &self.tracing_extension)
    }

    fn file_url(&self, subpath: &str, stem: &str, extension: &str) -> Result<Url, MediaError> {
        let mut url = self.public_base.clone();
        url.path_segments_mut()
            .map_err(|_| MediaError::UnsupportedBase(self.public_base.to_string()))?
            .pop_if_empty()
            .extend(subpath.split('/').filter(|s| !s.is_empty()))
            .push(&format!("{}.{}", stem, extension));
        Ok(url)
    }
}
