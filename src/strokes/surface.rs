//! Drawing surface capability

use serde::Serialize;

/// Which on-screen view a surface belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ViewSlot {
    /// Small tracing pad in the letter row
    Inline,
    /// Full-screen modal for a single letter
    Expanded,
}

/// Everything a surface needs to render a letter's current strokes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceConfig {
    /// Guide path drawn underneath for visual reference
    pub guide_path: String,
    pub stroke_color: String,
    pub completed_paths: Vec<String>,
    pub current_path: String,
}

/// Primitive that turns pointer motion into path data
///
/// Path updates flow back through [`super::StrokeStore::record_completed_paths`]
/// and [`super::StrokeStore::record_current_path`].
pub trait DrawingSurface: Send {
    /// Replace whatever is rendered with `config`
    fn load(&mut self, config: &SurfaceConfig);

    /// Discard all rendered strokes
    fn clear(&mut self);
}
