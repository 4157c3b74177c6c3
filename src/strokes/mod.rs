//! Letter-tracing session store
//!
//! Owns the strokes for every letter on screen. The inline tracing row and the
//! expanded single-letter view are two surfaces attached to the same key, so
//! they always read and write the same [`TracingState`].

mod surface;

pub use surface::{DrawingSurface, SurfaceConfig, ViewSlot};

use crate::phonics::TracingKey;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Default ink for traced strokes
pub const DEFAULT_STROKE_COLOR: &str = "#1E88E5";

/// Strokes traced for one letter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingState {
    /// Finished strokes, oldest first
    pub completed_paths: Vec<String>,
    /// Stroke currently being drawn (empty when none)
    pub current_path: String,
}

impl TracingState {
    pub fn is_empty(&self) -> bool {
        self.completed_paths.is_empty() && self.current_path.is_empty()
    }
}

struct AttachedSurface {
    guide_path: String,
    surface: Box<dyn DrawingSurface>,
}

/// Keyed store of per-letter tracing state
pub struct StrokeStore {
    states: BTreeMap<TracingKey, TracingState>,
    surfaces: HashMap<(TracingKey, ViewSlot), AttachedSurface>,
    stroke_color: String,
}

impl StrokeStore {
    pub fn new(stroke_color: impl Into<String>) -> Self {
        Self {
            states: BTreeMap::new(),
            surfaces: HashMap::new(),
            stroke_color: stroke_color.into(),
        }
    }

    /// Create empty state for `key` if none exists
    pub fn initialize(&mut self, key: &TracingKey) {
        self.states.entry(key.clone()).or_default();
    }

    /// Replace the finished strokes for `key`
    pub fn record_completed_paths(&mut self, key: &TracingKey, paths: Vec<String>) {
        self.states.entry(key.clone()).or_default().completed_paths = paths;
    }

    /// Replace the in-progress stroke for `key`
    pub fn record_current_path(&mut self, key: &TracingKey, path: impl Into<String>) {
        self.states.entry(key.clone()).or_default().current_path = path.into();
    }

    /// Empty `key`'s strokes and wipe every surface showing it
    pub fn clear(&mut self, key: &TracingKey) {
        if let Some(state) = self.states.get_mut(key) {
            state.completed_paths.clear();
            state.current_path.clear();
        }
        for ((surface_key, _), attached) in self.surfaces.iter_mut() {
            if surface_key == key {
                attached.surface.clear();
            }
        }
        debug!(key = %key, "Cleared tracing state");
    }

    /// Clear every tracked key
    pub fn clear_all(&mut self) {
        let keys: Vec<TracingKey> = self.states.keys().cloned().collect();
        for key in &keys {
            self.clear(key);
        }
    }

    /// Drop all state and detach all surfaces
    pub fn reset(&mut self) {
        self.states.clear();
        self.surfaces.clear();
    }

    pub fn state(&self, key: &TracingKey) -> Option<&TracingState> {
        self.states.get(key)
    }

    /// Tracked keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &TracingKey> {
        self.states.keys()
    }

    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    /// What a surface for `key` should currently render
    pub fn surface_config(&self, key: &TracingKey, guide_path: &str) -> SurfaceConfig {
        let state = self.states.get(key).cloned().unwrap_or_default();
        SurfaceConfig {
            guide_path: guide_path.to_string(),
            stroke_color: self.stroke_color.clone(),
            completed_paths: state.completed_paths,
            current_path: state.current_path,
        }
    }

    /// Attach a surface for `key` in `slot`, loading it with the stored strokes
    ///
    /// Replaces any surface already attached to the same key and slot.
    pub fn attach_surface(
        &mut self,
        key: &TracingKey,
        slot: ViewSlot,
        guide_path: impl Into<String>,
        mut surface: Box<dyn DrawingSurface>,
    ) {
        self.initialize(key);
        let guide_path = guide_path.into();
        surface.load(&self.surface_config(key, &guide_path));
        self.surfaces
            .insert((key.clone(), slot), AttachedSurface { guide_path, surface });
    }

    /// Detach the surface in `slot` and resync the other views of `key`
    pub fn detach_surface(&mut self, key: &TracingKey, slot: ViewSlot) -> bool {
        if self.surfaces.remove(&(key.clone(), slot)).is_none() {
            return false;
        }
        let state = self.states.get(key).cloned().unwrap_or_default();
        for ((surface_key, _), attached) in self.surfaces.iter_mut() {
            if surface_key == key {
                attached.surface.load(&SurfaceConfig {
                    guide_path: attached.guide_path.clone(),
                    stroke_color: self.stroke_color.clone(),
                    completed_paths: state.completed_paths.clone(),
                    current_path: state.current_path.clone(),
                });
            }
        }
        true
    }

    pub fn has_surface(&self, key: &TracingKey, slot: ViewSlot) -> bool {
        self.surfaces.contains_key(&(key.clone(), slot))
    }
}

impl Default for StrokeStore {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct SurfaceLog {
        clears: usize,
        loads: Vec<SurfaceConfig>,
    }

    struct RecordingSurface(Arc<Mutex<SurfaceLog>>);

    impl DrawingSurface for RecordingSurface {
        fn load(&mut self, config: &SurfaceConfig) {
            self.0.lock().unwrap().loads.push(config.clone());
        }

        fn clear(&mut self) {
            self.0.lock().unwrap().clears += 1;
        }
    }

    fn surface() -> (Box<dyn DrawingSurface>, Arc<Mutex<SurfaceLog>>) {
        let log = Arc::new(Mutex::new(SurfaceLog::default()));
        (Box::new(RecordingSurface(log.clone())), log)
    }

    fn key(letter: &str) -> TracingKey {
        TracingKey::new(letter)
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut store = StrokeStore::default();
        store.initialize(&key("S"));
        store.record_current_path(&key("S"), "M0 0 L1 1");
        store.initialize(&key("S"));
        assert_eq!(store.state(&key("S")).unwrap().current_path, "M0 0 L1 1");
        assert_eq!(store.keys().count(), 1);
    }

    #[test]
    fn test_record_replaces_paths() {
        let mut store = StrokeStore::default();
        store.initialize(&key("S"));
        store.record_completed_paths(&key("S"), paths(&["a", "b"]));
        store.record_completed_paths(&key("S"), paths(&["c"]));
        store.record_current_path(&key("S"), "d");
        let state = store.state(&key("S")).unwrap();
        assert_eq!(state.completed_paths, paths(&["c"]));
        assert_eq!(state.current_path, "d");
    }

    #[test]
    fn test_clear_only_affects_one_key() {
        let mut store = StrokeStore::default();
        store.record_completed_paths(&key("S"), paths(&["a"]));
        store.record_current_path(&key("S"), "b");
        store.record_completed_paths(&key("H"), paths(&["c"]));
        store.record_current_path(&key("H"), "d");

        store.clear(&key("S"));

        assert!(store.state(&key("S")).unwrap().is_empty());
        let other = store.state(&key("H")).unwrap();
        assert_eq!(other.completed_paths, paths(&["c"]));
        assert_eq!(other.current_path, "d");
    }

    #[test]
    fn test_clear_wipes_attached_surfaces_for_key_only() {
        let mut store = StrokeStore::default();
        let (inline_s, inline_s_log) = surface();
        let (expanded_s, expanded_s_log) = surface();
        let (inline_h, inline_h_log) = surface();
        store.attach_surface(&key("S"), ViewSlot::Inline, "guide-s", inline_s);
        store.attach_surface(&key("S"), ViewSlot::Expanded, "guide-s", expanded_s);
        store.attach_surface(&key("H"), ViewSlot::Inline, "guide-h", inline_h);

        store.clear(&key("S"));

        assert_eq!(inline_s_log.lock().unwrap().clears, 1);
        assert_eq!(expanded_s_log.lock().unwrap().clears, 1);
        assert_eq!(inline_h_log.lock().unwrap().clears, 0);
    }

    #[test]
    fn test_clear_all_matches_clearing_each_key() {
        let mut store = StrokeStore::default();
        let (inline_s, inline_s_log) = surface();
        let (inline_h, inline_h_log) = surface();
        store.attach_surface(&key("S"), ViewSlot::Inline, "guide-s", inline_s);
        store.attach_surface(&key("H"), ViewSlot::Inline, "guide-h", inline_h);
        store.record_completed_paths(&key("S"), paths(&["a"]));
        store.record_current_path(&key("H"), "b");

        store.clear_all();

        assert!(store.keys().all(|k| store.state(k).unwrap().is_empty()));
        assert_eq!(store.keys().count(), 2);
        assert_eq!(inline_s_log.lock().unwrap().clears, 1);
        assert_eq!(inline_h_log.lock().unwrap().clears, 1);
    }

    #[test]
    fn test_expanded_view_sees_inline_strokes() {
        let mut store = StrokeStore::new("#000000");
        let (inline, _) = surface();
        store.attach_surface(&key("S"), ViewSlot::Inline, "guide-s", inline);
        store.record_completed_paths(&key("S"), paths(&["stroke-1"]));
        store.record_current_path(&key("S"), "stroke-2");

        let (expanded, expanded_log) = surface();
        store.attach_surface(&key("S"), ViewSlot::Expanded, "guide-s", expanded);

        let log = expanded_log.lock().unwrap();
        let loaded = log.loads.last().unwrap();
        assert_eq!(loaded.completed_paths, paths(&["stroke-1"]));
        assert_eq!(loaded.current_path, "stroke-2");
        assert_eq!(loaded.guide_path, "guide-s");
        assert_eq!(loaded.stroke_color, "#000000");
    }

    #[test]
    fn test_detaching_expanded_resyncs_inline() {
        let mut store = StrokeStore::default();
        let (inline, inline_log) = surface();
        let (expanded, _) = surface();
        store.attach_surface(&key("S"), ViewSlot::Inline, "guide-s", inline);
        store.attach_surface(&key("S"), ViewSlot::Expanded, "guide-s", expanded);

        // Strokes drawn in the modal
        store.record_completed_paths(&key("S"), paths(&["big-stroke"]));
        assert!(store.detach_surface(&key("S"), ViewSlot::Expanded));

        let log = inline_log.lock().unwrap();
        assert_eq!(log.loads.len(), 2);
        assert_eq!(log.loads[1].completed_paths, paths(&["big-stroke"]));
        assert_eq!(store.state(&key("S")).unwrap().completed_paths, paths(&["big-stroke"]));
        assert!(!store.has_surface(&key("S"), ViewSlot::Expanded));
    }

    #[test]
    fn test_detach_unknown_surface() {
        let mut store = StrokeStore::default();
        assert!(!store.detach_surface(&key("S"), ViewSlot::Expanded));
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut store = StrokeStore::default();
        let (inline, _) = surface();
        store.attach_surface(&key("S"), ViewSlot::Inline, "guide-s", inline);
        store.record_current_path(&key("S"), "a");
        store.reset();
        assert_eq!(store.keys().count(), 0);
        assert!(!store.has_surface(&key("S"), ViewSlot::Inline));
    }
}
