//! Phoneme-level helpers: label normalization, curriculum sequencing and
//! letter decomposition
//!
//! Everything here is pure and table-driven.

mod curriculum;
mod letters;
mod normalize;

pub use curriculum::{position, recap_window, CURRICULUM, RECAP_WINDOW_LEN};
pub use letters::{tracing_letters, TracingKey};
pub use normalize::{normalize, resolve_asset_code};
