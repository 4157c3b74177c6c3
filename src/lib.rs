//! Lesson session engine for a phonics learning app
//!
//! Covers the stateful parts of a lesson screen: which earlier sounds to
//! recap, the strokes traced for each letter, and pronunciation playback that
//! prefers recorded samples and falls back to synthesized speech.

#![deny(clippy::all)]

pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod lesson;
pub mod phonics;
pub mod preferences;
pub mod session;
pub mod strokes;

pub use error::*;
