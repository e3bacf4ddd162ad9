//! speech-input: recognized-text event sources
//!
//! A speech recognizer runs outside this workspace and hands us finished
//! text, one message at a time. This crate gives those messages a type and
//! a blocking source trait, with a line-oriented backend and a scripted mock.

mod types;
pub use types::RecognizedSpeech;

mod error;
pub use error::{Result, SpeechError};

mod traits;
pub use traits::SpeechSource;

mod lines;
pub use lines::LineSource;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::ScriptedSpeech;

pub mod plugin;
