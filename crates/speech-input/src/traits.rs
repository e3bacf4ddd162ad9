use crate::{RecognizedSpeech, Result};

/// A blocking stream of recognized-text events.
pub trait SpeechSource {
    /// Block until the next event arrives.
    ///
    /// `Ok(None)` means the recognizer closed its output and no more events
    /// will follow.
    fn next_event(&mut self) -> Result<Option<RecognizedSpeech>>;

    /// Human readable backend name for logs.
    fn name(&self) -> &str {
        "speech-source"
    }
}

impl<S: SpeechSource + ?Sized> SpeechSource for Box<S> {
    fn next_event(&mut self) -> Result<Option<RecognizedSpeech>> {
        (**self).next_event()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
