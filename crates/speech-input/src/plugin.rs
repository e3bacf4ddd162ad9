#[cfg(feature = "mock")]
use crate::ScriptedSpeech;
use crate::{LineSource, Result, SpeechSource};
use std::io::BufReader;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpeechSourceKind {
    /// Recognizer output piped in on stdin, one message per line.
    Stdin,
    /// Built-in scripted session.
    Mock,
}

pub fn new_speech_source(kind: SpeechSourceKind) -> Result<Box<dyn SpeechSource + Send>> {
    match kind {
        SpeechSourceKind::Stdin => Ok(Box::new(LineSource::new(BufReader::new(
            std::io::stdin(),
        )))),
        SpeechSourceKind::Mock => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(ScriptedSpeech::demo()))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(crate::SpeechError::Unsupported("mock feature not enabled"))
            }
        }
    }
}
