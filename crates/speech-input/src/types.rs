use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One message from the recognizer output channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpeech {
    pub text: String,
    #[serde(default)]
    pub ts: Option<OffsetDateTime>,
}

impl RecognizedSpeech {
    /// Stamp `text` with the current UTC time.
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ts: Some(OffsetDateTime::now_utc()),
        }
    }
}
