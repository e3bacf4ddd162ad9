use thiserror::Error;

pub type Result<T, E = ControlError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("publish failed: {0}")]
    Publish(String),
    #[error("output channel closed")]
    ChannelClosed,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("speech source error: {0}")]
    Speech(#[from] speech_input::SpeechError),
    #[error("failed to spawn publisher thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("publisher thread panicked")]
    PublisherPanicked,
}
