use thiserror::Error;

pub type Result<T, E = SpeechError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source not supported in this build: {0}")]
    Unsupported(&'static str),
}
