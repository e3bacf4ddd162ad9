//! voice-control: speech-driven velocity commands for a mobile base
//!
//! Recognized speech arrives at an irregular pace and is folded into a
//! persistent [`MotionIntent`] held by an [`IntentStore`]. A
//! [`CommandPublisher`] independently replays that intent as a
//! [`VelocityCommand`] at a fixed rate and sends a single zero command when
//! it shuts down.

mod types;
pub use types::{
    Angular, BaseLimits, Direction, Linear, MotionIntent, SpeedLevel, SpeedScale, VelocityCommand,
};

mod error;
pub use error::{ControlError, Result};

pub mod rules;
pub use rules::{Interpretation, PhraseRule, RuleSet};

mod store;
pub use store::IntentStore;

mod handler;
pub use handler::SpeechEventHandler;

mod config;
pub use config::VoiceControlConfig;

pub mod sink;
pub use sink::{ChannelSink, JsonLinesSink, RecordingSink, VelocitySink};

mod shutdown;
pub use shutdown::ShutdownSignal;

mod rate;
pub use rate::Rate;

mod publisher;
pub use publisher::{CommandPublisher, PublishStats, PublisherHandle, PublisherState};

use std::sync::Arc;
use tracing::info;

/// A running voice control core.
pub struct VoiceControl {
    pub store: Arc<IntentStore>,
    pub handler: Arc<SpeechEventHandler>,
    pub publisher: PublisherHandle,
}

impl VoiceControl {
    /// Validate `config`, build the store and start publishing into `sink`.
    pub fn start<S>(config: &VoiceControlConfig, sink: S) -> Result<Self>
    where
        S: VelocitySink + 'static,
    {
        info!("Initializing voice control");
        config.validate()?;

        let store = Arc::new(IntentStore::new(config.limits()));
        let handler = Arc::new(SpeechEventHandler::new(Arc::clone(&store)));
        let publisher = CommandPublisher::from_config(Arc::clone(&store), sink, config)?.spawn()?;

        info!(
            input = %config.input_topic,
            output = %config.output_topic,
            rate_hz = config.rate_hz,
            "Voice control initialized"
        );
        Ok(Self {
            store,
            handler,
            publisher,
        })
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.publisher.signal()
    }

    /// Stop the publisher; the base receives one last zero command.
    pub fn shutdown(self) -> Result<PublishStats> {
        info!("Voice control shutting down");
        self.publisher.shutdown()
    }
}
