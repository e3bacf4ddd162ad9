//! Outbound velocity channel backends.

use crate::types::VelocityCommand;
use crate::{ControlError, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Downstream consumer of velocity commands.
pub trait VelocitySink: Send {
    fn publish(&mut self, command: &VelocityCommand) -> Result<()>;
}

impl<S: VelocitySink + ?Sized> VelocitySink for Box<S> {
    fn publish(&mut self, command: &VelocityCommand) -> Result<()> {
        (**self).publish(command)
    }
}

/// Keeps every published command in memory. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<VelocityCommand>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<VelocityCommand> {
        self.log.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    pub fn last(&self) -> Option<VelocityCommand> {
        self.log.lock().last().copied()
    }
}

impl VelocitySink for RecordingSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<()> {
        self.log.lock().push(*command);
        Ok(())
    }
}

/// Forwards commands to an in-process receiver.
pub struct ChannelSink {
    tx: Sender<VelocityCommand>,
}

impl ChannelSink {
    pub fn new(tx: Sender<VelocityCommand>) -> Self {
        Self { tx }
    }
}

impl VelocitySink for ChannelSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<()> {
        self.tx
            .send(*command)
            .map_err(|_| ControlError::ChannelClosed)
    }
}

#[derive(Serialize)]
struct TopicMessage<'a> {
    topic: &'a str,
    #[serde(flatten)]
    command: &'a VelocityCommand,
}

/// Writes one JSON object per command, tagged with the output topic.
pub struct JsonLinesSink<W> {
    topic: String,
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(topic: impl Into<String>, writer: W) -> Self {
        Self {
            topic: topic.into(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> VelocitySink for JsonLinesSink<W> {
    fn publish(&mut self, command: &VelocityCommand) -> Result<()> {
        let msg = TopicMessage {
            topic: &self.topic,
            command,
        };
        serde_json::to_writer(&mut self.writer, &msg)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
