use crate::{RecognizedSpeech, Result, SpeechSource};
use std::collections::VecDeque;
use std::time::Duration;

/// Replays a fixed list of utterances, optionally pausing between them.
pub struct ScriptedSpeech {
    script: VecDeque<String>,
    gap: Duration,
}

impl ScriptedSpeech {
    pub fn new<I, T>(utterances: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            script: utterances.into_iter().map(Into::into).collect(),
            gap: Duration::ZERO,
        }
    }

    /// Sleep `gap` before every utterance after the first.
    pub fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }

    /// A short demo session that walks the base through each direction.
    pub fn demo() -> Self {
        Self::new([
            "robot move forward",
            "half speed please",
            "now move left",
            "full speed move backward",
            "move right",
            "halt",
        ])
        .with_gap(Duration::from_secs(2))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SpeechSource for ScriptedSpeech {
    fn next_event(&mut self) -> Result<Option<RecognizedSpeech>> {
        let Some(text) = self.script.pop_front() else {
            return Ok(None);
        };
        if !self.gap.is_zero() {
            std::thread::sleep(self.gap);
        }
        Ok(Some(RecognizedSpeech::now(text)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
