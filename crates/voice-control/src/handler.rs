use crate::rules::Interpretation;
use crate::store::IntentStore;
use crate::Result;
use speech_input::{RecognizedSpeech, SpeechSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Feeds recognizer output into the shared [`IntentStore`].
pub struct SpeechEventHandler {
    store: Arc<IntentStore>,
    handled: AtomicU64,
}

impl SpeechEventHandler {
    pub fn new(store: Arc<IntentStore>) -> Self {
        Self {
            store,
            handled: AtomicU64::new(0),
        }
    }

    pub fn on_speech(&self, event: &RecognizedSpeech) -> Interpretation {
        self.handled.fetch_add(1, Ordering::Relaxed);
        self.store.apply_speech_token(&event.text)
    }

    /// Drain `source` until it reports the end of its stream.
    ///
    /// Returns how many events were handled by this call.
    pub fn pump<S: SpeechSource + ?Sized>(&self, source: &mut S) -> Result<u64> {
        let mut count = 0u64;
        while let Some(event) = source.next_event()? {
            self.on_speech(&event);
            count += 1;
        }
        info!(source = source.name(), events = count, "speech source ended");
        Ok(count)
    }

    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BaseLimits, Direction};
    use speech_input::ScriptedSpeech;

    #[test]
    fn pump_applies_every_event_in_order() -> Result<()> {
        let store = Arc::new(IntentStore::new(BaseLimits::default()));
        let handler = SpeechEventHandler::new(Arc::clone(&store));
        let mut source = ScriptedSpeech::new(["move forward", "what a nice day", "half speed"]);

        assert_eq!(handler.pump(&mut source)?, 3);
        assert_eq!(handler.handled(), 3);

        let snap = store.snapshot();
        assert_eq!(snap.direction, Direction::FORWARD);
        assert_eq!(snap.command().linear.x, 0.1);
        Ok(())
    }

    #[test]
    fn on_speech_uses_raw_text() {
        let store = Arc::new(IntentStore::new(BaseLimits::default()));
        let handler = SpeechEventHandler::new(Arc::clone(&store));
        let got = handler.on_speech(&RecognizedSpeech::now("MOVE LEFT"));
        assert!(got.is_noop());
        let got = handler.on_speech(&RecognizedSpeech::now("move left"));
        assert_eq!(got.direction, Some(Direction::LEFT));
        assert_eq!(handler.handled(), 2);
    }
}
