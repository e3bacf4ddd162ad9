use crate::rules::{Interpretation, RuleSet};
use crate::types::{BaseLimits, MotionIntent};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Single source of truth for the current motion intent.
///
/// Speed and direction live behind one lock so readers always see a pair
/// produced by the same update.
pub struct IntentStore {
    limits: BaseLimits,
    rules: RuleSet,
    intent: Mutex<MotionIntent>,
}

impl IntentStore {
    pub fn new(limits: BaseLimits) -> Self {
        Self::with_rules(limits, RuleSet::standard())
    }

    pub fn with_rules(limits: BaseLimits, rules: RuleSet) -> Self {
        Self {
            limits,
            rules,
            intent: Mutex::new(MotionIntent::at_rest(&limits)),
        }
    }

    /// Apply one recognized utterance. Unrecognized text leaves the intent as is.
    pub fn apply_speech_token(&self, text: &str) -> Interpretation {
        info!("{}", text);

        // Rule evaluation only depends on the text, so it stays outside the lock.
        let interpretation = self.rules.interpret(text);
        if interpretation.is_noop() {
            return interpretation;
        }

        let updated = {
            let mut intent = self.intent.lock();
            if let Some(level) = interpretation.speed {
                intent.speed = level.scale(&self.limits);
            }
            if let Some(direction) = interpretation.direction {
                intent.direction = direction;
            }
            *intent
        };
        debug!(
            speed = ?interpretation.speed,
            direction = ?interpretation.direction,
            intent = ?updated,
            "motion intent updated"
        );
        interpretation
    }

    pub fn snapshot(&self) -> MotionIntent {
        *self.intent.lock()
    }

    pub fn limits(&self) -> &BaseLimits {
        &self.limits
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, SpeedLevel};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn store() -> IntentStore {
        IntentStore::new(BaseLimits::default())
    }

    #[test]
    fn starts_at_rest_with_full_scale() {
        let s = store();
        let snap = s.snapshot();
        assert_eq!(snap.speed, s.limits().full());
        assert_eq!(snap.direction, Direction::STOP);
    }

    #[test]
    fn unrecognized_text_leaves_intent_unchanged() {
        let s = store();
        s.apply_speech_token("half speed move left");
        let before = s.snapshot();
        for text in ["", "hello there", "Move Forward", "go faster", "turn around"] {
            let got = s.apply_speech_token(text);
            assert!(got.is_noop());
            assert_eq!(s.snapshot(), before, "{text}");
        }
    }

    #[test]
    fn full_and_half_together_acts_like_full() {
        let both = store();
        both.apply_speech_token("half speed");
        both.apply_speech_token("half speed then full speed");

        let alone = store();
        alone.apply_speech_token("half speed");
        alone.apply_speech_token("full speed");

        assert_eq!(both.snapshot(), alone.snapshot());
        assert_eq!(both.snapshot().speed, both.limits().full());
    }

    #[test]
    fn forward_and_stop_together_acts_like_forward() {
        let both = store();
        both.apply_speech_token("stop and move forward");
        let alone = store();
        alone.apply_speech_token("move forward");
        assert_eq!(both.snapshot(), alone.snapshot());
        assert_eq!(both.snapshot().direction, Direction::FORWARD);
    }

    #[test]
    fn speed_only_keeps_direction_and_vice_versa() {
        let s = store();
        s.apply_speech_token("move backward");
        s.apply_speech_token("half speed");
        let snap = s.snapshot();
        assert_eq!(snap.direction, Direction::BACKWARD);
        assert_eq!(snap.speed, s.limits().half());

        s.apply_speech_token("move right");
        assert_eq!(s.snapshot().speed, s.limits().half());
        assert_eq!(s.snapshot().command().linear.y, -0.1);

        s.apply_speech_token("halt");
        assert!(s.snapshot().command().is_zero());
        assert_eq!(s.snapshot().speed, s.limits().half());
    }

    #[test]
    fn apply_reports_what_it_matched() {
        let s = store();
        let got = s.apply_speech_token("full speed move left");
        assert_eq!(got.speed, Some(SpeedLevel::Full));
        assert_eq!(got.direction, Some(Direction::LEFT));
    }

    #[test]
    fn concurrent_readers_never_see_a_torn_update() {
        let s = Arc::new(store());
        let limits = *s.limits();
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let s = Arc::clone(&s);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for i in 0..5_000 {
                    if i % 2 == 0 {
                        s.apply_speech_token("full speed move forward");
                    } else {
                        s.apply_speech_token("half speed move left");
                    }
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let mut observed = 0u64;
        loop {
            let finished = done.load(Ordering::SeqCst);
            let snap = s.snapshot();
            let initial = snap.speed == limits.full() && snap.direction == Direction::STOP;
            let fast_forward = snap.speed == limits.full() && snap.direction == Direction::FORWARD;
            let slow_left = snap.speed == limits.half() && snap.direction == Direction::LEFT;
            assert!(initial || fast_forward || slow_left, "torn snapshot: {snap:?}");
            observed += 1;
            if finished {
                break;
            }
        }
        assert!(writer.join().is_ok());
        assert!(observed > 0);
        assert_eq!(s.snapshot().direction, Direction::LEFT);
    }
}
