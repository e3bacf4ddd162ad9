//! Phrase rules that turn recognized text into intent changes.
//!
//! Each category (speed, direction) is an ordered list of rules. Rules are
//! tried top-down and the first one whose phrase occurs in the text decides
//! the category; later rules are not consulted. Categories never affect one
//! another. Matching is a case-sensitive substring search.

use crate::types::{Direction, SpeedLevel};
use serde::{Deserialize, Serialize};

/// A set of trigger phrases bound to one effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseRule<E> {
    phrases: Vec<String>,
    effect: E,
}

impl<E: Copy> PhraseRule<E> {
    /// Empty phrases are dropped since they would match any text.
    pub fn new<I, T>(phrases: I, effect: E) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
            effect,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.phrases.iter().any(|p| text.contains(p.as_str()))
    }

    pub fn effect(&self) -> E {
        self.effect
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

fn first_match<E: Copy>(rules: &[PhraseRule<E>], text: &str) -> Option<E> {
    rules.iter().find(|r| r.matches(text)).map(PhraseRule::effect)
}

/// What a single utterance asks for. `None` leaves that part of the intent alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interpretation {
    pub speed: Option<SpeedLevel>,
    pub direction: Option<Direction>,
}

impl Interpretation {
    pub fn is_noop(&self) -> bool {
        self.speed.is_none() && self.direction.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    speed: Vec<PhraseRule<SpeedLevel>>,
    direction: Vec<PhraseRule<Direction>>,
}

impl RuleSet {
    pub fn new(speed: Vec<PhraseRule<SpeedLevel>>, direction: Vec<PhraseRule<Direction>>) -> Self {
        Self { speed, direction }
    }

    /// The stock vocabulary for driving the base.
    pub fn standard() -> Self {
        Self::new(
            vec![
                PhraseRule::new(["full speed"], SpeedLevel::Full),
                PhraseRule::new(["half speed"], SpeedLevel::Half),
            ],
            vec![
                PhraseRule::new(["move forward"], Direction::FORWARD),
                PhraseRule::new(["move backward"], Direction::BACKWARD),
                PhraseRule::new(["move left"], Direction::LEFT),
                PhraseRule::new(["move right"], Direction::RIGHT),
                PhraseRule::new(["stop", "halt"], Direction::STOP),
            ],
        )
    }

    /// Append a speed rule with the lowest priority.
    pub fn push_speed_rule(&mut self, rule: PhraseRule<SpeedLevel>) {
        self.speed.push(rule);
    }

    /// Append a direction rule with the lowest priority.
    pub fn push_direction_rule(&mut self, rule: PhraseRule<Direction>) {
        self.direction.push(rule);
    }

    pub fn speed_rules(&self) -> &[PhraseRule<SpeedLevel>] {
        &self.speed
    }

    pub fn direction_rules(&self) -> &[PhraseRule<Direction>] {
        &self.direction
    }

    pub fn interpret(&self, text: &str) -> Interpretation {
        Interpretation {
            speed: first_match(&self.speed, text),
            direction: first_match(&self.direction, text),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
