//! Core data model types for tutorforge.
//!
//! These are the fundamental types the entire tutorforge system uses to
//! represent questions and difficulty levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A question difficulty level on the 1-5 scale.
///
/// Construction is validated and the step operations saturate at the
/// bounds, so a value outside `[1, 5]` cannot be produced by the
/// adjustment logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    /// The easiest level.
    pub const MIN: Difficulty = Difficulty(1);
    /// The hardest level.
    pub const MAX: Difficulty = Difficulty(5);
    /// Every level, easiest first.
    pub const ALL: [Difficulty; 5] = [
        Difficulty(1),
        Difficulty(2),
        Difficulty(3),
        Difficulty(4),
        Difficulty(5),
    ];

    /// Creates a level, rejecting values outside `[1, 5]`.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&level)
            .then_some(Difficulty(level))
    }

    /// The raw level as an integer.
    pub fn get(self) -> u8 {
        self.0
    }

    /// One level harder, capped at [`Difficulty::MAX`].
    pub fn step_up(self) -> Self {
        Difficulty((self.0 + 1).min(Self::MAX.0))
    }

    /// One level easier, floored at [`Difficulty::MIN`].
    pub fn step_down(self) -> Self {
        Difficulty((self.0.saturating_sub(1)).max(Self::MIN.0))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level).ok_or_else(|| format!("difficulty must be between 1 and 5, got {level}"))
    }
}

/// A single quiz question.
///
/// Questions are immutable once loaded; the tutor never writes back to
/// the source they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// The question text shown to the student.
    pub text: String,
    /// Answer options, in presentation order.
    pub options: Vec<String>,
    /// The correct option, verbatim.
    pub answer: String,
    /// Level used for pool selection.
    pub difficulty: Difficulty,
    /// Topic label used for per-topic statistics.
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_rejects_out_of_range() {
        assert!(Difficulty::new(0).is_none());
        assert!(Difficulty::new(6).is_none());
        assert_eq!(Difficulty::new(1), Some(Difficulty::MIN));
        assert_eq!(Difficulty::new(5), Some(Difficulty::MAX));
    }

    #[test]
    fn difficulty_steps_saturate() {
        assert_eq!(Difficulty::MAX.step_up(), Difficulty::MAX);
        assert_eq!(Difficulty::MIN.step_down(), Difficulty::MIN);
        let three = Difficulty::new(3).unwrap();
        assert_eq!(three.step_up().get(), 4);
        assert_eq!(three.step_down().get(), 2);
    }

    #[test]
    fn difficulty_serializes_as_integer() {
        let json = serde_json::to_string(&Difficulty::new(3).unwrap()).unwrap();
        assert_eq!(json, "3");
        let back: Difficulty = serde_json::from_str("3").unwrap();
        assert_eq!(back.get(), 3);
        assert!(serde_json::from_str::<Difficulty>("9").is_err());
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = Question {
            id: "alg-001".into(),
            text: "What is 2 + 2?".into(),
            options: vec!["3".into(), "4".into(), "5".into()],
            answer: "4".into(),
            difficulty: Difficulty::MIN,
            topic: "algebra".into(),
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "alg-001");
        assert_eq!(back.difficulty, Difficulty::MIN);
        assert_eq!(back.options.len(), 3);
    }
}
