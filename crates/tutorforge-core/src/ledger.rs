//! The durable per-student performance record.
//!
//! A [`PerformanceLedger`] accumulates everything that must survive a
//! restart: totals, per-topic statistics, the difficulty history, and the
//! append-only session log. Transient session state (streaks) lives in
//! [`crate::tutor::SessionState`] instead.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

/// Accumulated statistics for one topic. Counts only increase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicStats {
    pub attempted: u32,
    pub correct: u32,
    /// Running average of time spent per answer, in seconds.
    pub avg_time_secs: f64,
}

impl TopicStats {
    /// Derived accuracy, 0.0 when nothing has been attempted.
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempted)
        }
    }

    fn record(&mut self, correct: bool, time_spent_secs: u32) {
        self.attempted += 1;
        if correct {
            self.correct += 1;
        }
        let n = f64::from(self.attempted);
        self.avg_time_secs += (f64::from(time_spent_secs) - self.avg_time_secs) / n;
    }
}

/// One logged answer with its context and outcome. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub timestamp: DateTime<Utc>,
    pub question_id: String,
    pub topic: String,
    pub correct: bool,
    pub time_spent_secs: u32,
    /// Difficulty level in effect after this answer was folded in.
    pub difficulty: Difficulty,
}

/// The durable per-student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceLedger {
    pub student_id: String,
    pub created_at: DateTime<Utc>,
    pub total_answered: u32,
    pub total_correct: u32,
    pub average_score: f64,
    /// One entry appended per answered question, seeded with the starting
    /// level at creation.
    pub difficulty_history: Vec<Difficulty>,
    pub topics: BTreeMap<String, TopicStats>,
    pub events: Vec<SessionEvent>,
}

impl PerformanceLedger {
    /// A fresh record for a student who has never answered anything.
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            created_at: Utc::now(),
            total_answered: 0,
            total_correct: 0,
            average_score: 0.0,
            difficulty_history: vec![Difficulty::MIN],
            topics: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// The difficulty recorded by the most recent answer (the starting
    /// level for a fresh record).
    pub fn current_difficulty(&self) -> Difficulty {
        self.difficulty_history
            .last()
            .copied()
            .unwrap_or(Difficulty::MIN)
    }

    /// Overall accuracy, 0.0 when nothing has been answered.
    pub fn accuracy(&self) -> f64 {
        if self.total_answered == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_answered)
        }
    }

    /// Folds one answer into the totals and per-topic statistics.
    pub(crate) fn note_answer(&mut self, topic: &str, correct: bool, time_spent_secs: u32) {
        self.total_answered += 1;
        if correct {
            self.total_correct += 1;
        }
        self.average_score = self.accuracy();
        self.topics
            .entry(topic.to_string())
            .or_default()
            .record(correct, time_spent_secs);
    }

    pub(crate) fn push_difficulty(&mut self, level: Difficulty) {
        self.difficulty_history.push(level);
    }

    pub(crate) fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Topics below `threshold` accuracy after at least `min_attempts`
    /// answers, weakest first.
    ///
    /// This is derived from the per-topic statistics on every call, so a
    /// topic that recovers above the threshold drops out again.
    pub fn weak_areas(&self, min_attempts: u32, threshold: f64) -> Vec<(String, f64)> {
        let mut flagged: Vec<(String, f64)> = self
            .topics
            .iter()
            .filter(|(_, stats)| stats.attempted >= min_attempts && stats.accuracy() < threshold)
            .map(|(topic, stats)| (topic.clone(), stats.accuracy()))
            .collect();
        flagged.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ledger_defaults() {
        let ledger = PerformanceLedger::new("alice");
        assert_eq!(ledger.student_id, "alice");
        assert_eq!(ledger.total_answered, 0);
        assert_eq!(ledger.accuracy(), 0.0);
        assert_eq!(ledger.current_difficulty(), Difficulty::MIN);
        assert_eq!(ledger.difficulty_history.len(), 1);
    }

    #[test]
    fn totals_match_topic_sums() {
        let mut ledger = PerformanceLedger::new("alice");
        ledger.note_answer("algebra", true, 20);
        ledger.note_answer("algebra", false, 40);
        ledger.note_answer("geometry", true, 30);

        assert_eq!(ledger.total_answered, 3);
        assert_eq!(ledger.total_correct, 2);

        let attempted: u32 = ledger.topics.values().map(|s| s.attempted).sum();
        let correct: u32 = ledger.topics.values().map(|s| s.correct).sum();
        assert_eq!(attempted, ledger.total_answered);
        assert_eq!(correct, ledger.total_correct);
        assert!((ledger.average_score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn running_average_time() {
        let mut stats = TopicStats::default();
        stats.record(true, 10);
        stats.record(false, 20);
        stats.record(true, 30);
        assert!((stats.avg_time_secs - 20.0).abs() < 1e-9);
        assert!(stats.attempted >= stats.correct);
    }

    #[test]
    fn weak_area_flags_low_accuracy_after_three_attempts() {
        let mut ledger = PerformanceLedger::new("alice");
        ledger.note_answer("algebra", false, 30);
        ledger.note_answer("algebra", false, 30);
        assert!(ledger.weak_areas(3, 0.6).is_empty(), "two attempts is not enough");

        ledger.note_answer("algebra", true, 30);
        let weak = ledger.weak_areas(3, 0.6);
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].0, "algebra");
        assert!((weak[0].1 - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn weak_area_recovery_drops_out() {
        let mut ledger = PerformanceLedger::new("alice");
        ledger.note_answer("algebra", false, 30);
        ledger.note_answer("algebra", false, 30);
        ledger.note_answer("algebra", true, 30);
        assert_eq!(ledger.weak_areas(3, 0.6).len(), 1);

        // Enough correct answers push accuracy back over the threshold.
        for _ in 0..4 {
            ledger.note_answer("algebra", true, 30);
        }
        assert!(ledger.weak_areas(3, 0.6).is_empty());
    }

    #[test]
    fn weak_areas_sorted_ascending() {
        let mut ledger = PerformanceLedger::new("alice");
        for _ in 0..4 {
            ledger.note_answer("geometry", false, 30);
        }
        ledger.note_answer("algebra", false, 30);
        ledger.note_answer("algebra", false, 30);
        ledger.note_answer("algebra", true, 30);

        let weak = ledger.weak_areas(3, 0.6);
        assert_eq!(weak.len(), 2);
        assert_eq!(weak[0].0, "geometry");
        assert_eq!(weak[1].0, "algebra");
    }

    #[test]
    fn json_roundtrip() {
        let mut ledger = PerformanceLedger::new("alice");
        ledger.note_answer("algebra", true, 25);
        ledger.push_difficulty(Difficulty::new(2).unwrap());
        ledger.push_event(SessionEvent {
            timestamp: Utc::now(),
            question_id: "alg-1".into(),
            topic: "algebra".into(),
            correct: true,
            time_spent_secs: 25,
            difficulty: Difficulty::new(2).unwrap(),
        });

        let json = serde_json::to_string_pretty(&ledger).unwrap();
        let back: PerformanceLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_answered, 1);
        assert_eq!(back.difficulty_history, ledger.difficulty_history);
        assert_eq!(back.events.len(), 1);
        assert_eq!(back.topics["algebra"].attempted, 1);
    }
}
