//! Per-student report artifact with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tutorforge_core::ledger::{PerformanceLedger, TopicStats};
use tutorforge_core::model::Difficulty;
use tutorforge_core::recommend::recommendations;
use tutorforge_core::storage::write_atomic;
use tutorforge_core::tutor::TutorConfig;

/// A point-in-time summary of one student's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReport {
    /// Unique report identifier.
    pub id: Uuid,
    pub student_id: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    pub overall: OverallPerformance,
    /// Full per-topic breakdown, copied from the ledger.
    pub topic_breakdown: BTreeMap<String, TopicStats>,
    pub recommendations: Vec<String>,
}

/// Headline numbers for a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallPerformance {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Accuracy formatted as a percentage, e.g. `"62.5%"`.
    pub accuracy: String,
    pub current_difficulty: Difficulty,
}

impl StudentReport {
    /// Builds a report from the ledger alone. The recommendation list is
    /// derived from the durable per-topic statistics, so it matches what
    /// any live session over the same ledger would compute.
    pub fn build(ledger: &PerformanceLedger, config: &TutorConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: ledger.student_id.clone(),
            generated_at: Utc::now(),
            overall: OverallPerformance {
                total_questions: ledger.total_answered,
                correct_answers: ledger.total_correct,
                accuracy: format!("{:.1}%", ledger.accuracy() * 100.0),
                current_difficulty: ledger.current_difficulty(),
            },
            topic_breakdown: ledger.topics.clone(),
            recommendations: recommendations(ledger, config),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        write_atomic(path, json.as_bytes())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorforge_core::model::Question;
    use tutorforge_core::storage::LedgerStore;
    use tutorforge_core::tutor::AdaptiveTutor;

    fn question(topic: &str) -> Question {
        Question {
            id: format!("{topic}-q"),
            text: format!("a {topic} question"),
            options: vec!["a".into(), "b".into()],
            answer: "a".into(),
            difficulty: Difficulty::MIN,
            topic: topic.into(),
        }
    }

    fn sample_ledger(dir: &std::path::Path) -> PerformanceLedger {
        let store = LedgerStore::new(dir);
        let mut tutor = AdaptiveTutor::open(store, "alice", TutorConfig::default()).unwrap();
        tutor.record_answer(&question("algebra"), false, 30);
        tutor.record_answer(&question("algebra"), false, 30);
        tutor.record_answer(&question("algebra"), true, 30);
        tutor.record_answer(&question("geometry"), true, 20);
        tutor.ledger().clone()
    }

    #[test]
    fn build_summarizes_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = sample_ledger(dir.path());
        let report = StudentReport::build(&ledger, &TutorConfig::default());

        assert_eq!(report.student_id, "alice");
        assert_eq!(report.overall.total_questions, 4);
        assert_eq!(report.overall.correct_answers, 2);
        assert_eq!(report.overall.accuracy, "50.0%");
        assert_eq!(report.overall.current_difficulty, Difficulty::MIN);
        assert_eq!(report.topic_breakdown.len(), 2);
        assert!(report.recommendations[0].starts_with("Focus on algebra"));
    }

    #[test]
    fn json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = sample_ledger(dir.path());
        let report = StudentReport::build(&ledger, &TutorConfig::default());

        let path = dir.path().join("report.json");
        report.save_json(&path).unwrap();

        let loaded = StudentReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.overall.accuracy, "50.0%");
        assert_eq!(loaded.topic_breakdown["algebra"].attempted, 3);
    }

    #[test]
    fn load_missing_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StudentReport::load_json(&dir.path().join("nope.json")).is_err());
    }
}
