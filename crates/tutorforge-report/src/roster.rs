//! The cross-student summary roster.
//!
//! A flat CSV with one row per student. An update replaces the student's
//! existing row in place and appends otherwise; the whole file is
//! rewritten atomically on every upsert.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tutorforge_core::ledger::PerformanceLedger;
use tutorforge_core::storage::write_atomic;
use tutorforge_core::tutor::TutorConfig;

/// One roster row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
    pub student_id: String,
    pub updated_at: DateTime<Utc>,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub average_score: f64,
    pub current_difficulty: u8,
    /// Weak topic labels, JSON-encoded so the list survives the flat format.
    pub weak_topics: String,
}

impl RosterRow {
    /// Snapshot of a ledger as a roster row.
    pub fn from_ledger(ledger: &PerformanceLedger, config: &TutorConfig) -> Result<Self> {
        let weak: Vec<String> = ledger
            .weak_areas(config.weak_area_min_attempts, config.weak_area_accuracy)
            .into_iter()
            .map(|(topic, _)| topic)
            .collect();

        Ok(Self {
            student_id: ledger.student_id.clone(),
            updated_at: Utc::now(),
            total_questions: ledger.total_answered,
            correct_answers: ledger.total_correct,
            average_score: ledger.accuracy(),
            current_difficulty: ledger.current_difficulty().get(),
            weak_topics: serde_json::to_string(&weak).context("failed to encode weak topics")?,
        })
    }
}

/// Loads all roster rows, or an empty list if the roster does not exist yet.
pub fn load_roster(path: &Path) -> Result<Vec<RosterRow>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open roster {}", path.display()))?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("failed to parse roster {}", path.display()))
}

/// Replaces the row for this student, or appends one.
pub fn upsert_roster(path: &Path, row: RosterRow) -> Result<()> {
    let mut rows = load_roster(path)?;

    match rows.iter_mut().find(|r| r.student_id == row.student_id) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in &rows {
        writer
            .serialize(r)
            .with_context(|| format!("failed to encode roster row for '{}'", r.student_id))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush roster rows: {e}"))?;
    write_atomic(path, &bytes)
        .with_context(|| format!("failed to write roster {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(student: &str, total: u32) -> RosterRow {
        RosterRow {
            student_id: student.into(),
            updated_at: Utc::now(),
            total_questions: total,
            correct_answers: total / 2,
            average_score: 0.5,
            current_difficulty: 2,
            weak_topics: "[\"algebra\"]".into(),
        }
    }

    #[test]
    fn upsert_appends_new_students() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students_performance.csv");

        upsert_roster(&path, row("alice", 4)).unwrap();
        upsert_roster(&path, row("bob", 6)).unwrap();

        let rows = load_roster(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_id, "alice");
        assert_eq!(rows[1].student_id, "bob");
    }

    #[test]
    fn upsert_replaces_existing_row_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students_performance.csv");

        upsert_roster(&path, row("alice", 4)).unwrap();
        upsert_roster(&path, row("bob", 6)).unwrap();
        upsert_roster(&path, row("alice", 10)).unwrap();

        let rows = load_roster(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_id, "alice");
        assert_eq!(rows[0].total_questions, 10);
        assert_eq!(rows[1].student_id, "bob");
    }

    #[test]
    fn weak_topics_survive_the_flat_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students_performance.csv");

        upsert_roster(&path, row("alice", 4)).unwrap();
        let rows = load_roster(&path).unwrap();
        let topics: Vec<String> = serde_json::from_str(&rows[0].weak_topics).unwrap();
        assert_eq!(topics, vec!["algebra"]);
    }

    #[test]
    fn missing_roster_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows = load_roster(&dir.path().join("nope.csv")).unwrap();
        assert!(rows.is_empty());
    }
}
