//! The `tutorforge report` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use tutorforge_core::storage::LedgerStore;
use tutorforge_report::summary::StudentReport;

use crate::config::load_config_from;

pub fn execute(
    student: String,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = LedgerStore::new(&data_dir);

    let ledger = store
        .load(&student)
        .with_context(|| format!("cannot build a report for '{student}'"))?;

    let report = StudentReport::build(&ledger, &config.tutor);
    let path = store.report_path(&student);
    report.save_json(&path)?;

    println!("Student: {student}");
    println!("Questions answered: {}", report.overall.total_questions);
    println!("Correct: {}", report.overall.correct_answers);
    println!("Accuracy: {}", report.overall.accuracy);
    println!("Current difficulty: {}", report.overall.current_difficulty);

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &report.recommendations {
            println!("  - {rec}");
        }
    }

    println!("\nReport saved to: {}", path.display());

    Ok(())
}
