//! The `tutorforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use tutorforge_core::bank::{validate_bank, QuestionBank};

pub fn execute(questions: PathBuf) -> Result<()> {
    let bank = QuestionBank::load_csv(&questions)?;

    println!(
        "Question bank: {} ({} questions, {} topics)",
        questions.display(),
        bank.len(),
        bank.topics().len()
    );

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
