//! The `tutorforge run` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tutorforge_core::bank::QuestionBank;
use tutorforge_core::ledger::PerformanceLedger;
use tutorforge_core::recommend::recommendations;
use tutorforge_core::storage::LedgerStore;
use tutorforge_core::tutor::AdaptiveTutor;
use tutorforge_report::roster::{upsert_roster, RosterRow};
use tutorforge_report::summary::StudentReport;

use crate::config::load_config_from;

pub fn execute(
    questions: Option<PathBuf>,
    student: String,
    count: Option<usize>,
    topic: Option<String>,
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let questions_path = questions.unwrap_or_else(|| config.questions.clone());
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    let count = count.unwrap_or(config.question_count);
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let bank = QuestionBank::load_csv(&questions_path)
        .with_context(|| format!("failed to load question bank {}", questions_path.display()))?;
    anyhow::ensure!(
        !bank.is_empty(),
        "question bank {} contains no usable questions",
        questions_path.display()
    );
    tracing::debug!("loaded {} questions from {}", bank.len(), questions_path.display());

    let store = LedgerStore::new(&data_dir);
    let mut tutor = AdaptiveTutor::open(store.clone(), &student, config.tutor.clone())?;

    println!("Welcome, {student}!");
    println!("Current difficulty level: {}", tutor.difficulty());
    println!(
        "Overall accuracy: {:.1}%",
        tutor.ledger().accuracy() * 100.0
    );
    println!();

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    // The batch is drawn once at the session's starting difficulty;
    // adjustments during the batch only steer the next session.
    let batch = bank.sample(tutor.difficulty(), topic.as_deref(), count, &mut rng);
    if batch.is_empty() {
        println!(
            "No questions available at difficulty {}.",
            tutor.difficulty()
        );
        return Ok(());
    }

    for (i, question) in batch.iter().enumerate() {
        println!("Question {}: {}", i + 1, question.text);
        println!("  Options: {}", question.options.join(" | "));
        println!("  Topic: {}", question.topic);

        // Simulated answer; a real frontend would collect these.
        let correct = rng.gen_bool(0.5);
        let time_spent = rng.gen_range(10..=60);

        println!("  {}", if correct { "Correct!" } else { "Incorrect" });
        let next = tutor.record_answer(question, correct, time_spent);
        println!("  Difficulty for next question: {next}");
        println!();
    }

    let row = RosterRow::from_ledger(tutor.ledger(), &config.tutor)?;
    upsert_roster(&store.roster_path(), row)?;

    let report = StudentReport::build(tutor.ledger(), &config.tutor);
    report.save_json(&store.report_path(&student))?;

    print_topic_breakdown(tutor.ledger());

    let recs = recommendations(tutor.ledger(), &config.tutor);
    if !recs.is_empty() {
        println!("\nRecommendations:");
        for rec in &recs {
            println!("  - {rec}");
        }
    }

    println!(
        "\nSession complete: {}/{} correct overall.",
        tutor.ledger().total_correct,
        tutor.ledger().total_answered
    );
    println!("Report saved to: {}", store.report_path(&student).display());

    Ok(())
}

fn print_topic_breakdown(ledger: &PerformanceLedger) {
    let mut table = Table::new();
    table.set_header(vec!["Topic", "Attempted", "Correct", "Accuracy", "Avg Time"]);

    for (topic, stats) in &ledger.topics {
        table.add_row(vec![
            Cell::new(topic),
            Cell::new(stats.attempted),
            Cell::new(stats.correct),
            Cell::new(format!("{:.1}%", stats.accuracy() * 100.0)),
            Cell::new(format!("{:.0}s", stats.avg_time_secs)),
        ]);
    }

    println!("\n{table}");
}
