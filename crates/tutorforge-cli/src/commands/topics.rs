//! The `tutorforge topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use tutorforge_core::bank::QuestionBank;
use tutorforge_core::model::Difficulty;

pub fn execute(questions: PathBuf) -> Result<()> {
    let bank = QuestionBank::load_csv(&questions)?;

    let mut table = Table::new();
    let mut header = vec!["Topic".to_string()];
    for level in Difficulty::ALL {
        header.push(format!("D{level}"));
    }
    header.push("Total".to_string());
    table.set_header(header);

    for topic in bank.topics() {
        let mut row = vec![topic.clone()];
        let mut total = 0usize;
        for level in Difficulty::ALL {
            let count = bank
                .questions()
                .iter()
                .filter(|q| q.topic == topic && q.difficulty == level)
                .count();
            total += count;
            row.push(count.to_string());
        }
        row.push(total.to_string());
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
