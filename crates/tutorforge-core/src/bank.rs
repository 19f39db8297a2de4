//! Question bank: CSV loading and filtered random sampling.
//!
//! Two header schemas are supported: the current layout with a single
//! pipe-separated `options` column, and the legacy layout with four
//! `option_a`..`option_d` columns and a correct-answer letter.

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::TutorError;
use crate::model::{Difficulty, Question};

/// Delimiter between answer options in the single-column schema.
const OPTIONS_SEPARATOR: char = '|';

/// An in-memory, read-only pool of questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Loads a question bank from a CSV file.
    ///
    /// Missing required columns fail the whole load; individually
    /// malformed rows are skipped with a warning.
    pub fn load_csv(path: &Path) -> Result<Self, TutorError> {
        let file = std::fs::File::open(path).map_err(|e| {
            TutorError::Load(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Parses a question bank from any CSV reader (useful for testing).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TutorError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let layout = Layout::detect(&headers)?;

        let mut questions = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Header is line 1, so data row N lives on line N + 1.
            match layout.parse_row(&record, row) {
                Ok(question) => questions.push(question),
                Err(reason) => {
                    tracing::warn!("skipping question row on line {}: {reason}", row + 2);
                }
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Up to `limit` questions at exactly `difficulty`, sampled randomly
    /// without replacement.
    ///
    /// A topic filter that matches no rows falls back silently to the
    /// difficulty-only pool. A difficulty with no questions yields an
    /// empty result.
    pub fn sample<R: Rng>(
        &self,
        difficulty: Difficulty,
        topic: Option<&str>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<Question> {
        let at_level: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect();

        let pool = match topic {
            Some(t) => {
                let on_topic: Vec<&Question> =
                    at_level.iter().copied().filter(|q| q.topic == t).collect();
                if on_topic.is_empty() {
                    at_level
                } else {
                    on_topic
                }
            }
            None => at_level,
        };

        pool.choose_multiple(rng, limit)
            .map(|q| (*q).clone())
            .collect()
    }

    /// Sorted distinct topic labels present in the bank.
    pub fn topics(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.questions.iter().map(|q| q.topic.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }
}

/// Column positions for one of the two supported header schemas.
#[derive(Debug)]
enum Layout {
    Current {
        id: Option<usize>,
        question: usize,
        options: usize,
        answer: usize,
        difficulty: usize,
        topic: usize,
    },
    Legacy {
        question: usize,
        options: [usize; 4],
        answer: usize,
        difficulty: usize,
        topic: usize,
    },
}

impl Layout {
    fn detect(headers: &StringRecord) -> Result<Self, TutorError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            position(name)
                .ok_or_else(|| TutorError::Load(format!("missing required column '{name}'")))
        };

        if position("option_a").is_some() {
            Ok(Layout::Legacy {
                question: require("question")?,
                options: [
                    require("option_a")?,
                    require("option_b")?,
                    require("option_c")?,
                    require("option_d")?,
                ],
                answer: require("correct_answer")?,
                difficulty: require("difficulty")?,
                topic: require("topic")?,
            })
        } else {
            Ok(Layout::Current {
                id: position("id"),
                question: require("question")?,
                options: require("options")?,
                answer: require("correct_answer")?,
                difficulty: require("difficulty")?,
                topic: require("topic")?,
            })
        }
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> Result<Question, String> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        match self {
            Layout::Current {
                id,
                question,
                options,
                answer,
                difficulty,
                topic,
            } => {
                let text = non_empty(field(*question), "question")?;
                let options: Vec<String> = field(*options)
                    .split(OPTIONS_SEPARATOR)
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect();
                if options.is_empty() {
                    return Err("no answer options".into());
                }
                let id = id
                    .and_then(|idx| {
                        let value = field(idx);
                        (!value.is_empty()).then(|| value.to_string())
                    })
                    .unwrap_or_else(|| format!("q{:03}", row + 1));

                Ok(Question {
                    id,
                    text,
                    options,
                    answer: non_empty(field(*answer), "correct_answer")?,
                    difficulty: parse_difficulty(field(*difficulty))?,
                    topic: non_empty(field(*topic), "topic")?,
                })
            }
            Layout::Legacy {
                question,
                options,
                answer,
                difficulty,
                topic,
            } => {
                let text = non_empty(field(*question), "question")?;
                // The letter indexes the columns as laid out, so empty
                // options are only dropped after the lookup.
                let options: Vec<String> =
                    options.iter().map(|&idx| field(idx).to_string()).collect();

                let letter = field(*answer).to_ascii_uppercase();
                let index = match letter.as_str() {
                    "A" => 0,
                    "B" => 1,
                    "C" => 2,
                    "D" => 3,
                    other => return Err(format!("unknown answer letter '{other}'")),
                };
                let answer = options
                    .get(index)
                    .filter(|o| !o.is_empty())
                    .cloned()
                    .ok_or_else(|| format!("answer letter '{letter}' has no matching option"))?;
                let options: Vec<String> =
                    options.into_iter().filter(|o| !o.is_empty()).collect();

                Ok(Question {
                    id: format!("q{:03}", row + 1),
                    text,
                    options,
                    answer,
                    difficulty: parse_difficulty(field(*difficulty))?,
                    topic: non_empty(field(*topic), "topic")?,
                })
            }
        }
    }
}

fn non_empty(value: &str, column: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("empty '{column}' field"))
    } else {
        Ok(value.to_string())
    }
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    let level: u8 = value
        .parse()
        .map_err(|_| format!("difficulty '{value}' is not an integer"))?;
    Difficulty::new(level).ok_or_else(|| format!("difficulty {level} is out of range"))
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for question in bank.questions() {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Check that the correct answer is one of the options
    for question in bank.questions() {
        if !question.options.contains(&question.answer) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("correct answer '{}' is not among the options", question.answer),
            });
        }
    }

    // Check for questions with a single option
    for question in bank.questions() {
        if question.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "fewer than two answer options".into(),
            });
        }
    }

    warnings
}
