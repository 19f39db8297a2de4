//! The adaptive session: streak tracking and difficulty adjustment.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TutorError;
use crate::ledger::{PerformanceLedger, SessionEvent};
use crate::model::{Difficulty, Question};
use crate::storage::LedgerStore;

/// Thresholds steering the adjustment and weak-area logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Consecutive correct answers required to raise the difficulty.
    #[serde(default = "default_mastery_streak")]
    pub mastery_streak: u32,
    /// Consecutive wrong answers required to lower the difficulty.
    #[serde(default = "default_demotion_streak")]
    pub demotion_streak: u32,
    /// Minimum attempts before a topic can be flagged weak.
    #[serde(default = "default_weak_area_min_attempts")]
    pub weak_area_min_attempts: u32,
    /// Accuracy below which a topic counts as weak.
    #[serde(default = "default_weak_area_accuracy")]
    pub weak_area_accuracy: f64,
}

fn default_mastery_streak() -> u32 {
    3
}
fn default_demotion_streak() -> u32 {
    2
}
fn default_weak_area_min_attempts() -> u32 {
    3
}
fn default_weak_area_accuracy() -> f64 {
    0.6
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            mastery_streak: default_mastery_streak(),
            demotion_streak: default_demotion_streak(),
            weak_area_min_attempts: default_weak_area_min_attempts(),
            weak_area_accuracy: default_weak_area_accuracy(),
        }
    }
}

/// Per-session transient state.
///
/// Streaks are deliberately not persisted: a new session starts with both
/// counters at zero, while the difficulty resumes from the ledger's
/// history.
#[derive(Debug, Clone, Copy)]
pub struct SessionState {
    pub difficulty: Difficulty,
    pub correct_streak: u32,
    pub wrong_streak: u32,
}

impl SessionState {
    fn starting_at(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            correct_streak: 0,
            wrong_streak: 0,
        }
    }
}

/// Drives one student's session against their durable ledger.
pub struct AdaptiveTutor {
    store: LedgerStore,
    ledger: PerformanceLedger,
    session: SessionState,
    config: TutorConfig,
}

impl AdaptiveTutor {
    /// Opens a session for `student_id`, creating the ledger on first
    /// access (which persists the fresh record immediately).
    pub fn open(
        store: LedgerStore,
        student_id: &str,
        config: TutorConfig,
    ) -> Result<Self, TutorError> {
        let ledger = store.load_or_create(student_id)?;
        let session = SessionState::starting_at(ledger.current_difficulty());
        Ok(Self {
            store,
            ledger,
            session,
            config,
        })
    }

    /// The difficulty the next question should be drawn at.
    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ledger(&self) -> &PerformanceLedger {
        &self.ledger
    }

    /// Folds one answered question into the session and the ledger, and
    /// returns the difficulty for the next question.
    ///
    /// The ledger is persisted before returning. A failed save is logged
    /// and otherwise ignored: the in-memory update stands and the caller
    /// still receives the new difficulty. There is no retry.
    pub fn record_answer(
        &mut self,
        question: &Question,
        correct: bool,
        time_spent_secs: u32,
    ) -> Difficulty {
        self.ledger
            .note_answer(&question.topic, correct, time_spent_secs);

        if correct {
            self.session.correct_streak += 1;
            self.session.wrong_streak = 0;
        } else {
            self.session.wrong_streak += 1;
            self.session.correct_streak = 0;
        }

        self.adjust_difficulty(correct);

        self.ledger.push_difficulty(self.session.difficulty);
        self.ledger.push_event(SessionEvent {
            timestamp: Utc::now(),
            question_id: question.id.clone(),
            topic: question.topic.clone(),
            correct,
            time_spent_secs,
            difficulty: self.session.difficulty,
        });

        if let Err(e) = self.store.save(&self.ledger) {
            tracing::warn!(
                "failed to persist ledger for '{}': {e}",
                self.ledger.student_id
            );
        }

        self.session.difficulty
    }

    fn adjust_difficulty(&mut self, correct: bool) {
        if correct {
            if self.session.correct_streak >= self.config.mastery_streak
                && self.session.difficulty < Difficulty::MAX
            {
                self.session.difficulty = self.session.difficulty.step_up();
                self.session.correct_streak = 0;
                tracing::info!("difficulty raised to {}", self.session.difficulty);
            }
        } else if self.session.wrong_streak >= self.config.demotion_streak
            && self.session.difficulty > Difficulty::MIN
        {
            self.session.difficulty = self.session.difficulty.step_down();
            self.session.wrong_streak = 0;
            tracing::info!("difficulty lowered to {}", self.session.difficulty);
        }
    }

    /// Topics currently below the weak-area threshold, weakest first.
    pub fn weak_areas(&self) -> Vec<(String, f64)> {
        self.ledger.weak_areas(
            self.config.weak_area_min_attempts,
            self.config.weak_area_accuracy,
        )
    }
}
