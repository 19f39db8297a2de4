//! Personalized study recommendations.
//!
//! Recommendations are a pure derivation over the durable ledger, so a
//! report generated later agrees with what the live session would have
//! suggested.

use crate::ledger::PerformanceLedger;
use crate::tutor::TutorConfig;

/// Maximum number of topic-specific entries in a recommendation list.
const MAX_TOPIC_ENTRIES: usize = 3;

/// Builds the recommendation list for a student: up to three weakest
/// topics (ascending accuracy), then at most one general remark keyed
/// off the overall average score.
pub fn recommendations(ledger: &PerformanceLedger, config: &TutorConfig) -> Vec<String> {
    let mut out = Vec::new();

    let weak = ledger.weak_areas(config.weak_area_min_attempts, config.weak_area_accuracy);
    for (topic, accuracy) in weak.into_iter().take(MAX_TOPIC_ENTRIES) {
        out.push(format!(
            "Focus on {topic} (accuracy: {:.1}%)",
            accuracy * 100.0
        ));
    }

    let average = ledger.accuracy();
    if average < 0.5 {
        out.push("Consider reviewing fundamental concepts".to_string());
    } else if average > 0.8 {
        out.push("You're ready for more challenging material!".to_string());
    }

    out
}
