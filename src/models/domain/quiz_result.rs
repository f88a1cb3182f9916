use serde::{Deserialize, Serialize};

/// Outcome of grading one submission. Pure data; how it was computed is
/// the scorer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub score_percent: u32,
    pub correct_count: u32,
    pub total_count: u32,
    pub bonus_points: i64,
}

impl QuizResult {
    pub fn empty() -> Self {
        QuizResult {
            score_percent: 0,
            correct_count: 0,
            total_count: 0,
            bonus_points: 0,
        }
    }
}
