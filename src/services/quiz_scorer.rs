use std::sync::Arc;

use crate::config::GradingMode;
use crate::models::domain::task::{QuizQuestion, VideoTask};
use crate::models::domain::watch_session::QuizSubmission;
use crate::models::domain::QuizResult;

/// Judges a single answer. Implementations must be pure so a submission
/// always grades the same no matter when or where it is scored.
#[cfg_attr(test, mockall::automock)]
pub trait Grader: Send + Sync {
    /// `answer` is the raw submitted text, empty when the question went
    /// unanswered.
    fn grade(&self, question: &QuizQuestion, answer: &str) -> bool;
}

/// Participation grading: any non-blank answer counts.
pub struct AnsweredGrader;

impl Grader for AnsweredGrader {
    fn grade(&self, _question: &QuizQuestion, answer: &str) -> bool {
        !answer.trim().is_empty()
    }
}

/// Key-based grading. Questions without a stored key fall back to the
/// participation rule.
pub struct AnswerKeyGrader;

impl Grader for AnswerKeyGrader {
    fn grade(&self, question: &QuizQuestion, answer: &str) -> bool {
        match &question.correct_answer {
            Some(key) => answer.trim().eq_ignore_ascii_case(key.trim()),
            None => !answer.trim().is_empty(),
        }
    }
}

pub fn grader_for(mode: GradingMode) -> Arc<dyn Grader> {
    match mode {
        GradingMode::Answered => Arc::new(AnsweredGrader),
        GradingMode::AnswerKey => Arc::new(AnswerKeyGrader),
    }
}

pub struct QuizScorer;

impl QuizScorer {
    /// Score a submission against the task's question list. Every task
    /// question is judged; one that received no answer is graded with
    /// empty text. Answers for ids the task does not know are ignored.
    pub fn score(
        task: &VideoTask,
        submission: &QuizSubmission,
        grader: &dyn Grader,
        bonus_per_correct: i64,
    ) -> QuizResult {
        let total_count = task.questions.len() as u32;
        if total_count == 0 {
            return QuizResult::empty();
        }

        let mut correct_count: u32 = 0;
        for question in &task.questions {
            let answer = submission
                .answers
                .iter()
                .find(|a| a.question_id == question.id)
                .map(|a| a.answer_text.as_str())
                .unwrap_or("");

            if grader.grade(question, answer) {
                correct_count += 1;
            }
        }

        let score_percent =
            ((f64::from(correct_count) / f64::from(total_count)) * 100.0).round() as u32;

        QuizResult {
            score_percent,
            correct_count,
            total_count,
            bonus_points: bonus_per_correct * i64::from(correct_count),
        }
    }
}
