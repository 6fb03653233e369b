// src/models/score.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'scores' table in the database.
/// One row per quiz attempt; never updated after insertion.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub total_scored: i64,
    pub total_questions: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Score {
    pub fn percentage(&self) -> f64 {
        percentage(self.total_scored, self.total_questions)
    }
}

/// A score joined with the user and the quiz's chapter and subject.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreRecord {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub username: String,
    pub chapter_name: String,
    pub subject_name: String,
    pub total_scored: i64,
    pub total_questions: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ScoreRecord {
    pub fn percentage(&self) -> f64 {
        percentage(self.total_scored, self.total_questions)
    }
}

/// `scored * 100 / questions`, or 0 for a quiz without questions.
pub fn percentage(total_scored: i64, total_questions: i64) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    total_scored as f64 * 100.0 / total_questions as f64
}

/// Rounds to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Correct answer of one question, as needed for grading.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AnswerKey {
    pub question_id: i64,
    pub correct_option: i64,
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub total_scored: i64,
    pub total_questions: i64,
}

/// Name of the form field carrying the answer to a question.
pub fn answer_field(question_id: i64) -> String {
    format!("question_{question_id}")
}

/// Grades a submitted attempt against the quiz's answer keys.
///
/// Every key counts towards `total_questions`. An answer scores only when it
/// parses as an integer equal to the stored option; missing fields and garbage
/// are wrong answers, not errors. Fields that match no key are ignored.
pub fn grade(keys: &[AnswerKey], answers: &HashMap<String, String>) -> Grade {
    let total_scored = keys
        .iter()
        .filter(|key| {
            answers
                .get(&answer_field(key.question_id))
                .and_then(|value| value.trim().parse::<i64>().ok())
                == Some(key.correct_option)
        })
        .count() as i64;

    Grade {
        total_scored,
        total_questions: keys.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<AnswerKey> {
        vec![
            AnswerKey {
                question_id: 1,
                correct_option: 1,
            },
            AnswerKey {
                question_id: 2,
                correct_option: 2,
            },
        ]
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_grade_all_correct() {
        let outcome = grade(&keys(), &answers(&[("question_1", "1"), ("question_2", "2")]));
        assert_eq!(outcome.total_scored, 2);
        assert_eq!(outcome.total_questions, 2);
    }

    #[test]
    fn test_grade_one_wrong() {
        let outcome = grade(&keys(), &answers(&[("question_1", "1"), ("question_2", "1")]));
        assert_eq!(outcome.total_scored, 1);
        assert_eq!(outcome.total_questions, 2);
    }

    #[test]
    fn test_grade_missing_and_garbage_answers() {
        let outcome = grade(&keys(), &answers(&[("question_1", "one"), ("question_9", "1")]));
        assert_eq!(outcome.total_scored, 0);
        assert_eq!(outcome.total_questions, 2);
    }

    #[test]
    fn test_grade_tolerates_whitespace() {
        let outcome = grade(&keys(), &answers(&[("question_1", " 1 ")]));
        assert_eq!(outcome.total_scored, 1);
    }

    #[test]
    fn test_grade_empty_quiz() {
        let outcome = grade(&[], &answers(&[("question_1", "1")]));
        assert_eq!(
            outcome,
            Grade {
                total_scored: 0,
                total_questions: 0
            }
        );
    }

    #[test]
    fn test_percentage_and_rounding() {
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(round2(percentage(1, 3)), 33.33);
        assert_eq!(round2(percentage(2, 3)), 66.67);
    }
}
