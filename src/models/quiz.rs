// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::FormError;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub chapter_id: i64,
    /// Allowed time in minutes.
    pub time_duration: i64,
    pub remarks: String,
}

/// A quiz row with the number of questions it holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizSummary {
    pub id: i64,
    pub chapter_id: i64,
    pub time_duration: i64,
    pub remarks: String,
    pub question_count: i64,
}

/// A quiz joined with its chapter and subject, for page headers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizDetail {
    pub id: i64,
    pub chapter_id: i64,
    pub chapter_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub time_duration: i64,
    pub remarks: String,
}

/// Raw form body of `POST /admin/quiz/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuizForm {
    pub chapter_id: String,
    pub duration: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub chapter_id: i64,
    pub time_duration: i64,
    pub remarks: String,
}

impl QuizForm {
    pub fn chapter_id(&self) -> Option<i64> {
        self.chapter_id.trim().parse().ok()
    }

    pub fn into_new(self) -> Result<NewQuiz, FormError> {
        let duration = self.duration.trim();
        let chapter_id = self
            .chapter_id()
            .ok_or(FormError("Duration and chapter are required"))?;
        if duration.is_empty() {
            return Err(FormError("Duration and chapter are required"));
        }

        let time_duration: i64 = duration
            .parse()
            .map_err(|_| FormError("Invalid duration format"))?;
        if time_duration <= 0 {
            return Err(FormError("Duration must be a positive number of minutes"));
        }

        Ok(NewQuiz {
            chapter_id,
            time_duration,
            remarks: self.remarks.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(chapter_id: &str, duration: &str) -> QuizForm {
        QuizForm {
            chapter_id: chapter_id.to_string(),
            duration: duration.to_string(),
            remarks: "  Midterm  ".to_string(),
        }
    }

    #[test]
    fn test_valid_quiz_form() {
        let quiz = form("3", "10").into_new().unwrap();
        assert_eq!(
            quiz,
            NewQuiz {
                chapter_id: 3,
                time_duration: 10,
                remarks: "Midterm".to_string(),
            }
        );
    }

    #[test]
    fn test_quiz_form_errors() {
        assert_eq!(
            form("", "10").into_new(),
            Err(FormError("Duration and chapter are required"))
        );
        assert_eq!(
            form("3", " ").into_new(),
            Err(FormError("Duration and chapter are required"))
        );
        assert_eq!(form("3", "ten").into_new(), Err(FormError("Invalid duration format")));
        assert_eq!(
            form("3", "-5").into_new(),
            Err(FormError("Duration must be a positive number of minutes"))
        );
    }
}
