// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use super::{FormError, non_empty};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,

    /// The text of the question.
    pub statement: String,

    /// Options one and two are mandatory, three and four may be absent.
    pub option1: String,
    pub option2: String,
    pub option3: Option<String>,
    pub option4: Option<String>,

    /// 1-based index of the correct option.
    pub correct_option: i64,
}

impl Question {
    /// The filled option slots as `(slot, text)` pairs.
    pub fn options(&self) -> Vec<(i64, &str)> {
        let mut options = vec![(1, self.option1.as_str()), (2, self.option2.as_str())];
        if let Some(opt) = &self.option3 {
            options.push((3, opt.as_str()));
        }
        if let Some(opt) = &self.option4 {
            options.push((4, opt.as_str()));
        }
        options
    }
}

/// Raw form body of `POST /admin/question/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuestionForm {
    pub quiz_id: String,
    pub statement: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub correct_option: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub quiz_id: i64,
    pub statement: String,
    pub option1: String,
    pub option2: String,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub correct_option: i64,
}

impl QuestionForm {
    pub fn quiz_id(&self) -> Option<i64> {
        self.quiz_id.trim().parse().ok()
    }

    /// Validates the form for a quiz that is already known to exist.
    pub fn into_new(self, quiz_id: i64) -> Result<NewQuestion, FormError> {
        let required = FormError("Question statement and the first two options are required");

        let statement = non_empty(&self.statement).ok_or(required)?;
        let option1 = non_empty(&self.option1).ok_or(required)?;
        let option2 = non_empty(&self.option2).ok_or(required)?;
        let option3 = non_empty(&self.option3);
        let option4 = non_empty(&self.option4);

        let correct_option: i64 = self
            .correct_option
            .trim()
            .parse()
            .map_err(|_| FormError("Invalid correct option"))?;

        let slot_filled = match correct_option {
            1 | 2 => true,
            3 => option3.is_some(),
            4 => option4.is_some(),
            _ => false,
        };
        if !slot_filled {
            return Err(FormError("Correct option must point to a provided option"));
        }

        Ok(NewQuestion {
            quiz_id,
            statement,
            option1,
            option2,
            option3,
            option4,
            correct_option,
        })
    }
}
