// src/models/subject.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{FormError, non_empty};

/// Represents the 'subjects' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    /// Unique display name.
    pub name: String,
    pub description: String,
}

/// A subject joined with the number of quizzes below it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectQuizCount {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quiz_count: i64,
}

/// Raw form body of `POST /admin/subject/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubjectForm {
    pub name: String,
    pub description: String,
}

/// A validated subject ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub description: String,
}

impl SubjectForm {
    pub fn into_new(self) -> Result<NewSubject, FormError> {
        let name = non_empty(&self.name).ok_or(FormError("Subject name is required"))?;

        Ok(NewSubject {
            name,
            description: self.description.trim().to_string(),
        })
    }
}
