// src/models/chapter.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{FormError, non_empty};

/// Represents the 'chapters' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i64,
    pub subject_id: i64,
    pub name: String,
    pub description: String,
}

/// Raw form body of `POST /admin/chapter/add`.
/// Ids arrive as strings so that a blank or garbled field becomes a flash, not a 422.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChapterForm {
    pub subject_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChapter {
    pub subject_id: i64,
    pub name: String,
    pub description: String,
}

impl ChapterForm {
    /// Best-effort parse of the parent id, used to pick the redirect target.
    pub fn subject_id(&self) -> Option<i64> {
        self.subject_id.trim().parse().ok()
    }

    pub fn into_new(self) -> Result<NewChapter, FormError> {
        let required = FormError("Chapter name and subject are required");

        let subject_id = self.subject_id().ok_or(required)?;
        let name = non_empty(&self.name).ok_or(required)?;

        Ok(NewChapter {
            subject_id,
            name,
            description: self.description.trim().to_string(),
        })
    }
}
