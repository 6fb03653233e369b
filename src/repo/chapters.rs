// src/repo/chapters.rs

use sqlx::SqliteConnection;

use crate::models::chapter::{Chapter, NewChapter};

pub async fn find(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Chapter>> {
    sqlx::query_as::<_, Chapter>(
        "SELECT id, subject_id, name, description FROM chapters WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn list_by_subject(
    conn: &mut SqliteConnection,
    subject_id: i64,
) -> sqlx::Result<Vec<Chapter>> {
    sqlx::query_as::<_, Chapter>(
        "SELECT id, subject_id, name, description FROM chapters WHERE subject_id = $1 ORDER BY id",
    )
    .bind(subject_id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, chapter: &NewChapter) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO chapters (subject_id, name, description) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(chapter.subject_id)
    .bind(&chapter.name)
    .bind(&chapter.description)
    .fetch_one(&mut *conn)
    .await
}

/// Deletes a chapter with its quizzes, their questions and their scores.
pub async fn delete_cascade(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    sqlx::query("DELETE FROM scores WHERE quiz_id IN (SELECT id FROM quizzes WHERE chapter_id = $1)")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "DELETE FROM questions WHERE quiz_id IN (SELECT id FROM quizzes WHERE chapter_id = $1)",
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM quizzes WHERE chapter_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM chapters WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
