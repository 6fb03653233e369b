// src/repo/subjects.rs

use sqlx::SqliteConnection;

use crate::models::subject::{NewSubject, Subject, SubjectQuizCount};

pub async fn find(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Subject>> {
    sqlx::query_as::<_, Subject>("SELECT id, name, description FROM subjects WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn list(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Subject>> {
    sqlx::query_as::<_, Subject>("SELECT id, name, description FROM subjects ORDER BY name")
        .fetch_all(&mut *conn)
        .await
}

pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
        .fetch_one(&mut *conn)
        .await
}

/// Every subject with the number of quizzes across its chapters.
/// Subjects without quizzes are listed with a count of zero.
pub async fn list_with_quiz_counts(
    conn: &mut SqliteConnection,
) -> sqlx::Result<Vec<SubjectQuizCount>> {
    sqlx::query_as::<_, SubjectQuizCount>(
        r#"
        SELECT s.id, s.name, s.description, COUNT(q.id) AS quiz_count
        FROM subjects s
        LEFT JOIN chapters c ON c.subject_id = s.id
        LEFT JOIN quizzes q ON q.chapter_id = c.id
        GROUP BY s.id, s.name, s.description
        ORDER BY s.name
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}

/// Inserts a subject and returns the new id.
/// A duplicate name surfaces as a unique violation.
pub async fn insert(conn: &mut SqliteConnection, subject: &NewSubject) -> sqlx::Result<i64> {
    sqlx::query_scalar("INSERT INTO subjects (name, description) VALUES ($1, $2) RETURNING id")
        .bind(&subject.name)
        .bind(&subject.description)
        .fetch_one(&mut *conn)
        .await
}

/// Deletes a subject and everything below it: chapters, quizzes, questions
/// and the scores recorded against those quizzes.
pub async fn delete_cascade(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    sqlx::query(
        r#"
        DELETE FROM scores WHERE quiz_id IN (
            SELECT q.id FROM quizzes q
            JOIN chapters c ON q.chapter_id = c.id
            WHERE c.subject_id = $1
        )
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        DELETE FROM questions WHERE quiz_id IN (
            SELECT q.id FROM quizzes q
            JOIN chapters c ON q.chapter_id = c.id
            WHERE c.subject_id = $1
        )
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        "DELETE FROM quizzes WHERE chapter_id IN (SELECT id FROM chapters WHERE subject_id = $1)",
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM chapters WHERE subject_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
