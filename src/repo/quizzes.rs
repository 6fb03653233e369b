// src/repo/quizzes.rs

use sqlx::SqliteConnection;

use crate::models::quiz::{NewQuiz, Quiz, QuizDetail, QuizSummary};

pub async fn find(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Quiz>> {
    sqlx::query_as::<_, Quiz>(
        "SELECT id, chapter_id, time_duration, remarks FROM quizzes WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Loads a quiz together with its chapter and subject names.
pub async fn find_detail(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<QuizDetail>> {
    sqlx::query_as::<_, QuizDetail>(
        r#"
        SELECT
            q.id, q.chapter_id, c.name AS chapter_name,
            c.subject_id, s.name AS subject_name,
            q.time_duration, q.remarks
        FROM quizzes q
        JOIN chapters c ON q.chapter_id = c.id
        JOIN subjects s ON c.subject_id = s.id
        WHERE q.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn list_by_chapter(
    conn: &mut SqliteConnection,
    chapter_id: i64,
) -> sqlx::Result<Vec<QuizSummary>> {
    sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT q.id, q.chapter_id, q.time_duration, q.remarks, COUNT(qu.id) AS question_count
        FROM quizzes q
        LEFT JOIN questions qu ON qu.quiz_id = q.id
        WHERE q.chapter_id = $1
        GROUP BY q.id, q.chapter_id, q.time_duration, q.remarks
        ORDER BY q.id
        "#,
    )
    .bind(chapter_id)
    .fetch_all(&mut *conn)
    .await
}

/// All quizzes under a subject, across its chapters.
pub async fn list_by_subject(
    conn: &mut SqliteConnection,
    subject_id: i64,
) -> sqlx::Result<Vec<QuizSummary>> {
    sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT q.id, q.chapter_id, q.time_duration, q.remarks, COUNT(qu.id) AS question_count
        FROM quizzes q
        JOIN chapters c ON q.chapter_id = c.id
        LEFT JOIN questions qu ON qu.quiz_id = q.id
        WHERE c.subject_id = $1
        GROUP BY q.id, q.chapter_id, q.time_duration, q.remarks
        ORDER BY q.id
        "#,
    )
    .bind(subject_id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
        .fetch_one(&mut *conn)
        .await
}

pub async fn insert(conn: &mut SqliteConnection, quiz: &NewQuiz) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO quizzes (chapter_id, time_duration, remarks) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(quiz.chapter_id)
    .bind(quiz.time_duration)
    .bind(&quiz.remarks)
    .fetch_one(&mut *conn)
    .await
}

/// Deletes a quiz with its questions and scores.
pub async fn delete_cascade(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    sqlx::query("DELETE FROM scores WHERE quiz_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM questions WHERE quiz_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
