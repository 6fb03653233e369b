// src/repo/scores.rs

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::models::score::{Grade, Score, ScoreRecord};

/// Shared SELECT for score rows joined with user, chapter and subject names.
const SCORE_RECORD_SELECT: &str = r#"
    SELECT
        sc.id, sc.quiz_id, sc.user_id, u.username,
        c.name AS chapter_name, s.name AS subject_name,
        sc.total_scored, sc.total_questions, sc.timestamp
    FROM scores sc
    JOIN users u ON sc.user_id = u.id
    JOIN quizzes q ON sc.quiz_id = q.id
    JOIN chapters c ON q.chapter_id = c.id
    JOIN subjects s ON c.subject_id = s.id
"#;

/// Records one attempt. The timestamp is fixed here and never changes.
pub async fn insert(
    conn: &mut SqliteConnection,
    quiz_id: i64,
    user_id: i64,
    grade: Grade,
    timestamp: DateTime<Utc>,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        INSERT INTO scores (quiz_id, user_id, total_scored, total_questions, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(quiz_id)
    .bind(user_id)
    .bind(grade.total_scored)
    .bind(grade.total_questions)
    .bind(timestamp)
    .fetch_one(&mut *conn)
    .await
}

/// The user's most recent attempt at a quiz, if any.
pub async fn latest_for_quiz(
    conn: &mut SqliteConnection,
    quiz_id: i64,
    user_id: i64,
) -> sqlx::Result<Option<Score>> {
    sqlx::query_as::<_, Score>(
        r#"
        SELECT id, quiz_id, user_id, total_scored, total_questions, timestamp
        FROM scores
        WHERE quiz_id = $1 AND user_id = $2
        ORDER BY timestamp DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(quiz_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn recent_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    limit: i64,
) -> sqlx::Result<Vec<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(&format!(
        "{SCORE_RECORD_SELECT} WHERE sc.user_id = $1 ORDER BY sc.timestamp DESC, sc.id DESC LIMIT $2"
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(&mut *conn)
    .await
}

pub async fn list_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> sqlx::Result<Vec<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(&format!(
        "{SCORE_RECORD_SELECT} WHERE sc.user_id = $1 ORDER BY sc.timestamp DESC, sc.id DESC"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(&format!(
        "{SCORE_RECORD_SELECT} ORDER BY sc.timestamp DESC, sc.id DESC"
    ))
    .fetch_all(&mut *conn)
    .await
}

pub async fn count_for_user(conn: &mut SqliteConnection, user_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM scores WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
}

pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM scores")
        .fetch_one(&mut *conn)
        .await
}

/// Unweighted mean of the per-attempt percentages, 0 without attempts.
/// Attempts at quizzes without questions count as 0%.
pub async fn average_percentage(conn: &mut SqliteConnection, user_id: i64) -> sqlx::Result<f64> {
    sqlx::query_scalar(
        r#"
        SELECT COALESCE(AVG(
            CASE WHEN total_questions > 0
                THEN total_scored * 100.0 / total_questions
                ELSE 0.0
            END
        ), 0.0)
        FROM scores
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await
}
