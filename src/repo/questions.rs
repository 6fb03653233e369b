// src/repo/questions.rs

use sqlx::SqliteConnection;

use crate::models::{
    question::{NewQuestion, Question},
    score::AnswerKey,
};

const QUESTION_COLUMNS: &str =
    "id, quiz_id, statement, option1, option2, option3, option4, correct_option";

pub async fn find(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn list_by_quiz(
    conn: &mut SqliteConnection,
    quiz_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = $1 ORDER BY id"
    ))
    .bind(quiz_id)
    .fetch_all(&mut *conn)
    .await
}

/// Only the grading data of a quiz's questions.
pub async fn answer_keys(
    conn: &mut SqliteConnection,
    quiz_id: i64,
) -> sqlx::Result<Vec<AnswerKey>> {
    sqlx::query_as::<_, AnswerKey>(
        "SELECT id AS question_id, correct_option FROM questions WHERE quiz_id = $1 ORDER BY id",
    )
    .bind(quiz_id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, question: &NewQuestion) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        INSERT INTO questions
        (quiz_id, statement, option1, option2, option3, option4, correct_option)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(question.quiz_id)
    .bind(&question.statement)
    .bind(&question.option1)
    .bind(&question.option2)
    .bind(&question.option3)
    .bind(&question.option4)
    .bind(question.correct_option)
    .fetch_one(&mut *conn)
    .await
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
