// src/handlers/user.rs

use std::collections::HashMap;

use axum::{
    Extension, Form,
    extract::Path,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::{
    config::RECENT_SCORES_LIMIT,
    db::Tx,
    error::AppError,
    models::{
        score::{grade, round2},
        user::CurrentUser,
    },
    repo,
    utils::flash::{self, Flash},
    views::{self, Page, user::Dashboard},
};

/// Catalog overview plus the user's own performance.
pub async fn dashboard(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
) -> Result<impl IntoResponse, AppError> {
    let subjects = repo::subjects::list_with_quiz_counts(&mut tx).await?;
    let recent_scores = repo::scores::recent_for_user(&mut tx, user.id, RECENT_SCORES_LIMIT).await?;
    let total_attempts = repo::scores::count_for_user(&mut tx, user.id).await?;
    let average_score = round2(repo::scores::average_percentage(&mut tx, user.id).await?);

    let data = Dashboard {
        subjects: &subjects,
        recent_scores: &recent_scores,
        total_attempts,
        average_score,
    };

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::user::dashboard(&page, &data)))
}

/// A subject with each of its chapters and their quizzes.
pub async fn view_subject(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(subject_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let subject = repo::subjects::find(&mut tx, subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;
    let chapters = repo::chapters::list_by_subject(&mut tx, subject_id).await?;
    let quizzes = repo::quizzes::list_by_subject(&mut tx, subject_id).await?;

    let chapters: Vec<_> = chapters
        .into_iter()
        .map(|chapter| {
            let own: Vec<_> = quizzes
                .iter()
                .filter(|quiz| quiz.chapter_id == chapter.id)
                .cloned()
                .collect();
            (chapter, own)
        })
        .collect();

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::user::subject(&page, &subject, &chapters)))
}

pub async fn attempt_quiz(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = repo::quizzes::find_detail(&mut tx, quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    let questions = repo::questions::list_by_quiz(&mut tx, quiz_id).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::user::attempt(&page, &quiz, &questions)))
}

/// Grades a submitted attempt and records it as a new score.
///
/// Answers arrive as `question_<id>=<option>` pairs. Every question of the
/// quiz counts, answered or not.
pub async fn submit_quiz(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(quiz_id): Path<i64>,
    Form(answers): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = repo::quizzes::find(&mut tx, quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let keys = repo::questions::answer_keys(&mut tx, quiz.id).await?;
    let outcome = grade(&keys, &answers);

    let score_id = repo::scores::insert(&mut tx, quiz.id, user.id, outcome, Utc::now()).await?;
    tx.commit().await?;

    tracing::info!(
        score_id,
        quiz_id = quiz.id,
        user_id = user.id,
        scored = outcome.total_scored,
        total = outcome.total_questions,
        "Quiz submitted"
    );

    Ok(flash::redirect(
        jar,
        &format!("/user/quiz/{}/result", quiz.id),
        Flash::success(format!(
            "Quiz completed! Your score: {}/{}",
            outcome.total_scored, outcome.total_questions
        )),
    ))
}

/// The user's most recent attempt at a quiz.
pub async fn quiz_result(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = repo::quizzes::find_detail(&mut tx, quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    let score = repo::scores::latest_for_quiz(&mut tx, quiz_id, user.id)
        .await?
        .ok_or(AppError::NotFound("No attempt found for this quiz".to_string()))?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::user::result(&page, &quiz, &score)))
}

pub async fn my_scores(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
) -> Result<impl IntoResponse, AppError> {
    let scores = repo::scores::list_for_user(&mut tx, user.id).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::user::scores(&page, &scores)))
}
