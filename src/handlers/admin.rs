// src/handlers/admin.rs

//! Content management. Every route here sits behind `auth_middleware` and
//! `admin_middleware`, so handlers can assume an authenticated admin.

use axum::{
    Extension, Form, Json,
    extract::Path,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    db::Tx,
    error::AppError,
    models::{
        FormError,
        chapter::ChapterForm,
        question::QuestionForm,
        quiz::QuizForm,
        subject::SubjectForm,
        user::CurrentUser,
    },
    repo,
    utils::flash::{self, Flash},
    views::{self, Page, admin::Stats},
};

/// Headline counts and the quick-add quiz form.
pub async fn dashboard(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
) -> Result<impl IntoResponse, AppError> {
    let stats = Stats {
        users: repo::users::count_learners(&mut tx).await?,
        subjects: repo::subjects::count(&mut tx).await?,
        quizzes: repo::quizzes::count(&mut tx).await?,
        attempts: repo::scores::count(&mut tx).await?,
    };
    let subjects = repo::subjects::list(&mut tx).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::admin::dashboard(&page, &stats, &subjects)))
}

pub async fn list_subjects(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
) -> Result<impl IntoResponse, AppError> {
    let subjects = repo::subjects::list(&mut tx).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::admin::subjects(&page, &subjects)))
}

/// Creates a subject. A duplicate name rolls back and is reported via flash.
pub async fn add_subject(
    jar: CookieJar,
    mut tx: Tx,
    Form(form): Form<SubjectForm>,
) -> Result<impl IntoResponse, AppError> {
    let new_subject = match form.into_new() {
        Ok(subject) => subject,
        Err(FormError(msg)) => return Ok(flash::redirect(jar, "/admin/subjects", Flash::danger(msg))),
    };

    match repo::subjects::insert(&mut tx, &new_subject).await {
        Ok(id) => {
            tx.commit().await?;
            tracing::info!(subject_id = id, name = %new_subject.name, "Subject created");
            Ok(flash::redirect(
                jar,
                "/admin/subjects",
                Flash::success("Subject added successfully"),
            ))
        }
        Err(e) if repo::is_unique_violation(&e) => Ok(flash::redirect(
            jar,
            "/admin/subjects",
            Flash::danger("Subject name already exists"),
        )),
        Err(e) => {
            tracing::error!("Failed to create subject: {:?}", e);
            Err(AppError::from(e))
        }
    }
}

/// Deletes a subject with all its chapters, quizzes, questions and scores.
pub async fn delete_subject(
    jar: CookieJar,
    mut tx: Tx,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let subject = repo::subjects::find(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;

    repo::subjects::delete_cascade(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(subject_id = id, name = %subject.name, "Subject deleted");
    Ok(flash::redirect(
        jar,
        "/admin/subjects",
        Flash::success("Subject deleted successfully"),
    ))
}

pub async fn list_chapters(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(subject_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let subject = repo::subjects::find(&mut tx, subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;
    let chapters = repo::chapters::list_by_subject(&mut tx, subject_id).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::admin::chapters(&page, &subject, &chapters)))
}

/// Chapters of a subject as JSON. Feeds the chapter picker of the quick-add quiz form.
pub async fn api_chapters(
    mut tx: Tx,
    Path(subject_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    repo::subjects::find(&mut tx, subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;
    let chapters = repo::chapters::list_by_subject(&mut tx, subject_id).await?;

    Ok(Json(chapters))
}

pub async fn add_chapter(
    jar: CookieJar,
    mut tx: Tx,
    Form(form): Form<ChapterForm>,
) -> Result<impl IntoResponse, AppError> {
    let back = form
        .subject_id()
        .map(|id| format!("/admin/chapters/{id}"))
        .unwrap_or_else(|| "/admin/subjects".to_string());

    let new_chapter = match form.into_new() {
        Ok(chapter) => chapter,
        Err(FormError(msg)) => return Ok(flash::redirect(jar, &back, Flash::danger(msg))),
    };

    repo::subjects::find(&mut tx, new_chapter.subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;

    let id = repo::chapters::insert(&mut tx, &new_chapter).await?;
    tx.commit().await?;

    tracing::info!(chapter_id = id, subject_id = new_chapter.subject_id, "Chapter created");
    Ok(flash::redirect(jar, &back, Flash::success("Chapter added successfully")))
}

pub async fn delete_chapter(
    jar: CookieJar,
    mut tx: Tx,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = repo::chapters::find(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound("Chapter not found".to_string()))?;

    repo::chapters::delete_cascade(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(chapter_id = id, subject_id = chapter.subject_id, "Chapter deleted");
    Ok(flash::redirect(
        jar,
        &format!("/admin/chapters/{}", chapter.subject_id),
        Flash::success("Chapter deleted successfully"),
    ))
}

pub async fn list_quizzes(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(chapter_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = repo::chapters::find(&mut tx, chapter_id)
        .await?
        .ok_or(AppError::NotFound("Chapter not found".to_string()))?;
    let subject = repo::subjects::find(&mut tx, chapter.subject_id)
        .await?
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;
    let quizzes = repo::quizzes::list_by_chapter(&mut tx, chapter_id).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::admin::quizzes(&page, &subject, &chapter, &quizzes)))
}

pub async fn add_quiz(
    jar: CookieJar,
    mut tx: Tx,
    Form(form): Form<QuizForm>,
) -> Result<impl IntoResponse, AppError> {
    let back = form
        .chapter_id()
        .map(|id| format!("/admin/quizzes/{id}"))
        .unwrap_or_else(|| "/admin/subjects".to_string());

    let new_quiz = match form.into_new() {
        Ok(quiz) => quiz,
        Err(FormError(msg)) => return Ok(flash::redirect(jar, &back, Flash::danger(msg))),
    };

    repo::chapters::find(&mut tx, new_quiz.chapter_id)
        .await?
        .ok_or(AppError::NotFound("Chapter not found".to_string()))?;

    let id = repo::quizzes::insert(&mut tx, &new_quiz).await?;
    tx.commit().await?;

    tracing::info!(quiz_id = id, chapter_id = new_quiz.chapter_id, "Quiz created");
    Ok(flash::redirect(jar, &back, Flash::success("Quiz created successfully")))
}

pub async fn delete_quiz(
    jar: CookieJar,
    mut tx: Tx,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = repo::quizzes::find(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    repo::quizzes::delete_cascade(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(quiz_id = id, chapter_id = quiz.chapter_id, "Quiz deleted");
    Ok(flash::redirect(
        jar,
        &format!("/admin/quizzes/{}", quiz.chapter_id),
        Flash::success("Quiz deleted successfully"),
    ))
}

/// Questions of a quiz, with the form to add more. Served for GET and POST.
pub async fn list_questions(
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
    Ok((jar, views::admin::questions(&page, &quiz, &questions)))
}

pub async fn add_question(
    jar: CookieJar,
    mut tx: Tx,
    Form(form): Form<QuestionForm>,
) -> Result<impl IntoResponse, AppError> {
    let quiz_id = form
        .quiz_id()
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    let quiz = repo::quizzes::find(&mut tx, quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let back = format!("/admin/quiz/{}/questions", quiz.id);
    let new_question = match form.into_new(quiz.id) {
        Ok(question) => question,
        Err(FormError(msg)) => return Ok(flash::redirect(jar, &back, Flash::danger(msg))),
    };

    let id = repo::questions::insert(&mut tx, &new_question).await?;
    tx.commit().await?;

    tracing::info!(question_id = id, quiz_id = quiz.id, "Question created");
    Ok(flash::redirect(jar, &back, Flash::success("Question added successfully")))
}

pub async fn delete_question(
    jar: CookieJar,
    mut tx: Tx,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = repo::questions::find(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    repo::questions::delete(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(question_id = id, quiz_id = question.quiz_id, "Question deleted");
    Ok(flash::redirect(
        jar,
        &format!("/admin/quiz/{}/questions", question.quiz_id),
        Flash::success("Question deleted successfully"),
    ))
}

/// Lists learner accounts (admins are not listed).
pub async fn list_users(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
) -> Result<impl IntoResponse, AppError> {
    let users = repo::users::list_learners(&mut tx).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::admin::users(&page, &users)))
}

/// Deletes a user and their scores. Prevents deleting self.
pub async fn delete_user(
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if id == current.id {
        return Ok(flash::redirect(
            jar,
            "/admin/users",
            Flash::danger("Cannot delete your own account"),
        ));
    }

    let user = repo::users::find_by_id(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    repo::users::delete(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, username = %user.username, "User deleted");
    Ok(flash::redirect(
        jar,
        "/admin/users",
        Flash::success("User deleted successfully"),
    ))
}

/// Every attempt by every user, most recent first.
pub async fn list_scores(
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    mut tx: Tx,
) -> Result<impl IntoResponse, AppError> {
    let scores = repo::scores::list_all(&mut tx).await?;

    let (jar, flash) = flash::take(jar);
    let page = Page::new(Some(&user), flash);
    Ok((jar, views::admin::scores(&page, &scores)))
}
