// src/views/user.rs

use maud::{Markup, html};

use super::{Page, layout, percent, timestamp};
use crate::models::{
    chapter::Chapter,
    question::Question,
    quiz::{QuizDetail, QuizSummary},
    score::{Score, ScoreRecord, answer_field},
    subject::{Subject, SubjectQuizCount},
};

pub struct Dashboard<'a> {
    pub subjects: &'a [SubjectQuizCount],
    pub recent_scores: &'a [ScoreRecord],
    pub total_attempts: i64,
    /// Already rounded to two decimals.
    pub average_score: f64,
}

pub fn dashboard(page: &Page<'_>, data: &Dashboard<'_>) -> Markup {
    let name = page.user.map(|u| u.full_name.as_str()).unwrap_or_default();

    layout(
        page,
        "Dashboard",
        html! {
            h1 class="h3 mb-4" { "Welcome, " (name) }
            div class="row g-3 mb-4" {
                div class="col-md-6" {
                    div.card { div.card-body {
                        div.text-muted { "Attempts" }
                        div class="display-6" { (data.total_attempts) }
                    } }
                }
                div class="col-md-6" {
                    div.card { div.card-body {
                        div.text-muted { "Average score" }
                        div class="display-6" { (percent(data.average_score)) }
                    } }
                }
            }

            h2 class="h5" { "Subjects" }
            div class="list-group mb-4" {
                @for subject in data.subjects {
                    a class="list-group-item list-group-item-action d-flex justify-content-between"
                        href={ "/user/subject/" (subject.id) } {
                        span { (subject.name) }
                        span class="badge bg-primary rounded-pill" { (subject.quiz_count) " quizzes" }
                    }
                }
                @if data.subjects.is_empty() {
                    div.list-group-item.text-muted { "No subjects available yet." }
                }
            }

            h2 class="h5" { "Recent attempts" }
            (score_table(data.recent_scores))
            a href="/user/scores" { "All my scores" }
        },
    )
}

pub fn subject(page: &Page<'_>, subject: &Subject, chapters: &[(Chapter, Vec<QuizSummary>)]) -> Markup {
    layout(
        page,
        &subject.name,
        html! {
            h1 class="h3" { (subject.name) }
            p.text-muted { (subject.description) }
            @for (chapter, quizzes) in chapters {
                div class="card mb-3" {
                    div.card-header { (chapter.name) }
                    div.card-body {
                        @if !chapter.description.is_empty() {
                            p { (chapter.description) }
                        }
                        @if quizzes.is_empty() {
                            p class="text-muted mb-0" { "No quizzes in this chapter yet." }
                        } @else {
                            ul class="list-unstyled mb-0" {
                                @for quiz in quizzes {
                                    li class="mb-1" {
                                        a href={ "/user/quiz/" (quiz.id) } { "Quiz #" (quiz.id) }
                                        " (" (quiz.question_count) " questions, " (quiz.time_duration) " min) "
                                        span.text-muted { (quiz.remarks) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @if chapters.is_empty() {
                p.text-muted { "This subject has no chapters yet." }
            }
        },
    )
}

/// The attempt form. Correct answers are never rendered.
pub fn attempt(page: &Page<'_>, quiz: &QuizDetail, questions: &[Question]) -> Markup {
    layout(
        page,
        "Quiz",
        html! {
            h1 class="h3" { (quiz.subject_name) " / " (quiz.chapter_name) " / Quiz #" (quiz.id) }
            p.text-muted { (quiz.remarks) }
            div class="alert alert-secondary" {
                "Time left: "
                span id="quiz-timer" data-duration-minutes=(quiz.time_duration) { (quiz.time_duration) ":00" }
            }
            form id="quiz-form" method="post" action={ "/user/quiz/" (quiz.id) } {
                @for (number, question) in questions.iter().enumerate() {
                    fieldset class="card mb-3" {
                        div.card-body {
                            legend class="h6" { (number + 1) ". " (question.statement) }
                            @let field = answer_field(question.id);
                            @for (slot, text) in question.options() {
                                @let input_id = format!("{field}_{slot}");
                                div.form-check {
                                    input.form-check-input type="radio" id=(input_id) name=(field) value=(slot);
                                    label.form-check-label for=(input_id) { (text) }
                                }
                            }
                        }
                    }
                }
                @if questions.is_empty() {
                    p.text-muted { "This quiz has no questions yet." }
                }
                button.btn.btn-primary type="submit" { "Submit answers" }
            }
        },
    )
}

pub fn result(page: &Page<'_>, quiz: &QuizDetail, score: &Score) -> Markup {
    layout(
        page,
        "Result",
        html! {
            h1 class="h3" { "Result: Quiz #" (quiz.id) }
            p.text-muted { (quiz.subject_name) " / " (quiz.chapter_name) }
            div.card { div.card-body {
                p class="display-6" { (score.total_scored) " / " (score.total_questions) }
                p { (percent(score.percentage())) " correct, submitted " (timestamp(&score.timestamp)) }
            } }
            div class="mt-3" {
                a class="btn btn-primary me-2" href={ "/user/quiz/" (quiz.id) } { "Try again" }
                a class="btn btn-outline-secondary" href="/user/dashboard" { "Back to dashboard" }
            }
        },
    )
}

pub fn scores(page: &Page<'_>, scores: &[ScoreRecord]) -> Markup {
    layout(
        page,
        "My scores",
        html! {
            h1 class="h3 mb-3" { "My scores" }
            (score_table(scores))
        },
    )
}

fn score_table(scores: &[ScoreRecord]) -> Markup {
    html! {
        table.table.table-striped {
            thead {
                tr { th { "When" } th { "Subject" } th { "Chapter" } th { "Quiz" } th { "Score" } th { "%" } }
            }
            tbody {
                @for score in scores {
                    tr {
                        td { (timestamp(&score.timestamp)) }
                        td { (score.subject_name) }
                        td { (score.chapter_name) }
                        td { a href={ "/user/quiz/" (score.quiz_id) "/result" } { "Quiz #" (score.quiz_id) } }
                        td { (score.total_scored) "/" (score.total_questions) }
                        td { (percent(score.percentage())) }
                    }
                }
                @if scores.is_empty() {
                    tr { td colspan="6" class="text-muted" { "No attempts yet." } }
                }
            }
        }
    }
}
