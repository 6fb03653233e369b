// src/views/admin.rs

use maud::{Markup, html};

use super::{Page, delete_button, layout, percent, timestamp};
use crate::models::{
    chapter::Chapter,
    question::Question,
    quiz::{QuizDetail, QuizSummary},
    score::ScoreRecord,
    subject::Subject,
    user::User,
};

/// Headline numbers on the admin dashboard.
pub struct Stats {
    pub users: i64,
    pub subjects: i64,
    pub quizzes: i64,
    pub attempts: i64,
}

pub fn dashboard(page: &Page<'_>, stats: &Stats, subjects: &[Subject]) -> Markup {
    let cards = [
        ("Users", stats.users, "/admin/users"),
        ("Subjects", stats.subjects, "/admin/subjects"),
        ("Quizzes", stats.quizzes, "/admin/subjects"),
        ("Attempts", stats.attempts, "/admin/scores"),
    ];

    layout(
        page,
        "Admin dashboard",
        html! {
            h1 class="h3 mb-4" { "Admin dashboard" }
            div class="row g-3" {
                @for (label, value, href) in cards {
                    div class="col-md-3" {
                        a.card.text-decoration-none href=(href) {
                            div.card-body {
                                div.text-muted { (label) }
                                div class="display-6" { (value) }
                            }
                        }
                    }
                }
            }

            h2 class="h5 mt-4" { "Quick add quiz" }
            @if subjects.is_empty() {
                p.text-muted { "Add a subject and a chapter first." }
            } @else {
                // Chapters are filled in by app.js from /admin/api/chapters/{subject_id}
                form method="post" action="/admin/quiz/add" {
                    div class="row g-2" {
                        div class="col-md-3" {
                            select.form-select id="subjectSelect" aria-label="Subject" {
                                @for subject in subjects {
                                    option value=(subject.id) { (subject.name) }
                                }
                            }
                        }
                        div class="col-md-3" {
                            select.form-select id="chapterSelect" name="chapter_id" aria-label="Chapter" required {}
                        }
                        div class="col-md-2" {
                            input.form-control type="number" min="1" name="duration" placeholder="Minutes" required;
                        }
                        div class="col-md-3" {
                            input.form-control name="remarks" placeholder="Remarks";
                        }
                        div class="col-md-1" {
                            button.btn.btn-primary type="submit" { "Create" }
                        }
                    }
                }
            }
        },
    )
}

pub fn subjects(page: &Page<'_>, subjects: &[Subject]) -> Markup {
    layout(
        page,
        "Subjects",
        html! {
            h1 class="h3 mb-3" { "Subjects" }
            table.table.table-striped {
                thead { tr { th { "Name" } th { "Description" } th {} } }
                tbody {
                    @for subject in subjects {
                        tr {
                            td { a href={ "/admin/chapters/" (subject.id) } { (subject.name) } }
                            td { (subject.description) }
                            td.text-end {
                                (delete_button(
                                    &format!("/admin/subject/{}/delete", subject.id),
                                    "Delete this subject with all its chapters, quizzes and questions?",
                                ))
                            }
                        }
                    }
                    @if subjects.is_empty() {
                        tr { td colspan="3" class="text-muted" { "No subjects yet." } }
                    }
                }
            }
            h2 class="h5 mt-4" { "Add subject" }
            form method="post" action="/admin/subject/add" {
                div class="mb-2" { input.form-control name="name" placeholder="Name" required; }
                div class="mb-2" { textarea.form-control name="description" placeholder="Description" {} }
                button.btn.btn-primary type="submit" { "Add subject" }
            }
        },
    )
}

pub fn chapters(page: &Page<'_>, subject: &Subject, chapters: &[Chapter]) -> Markup {
    layout(
        page,
        &subject.name,
        html! {
            nav aria-label="breadcrumb" {
                ol.breadcrumb {
                    li.breadcrumb-item { a href="/admin/subjects" { "Subjects" } }
                    li.breadcrumb-item.active { (subject.name) }
                }
            }
            h1 class="h3 mb-3" { "Chapters of " (subject.name) }
            table.table.table-striped {
                thead { tr { th { "Name" } th { "Description" } th {} } }
                tbody {
                    @for chapter in chapters {
                        tr {
                            td { a href={ "/admin/quizzes/" (chapter.id) } { (chapter.name) } }
                            td { (chapter.description) }
                            td.text-end {
                                (delete_button(
                                    &format!("/admin/chapter/{}/delete", chapter.id),
                                    "Delete this chapter with all its quizzes?",
                                ))
                            }
                        }
                    }
                    @if chapters.is_empty() {
                        tr { td colspan="3" class="text-muted" { "No chapters yet." } }
                    }
                }
            }
            h2 class="h5 mt-4" { "Add chapter" }
            form method="post" action="/admin/chapter/add" {
                input type="hidden" name="subject_id" value=(subject.id);
                div class="mb-2" { input.form-control name="name" placeholder="Name" required; }
                div class="mb-2" { textarea.form-control name="description" placeholder="Description" {} }
                button.btn.btn-primary type="submit" { "Add chapter" }
            }
        },
    )
}

pub fn quizzes(
    page: &Page<'_>,
    subject: &Subject,
    chapter: &Chapter,
    quizzes: &[QuizSummary],
) -> Markup {
    layout(
        page,
        &chapter.name,
        html! {
            nav aria-label="breadcrumb" {
                ol.breadcrumb {
                    li.breadcrumb-item { a href="/admin/subjects" { "Subjects" } }
                    li.breadcrumb-item { a href={ "/admin/chapters/" (subject.id) } { (subject.name) } }
                    li.breadcrumb-item.active { (chapter.name) }
                }
            }
            h1 class="h3 mb-3" { "Quizzes of " (chapter.name) }
            table.table.table-striped {
                thead { tr { th { "Quiz" } th { "Duration" } th { "Questions" } th { "Remarks" } th {} } }
                tbody {
                    @for quiz in quizzes {
                        tr {
                            td { a href={ "/admin/quiz/" (quiz.id) "/questions" } { "Quiz #" (quiz.id) } }
                            td { (quiz.time_duration) " min" }
                            td { (quiz.question_count) }
                            td { (quiz.remarks) }
                            td.text-end {
                                (delete_button(
                                    &format!("/admin/quiz/{}/delete", quiz.id),
                                    "Delete this quiz with its questions and scores?",
                                ))
                            }
                        }
                    }
                    @if quizzes.is_empty() {
                        tr { td colspan="5" class="text-muted" { "No quizzes yet." } }
                    }
                }
            }
            h2 class="h5 mt-4" { "Add quiz" }
            form method="post" action="/admin/quiz/add" {
                input type="hidden" name="chapter_id" value=(chapter.id);
                div class="mb-2" {
                    input.form-control type="number" min="1" name="duration" placeholder="Duration (minutes)" required;
                }
                div class="mb-2" { textarea.form-control name="remarks" placeholder="Remarks" {} }
                button.btn.btn-primary type="submit" { "Create quiz" }
            }
        },
    )
}

pub fn questions(page: &Page<'_>, quiz: &QuizDetail, questions: &[Question]) -> Markup {
    layout(
        page,
        "Questions",
        html! {
            nav aria-label="breadcrumb" {
                ol.breadcrumb {
                    li.breadcrumb-item { a href="/admin/subjects" { "Subjects" } }
                    li.breadcrumb-item { a href={ "/admin/chapters/" (quiz.subject_id) } { (quiz.subject_name) } }
                    li.breadcrumb-item { a href={ "/admin/quizzes/" (quiz.chapter_id) } { (quiz.chapter_name) } }
                    li.breadcrumb-item.active { "Quiz #" (quiz.id) }
                }
            }
            h1 class="h3 mb-1" { "Quiz #" (quiz.id) }
            p.text-muted { (quiz.time_duration) " minutes. " (quiz.remarks) }
            @for (number, question) in questions.iter().enumerate() {
                div class="card mb-3" {
                    div.card-body {
                        div class="d-flex justify-content-between" {
                            h2 class="h6" { (number + 1) ". " (question.statement) }
                            (delete_button(
                                &format!("/admin/question/{}/delete", question.id),
                                "Delete this question?",
                            ))
                        }
                        ol class="mb-0" {
                            @for (slot, text) in question.options() {
                                @if slot == question.correct_option {
                                    li.fw-bold { (text) " (correct)" }
                                } @else {
                                    li { (text) }
                                }
                            }
                        }
                    }
                }
            }
            @if questions.is_empty() {
                p.text-muted { "No questions yet." }
            }
            h2 class="h5 mt-4" { "Add question" }
            form method="post" action="/admin/question/add" {
                input type="hidden" name="quiz_id" value=(quiz.id);
                div class="mb-2" { textarea.form-control name="statement" placeholder="Question statement" required {} }
                div class="mb-2" { input.form-control name="option1" placeholder="Option 1" required; }
                div class="mb-2" { input.form-control name="option2" placeholder="Option 2" required; }
                div class="mb-2" { input.form-control name="option3" placeholder="Option 3 (optional)"; }
                div class="mb-2" { input.form-control name="option4" placeholder="Option 4 (optional)"; }
                div class="mb-2" {
                    label.form-label for="correct_option" { "Correct option" }
                    select.form-select id="correct_option" name="correct_option" {
                        @for slot in 1..=4 {
                            option value=(slot) { "Option " (slot) }
                        }
                    }
                }
                button.btn.btn-primary type="submit" { "Add question" }
            }
        },
    )
}

pub fn users(page: &Page<'_>, users: &[User]) -> Markup {
    layout(
        page,
        "Users",
        html! {
            h1 class="h3 mb-3" { "Users" }
            table.table.table-striped {
                thead { tr { th { "Username" } th { "Full name" } th { "Email" } th {} } }
                tbody {
                    @for user in users {
                        tr {
                            td { (user.username) }
                            td { (user.full_name) }
                            td { (user.email) }
                            td.text-end {
                                (delete_button(
                                    &format!("/admin/user/{}/delete", user.id),
                                    "Delete this user and their scores?",
                                ))
                            }
                        }
                    }
                    @if users.is_empty() {
                        tr { td colspan="4" class="text-muted" { "No users registered." } }
                    }
                }
            }
        },
    )
}

pub fn scores(page: &Page<'_>, scores: &[ScoreRecord]) -> Markup {
    layout(
        page,
        "Scores",
        html! {
            h1 class="h3 mb-3" { "All attempts" }
            table.table.table-striped {
                thead {
                    tr { th { "When" } th { "User" } th { "Subject" } th { "Chapter" } th { "Quiz" } th { "Score" } th { "%" } }
                }
                tbody {
                    @for score in scores {
                        tr {
                            td { (timestamp(&score.timestamp)) }
                            td { (score.username) }
                            td { (score.subject_name) }
                            td { (score.chapter_name) }
                            td { "Quiz #" (score.quiz_id) }
                            td { (score.total_scored) "/" (score.total_questions) }
                            td { (percent(score.percentage())) }
                        }
                    }
                    @if scores.is_empty() {
                        tr { td colspan="7" class="text-muted" { "No attempts yet." } }
                    }
                }
            }
        },
    )
}
