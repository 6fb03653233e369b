// src/views/mod.rs

//! Server-side rendered pages.

pub mod admin;
pub mod auth;
pub mod user;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, html};

use crate::{models::user::CurrentUser, utils::flash::Flash};

/// Per-request chrome shared by every page: who is logged in and the pending flash.
pub struct Page<'a> {
    pub user: Option<&'a CurrentUser>,
    pub flash: Option<Flash>,
}

impl<'a> Page<'a> {
    pub fn new(user: Option<&'a CurrentUser>, flash: Option<Flash>) -> Self {
        Self { user, flash }
    }
}

pub fn layout(page: &Page<'_>, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Quiz Master" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
            }
            body {
                (navbar(page.user))
                main class="container py-4" {
                    @if let Some(flash) = &page.flash {
                        div class={ "alert alert-" (flash.level.as_str()) } role="alert" { (flash.message) }
                    }
                    (content)
                }
                script src="/static/js/app.js" {}
            }
        }
    }
}

fn navbar(user: Option<&CurrentUser>) -> Markup {
    html! {
        nav.navbar.navbar-expand.navbar-dark.bg-dark {
            div.container {
                a.navbar-brand href="/" { "Quiz Master" }
                ul class="navbar-nav me-auto" {
                    @match user {
                        Some(user) if user.is_admin => {
                            li.nav-item { a.nav-link href="/admin/dashboard" { "Dashboard" } }
                            li.nav-item { a.nav-link href="/admin/subjects" { "Subjects" } }
                            li.nav-item { a.nav-link href="/admin/users" { "Users" } }
                            li.nav-item { a.nav-link href="/admin/scores" { "Scores" } }
                        }
                        Some(_) => {
                            li.nav-item { a.nav-link href="/user/dashboard" { "Dashboard" } }
                            li.nav-item { a.nav-link href="/user/scores" { "My scores" } }
                        }
                        None => {
                            li.nav-item { a.nav-link href="/auth/login" { "Log in" } }
                            li.nav-item { a.nav-link href="/auth/register" { "Register" } }
                        }
                    }
                }
                @if let Some(user) = user {
                    span class="navbar-text me-3" { (user.full_name) }
                    form method="post" action="/auth/logout" {
                        button.btn.btn-outline-light.btn-sm type="submit" { "Log out" }
                    }
                }
            }
        }
    }
}

/// Standalone page for `AppError` responses.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let page = Page::new(None, None);
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(
        &page,
        reason,
        html! {
            h1 { (status.as_u16()) " " (reason) }
            p.lead { (message) }
            a href="/" { "Back to the dashboard" }
        },
    )
}

/// Small inline POST form used for every delete button.
pub(crate) fn delete_button(action: &str, confirm: &str) -> Markup {
    html! {
        form.d-inline method="post" action=(action) onsubmit={ "return confirm('" (confirm) "');" } {
            button.btn.btn-sm.btn-outline-danger type="submit" { "Delete" }
        }
    }
}

pub(crate) fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub(crate) fn percent(value: f64) -> String {
    format!("{value:.2}%")
}
