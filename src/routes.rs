// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, user},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "static";

/// Assembles the main application router.
///
/// * Public auth pages under `/auth`.
/// * Learner pages under `/user`, behind the auth guard.
/// * Content management under `/admin`, behind the auth guard and the admin guard.
/// * Static assets under `/static`.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout));

    let user_routes = Router::new()
        .route("/dashboard", get(user::dashboard))
        .route("/subject/{id}", get(user::view_subject))
        .route("/quiz/{id}", get(user::attempt_quiz).post(user::submit_quiz))
        .route("/quiz/{id}/result", get(user::quiz_result))
        .route("/scores", get(user::my_scores))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let admin_routes = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/subjects", get(admin::list_subjects))
        .route("/subject/add", post(admin::add_subject))
        .route("/subject/{id}/delete", post(admin::delete_subject))
        .route("/chapters/{subject_id}", get(admin::list_chapters))
        .route("/chapter/add", post(admin::add_chapter))
        .route("/chapter/{id}/delete", post(admin::delete_chapter))
        .route("/quizzes/{chapter_id}", get(admin::list_quizzes))
        .route("/quiz/add", post(admin::add_quiz))
        .route("/quiz/{id}/delete", post(admin::delete_quiz))
        .route(
            "/quiz/{id}/questions",
            get(admin::list_questions).post(admin::list_questions),
        )
        .route("/question/add", post(admin::add_question))
        .route("/question/{id}/delete", post(admin::delete_question))
        .route("/users", get(admin::list_users))
        .route("/user/{id}/delete", post(admin::delete_user))
        .route("/scores", get(admin::list_scores))
        .route("/api/chapters/{subject_id}", get(admin::api_chapters))
        // Auth first, then the admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(auth::index))
        .nest("/auth", auth_routes)
        .nest("/user", user_routes)
        .nest("/admin", admin_routes)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
