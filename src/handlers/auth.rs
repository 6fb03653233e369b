// src/handlers/auth.rs

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    config::Config,
    db::Tx,
    error::AppError,
    models::user::{LoginForm, NewUser, RegisterForm},
    repo,
    utils::{
        flash::{self, Flash},
        hash::{hash_password, verify_password},
        jwt::{sign_jwt, token_cookie},
    },
    views::{self, Page},
};

pub async fn index() -> Redirect {
    Redirect::to("/user/dashboard")
}

pub async fn login_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, views::auth::login(&Page::new(None, flash)))
}

pub async fn register_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, views::auth::register(&Page::new(None, flash)))
}

/// Registers a new learner account.
///
/// Hashes the password using Argon2 before storing it.
/// Duplicate usernames or emails are reported through a flash, not an error page.
pub async fn register(
    jar: CookieJar,
    mut tx: Tx,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let form = form.trimmed();
    if let Err(validation_errors) = form.validate() {
        return Ok(flash::redirect(
            jar,
            "/auth/register",
            Flash::danger(validation_errors.to_string()),
        ));
    }

    let new_user = NewUser {
        username: form.username,
        email: form.email,
        password_hash: hash_password(&form.password)?,
        full_name: form.full_name,
        is_admin: false,
    };

    match repo::users::insert(&mut tx, &new_user).await {
        Ok(id) => {
            tx.commit().await?;
            tracing::info!(user_id = id, username = %new_user.username, "User registered");
            Ok(flash::redirect(
                jar,
                "/auth/login",
                Flash::success("Registration successful. Please log in."),
            ))
        }
        Err(e) if repo::is_unique_violation(&e) => Ok(flash::redirect(
            jar,
            "/auth/register",
            Flash::danger("Username or email is already registered"),
        )),
        Err(e) => {
            tracing::error!("Failed to register user: {:?}", e);
            Err(AppError::from(e))
        }
    }
}

/// Authenticates a user and stores a signed JWT in the `token` cookie.
pub async fn login(
    State(config): State<Config>,
    jar: CookieJar,
    mut tx: Tx,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = repo::users::find_by_username(&mut tx, form.username.trim()).await?;

    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password)?,
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::info!(username = %form.username.trim(), "Failed login attempt");
            return Ok(flash::redirect(
                jar,
                "/auth/login",
                Flash::danger("Invalid username or password"),
            ));
        }
    };

    let role = user.role();
    let token = sign_jwt(user.id, role, &config.jwt_secret, config.jwt_expiration)?;
    let target = if user.is_admin {
        "/admin/dashboard"
    } else {
        "/user/dashboard"
    };

    tracing::info!(user_id = user.id, role, "User logged in");
    Ok(flash::redirect(
        jar.add(token_cookie(token)),
        target,
        Flash::success(format!("Welcome back, {}!", user.full_name)),
    ))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    flash::redirect(
        jar.remove(token_cookie(String::new())),
        "/auth/login",
        Flash::info("You have been logged out."),
    )
}
