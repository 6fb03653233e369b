// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::CurrentUser,
    repo,
    state::AppState,
    utils::flash::{self, Flash},
};

/// Name of the cookie holding the login token.
pub const TOKEN_COOKIE: &str = "token";

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    /// User's role at login time ('user' or 'admin'). Informational only:
    /// the guards re-read the admin flag from the database.
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a new JWT for the user.
pub fn sign_jwt(
    id: i64,
    role: &str,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: id.to_string(),
        role: role.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// The login cookie. An empty value is used when removing it.
pub fn token_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

fn login_redirect(jar: CookieJar, message: &str) -> Response {
    flash::redirect(jar, "/auth/login", Flash::info(message)).into_response()
}

/// Axum Middleware: Authentication.
///
/// Takes the token from the `token` cookie, falling back to an
/// `Authorization: Bearer <token>` header. A valid token whose user still
/// exists puts a `CurrentUser` into the request extensions. Anything else
/// redirects to the login page.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
        .or_else(|| bearer_token(req.headers()));

    let Some(token) = token else {
        return login_redirect(jar, "Please log in to access this page.");
    };

    let user_id = match verify_jwt(&token, &state.config.jwt_secret)
        .ok()
        .and_then(|claims| claims.sub.parse::<i64>().ok())
    {
        Some(id) => id,
        None => {
            return login_redirect(
                jar.remove(token_cookie(String::new())),
                "Your session has expired. Please log in again.",
            );
        }
    };

    // The connection goes back to the pool before the handler runs.
    let user = {
        let mut conn = match state.pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => return AppError::from(e).into_response(),
        };
        match repo::users::find_by_id(&mut conn, user_id).await {
            Ok(user) => user,
            Err(e) => return AppError::from(e).into_response(),
        }
    };

    let Some(user) = user else {
        tracing::warn!(user_id, "Token refers to a user that no longer exists");
        return login_redirect(
            jar.remove(token_cookie(String::new())),
            "Please log in to access this page.",
        );
    };

    req.extensions_mut().insert(CurrentUser::from(user));
    next.run(req).await
}

/// Axum Middleware: Admin Authorization.
///
/// Must be used AFTER `auth_middleware`. Non-admins are sent to their own
/// dashboard with a flash; the admin handler never runs.
pub async fn admin_middleware(jar: CookieJar, req: Request<Body>, next: Next) -> Response {
    let Some(user) = req.extensions().get::<CurrentUser>() else {
        return login_redirect(jar, "Please log in to access this page.");
    };

    if !user.is_admin {
        tracing::warn!(user_id = user.id, path = %req.uri().path(), "Unauthorized admin access");
        return flash::redirect(jar, "/user/dashboard", Flash::danger("Unauthorized access"))
            .into_response();
    }

    next.run(req).await
}
