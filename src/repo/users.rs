// src/repo/users.rs

use sqlx::SqliteConnection;

use crate::models::user::{NewUser, User};

const USER_COLUMNS: &str = "id, username, email, password, full_name, is_admin";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn admin_exists(conn: &mut SqliteConnection) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = TRUE")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

/// Inserts a user and returns the new id.
/// A duplicate username or email surfaces as a unique violation.
pub async fn insert(conn: &mut SqliteConnection, user: &NewUser) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, password, full_name, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.full_name)
    .bind(user.is_admin)
    .fetch_one(&mut *conn)
    .await
}

/// Non-admin accounts, ordered by username.
pub async fn list_learners(conn: &mut SqliteConnection) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE is_admin = FALSE ORDER BY username"
    ))
    .fetch_all(&mut *conn)
    .await
}

pub async fn count_learners(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = FALSE")
        .fetch_one(&mut *conn)
        .await
}

/// Deletes a user together with their scores.
/// Returns `false` when no such user exists.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    sqlx::query("DELETE FROM scores WHERE user_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
