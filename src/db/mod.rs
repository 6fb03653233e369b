// src/db/mod.rs

mod tx;

pub use tx::Tx;

use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    config::Config,
    error::AppError,
    models::user::NewUser,
    repo,
    utils::hash::hash_password,
};

/// Whether the URL names an in-memory database.
pub fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the connection pool.
///
/// An in-memory database lives in its connection, so for such URLs the pool
/// is capped at one connection that is kept alive indefinitely. Every query
/// then sees the same database for the lifetime of the pool.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let max_connections = if is_in_memory(&config.database_url) {
        if config.database_max_connections != 1 {
            tracing::warn!(
                requested = config.database_max_connections,
                "In-memory database: using a single connection"
            );
        }
        1
    } else {
        config.database_max_connections
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Applies the migrations under `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Creates the configured admin account unless an admin already exists.
/// Returns whether a user was created.
pub async fn seed_admin(pool: &SqlitePool, config: &Config) -> Result<bool, AppError> {
    let mut conn = pool.acquire().await?;

    if repo::users::admin_exists(&mut conn).await? {
        return Ok(false);
    }

    tracing::info!("Seeding admin user: {}", config.admin_username);
    let admin = NewUser {
        username: config.admin_username.clone(),
        email: config.admin_email.clone(),
        password_hash: hash_password(&config.admin_password)?,
        full_name: "Administrator".to_string(),
        is_admin: true,
    };
    repo::users::insert(&mut conn, &admin).await?;
    tracing::info!("Admin user created successfully.");

    Ok(true)
}
