// src/db/tx.rs

use std::ops::{Deref, DerefMut};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::error::AppError;

/// Request-scoped unit of work.
///
/// Extracting `Tx` begins a transaction. The handler hands it to repository
/// functions (it derefs to `SqliteConnection`) and calls [`Tx::commit`] once
/// all statements succeeded. Dropping it without committing rolls back, so an
/// early return on a validation failure leaves no partial writes.
///
/// Holds a pooled connection for the whole request: handlers taking a `Tx`
/// must not also query the pool directly.
pub struct Tx(Transaction<'static, Sqlite>);

impl Tx {
    pub async fn begin(pool: &SqlitePool) -> Result<Self, AppError> {
        Ok(Self(pool.begin().await?))
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.0.commit().await?;
        Ok(())
    }
}

impl Deref for Tx {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Tx {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<S> FromRequestParts<S> for Tx
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = SqlitePool::from_ref(state);
        Tx::begin(&pool).await
    }
}
