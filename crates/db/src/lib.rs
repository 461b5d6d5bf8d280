//! Persistence layer for the movie/actor catalog.
//!
//! - [`models`] -- typed rows and request DTOs.
//! - [`repositories`] -- parameterized SQL per table.
//! - [`relation_sync`] -- validated, transactional changes to a movie's cast.
//! - [`with_transaction`] -- the one place transactions are opened and closed.

use std::future::Future;
use std::pin::Pin;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgConnection;

pub mod error;
pub mod models;
pub mod relation_sync;
pub mod repositories;

pub use error::ServiceError;

pub type DbPool = sqlx::PgPool;

/// Default pool size when `DB_MAX_CONNECTIONS` is not configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Boxed future returned by a transaction body.
pub type TxFuture<'t, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 't>>;

/// Run `body` inside a single database transaction.
///
/// Commits when `body` returns `Ok`, rolls back when it returns `Err`. If the
/// surrounding future is dropped before completion (request timeout, client
/// disconnect) the uncommitted transaction is rolled back when it goes out of
/// scope, so no partial state is ever visible to other connections.
///
/// Bodies should move owned inputs into the returned future:
///
/// ```ignore
/// let ids = ids.to_vec();
/// with_transaction(pool, move |conn| {
///     Box::pin(async move { MovieActorRepo::insert_pairs(conn, movie_id, &ids).await })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, E, F>(pool: &DbPool, body: F) -> Result<T, E>
where
    F: for<'t> FnOnce(&'t mut PgConnection) -> TxFuture<'t, T, E>,
    E: From<sqlx::Error>,
{
    let mut tx = pool.begin().await?;
    let outcome = body(&mut *tx).await;

    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
