pub mod models;
pub mod repositories;

use anyhow::Context;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

/// Create the database if it does not exist yet (no-op if it already does).
///
/// Must run before `create_pool`: connecting a pool to a missing database
/// fails, so the existence check happens over the maintenance connection sqlx
/// opens here.
pub async fn ensure_database(database_url: &str) -> anyhow::Result<()> {
    if !Postgres::database_exists(database_url).await? {
        Postgres::create_database(database_url).await?;
    }
    Ok(())
}

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Run the migrations bundled at compile time from this crate's `migrations/` folder.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run migrations")?;
    Ok(())
}
