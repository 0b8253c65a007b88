use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .busy_timeout(Duration::from_secs(5))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .pragma("cache_size", "-20000")
        .pragma("temp_store", "memory"))
}

/// Read pool. Opens the database read-only, so the write pool must have
/// created it first.
pub async fn create_read_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(max_connections, "created read-only pool");

    Ok(pool)
}

/// Write pool limited to a single connection; every transaction goes through it.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    tracing::info!("created read-write pool with 1 max connection");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use sqlx_migrator::{Migrate, Plan};
    use temp_dir::TempDir;

    use super::*;

    #[tokio::test]
    async fn migrations_apply_on_fresh_database() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.child("db.sqlite3");
        let url = format!("sqlite:{}", path.display());

        let write = create_write_pool(&url).await?;
        let mut conn = write.acquire().await?;
        crate::migrator::<sqlx::Sqlite>()?
            .run(&mut conn, &Plan::apply_all())
            .await?;
        drop(conn);

        let read = create_read_pool(&url, 2).await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipe")
            .fetch_one(&read)
            .await?;
        assert_eq!(count, 0);

        let (fk,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&write)
            .await?;
        assert_eq!(fk, 1);

        Ok(())
    }
}
