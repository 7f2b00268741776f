//! Repository layer for database operations

pub mod books;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Executor, Pool, Sqlite,
};

use crate::{config::DatabaseConfig, error::AppResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    author TEXT,
    description TEXT
);
CREATE INDEX IF NOT EXISTS ix_books_title ON books (title);
CREATE INDEX IF NOT EXISTS ix_books_author ON books (author);
"#;

/// Open the connection pool, creating the database file if needed
pub async fn connect(config: &DatabaseConfig) -> AppResult<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create the books table and its indexes when they do not exist yet
pub async fn init_schema(pool: &Pool<Sqlite>) -> AppResult<()> {
    pool.execute(SCHEMA).await?;
    Ok(())
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query to check the database is reachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
