pub mod queries;
mod repository;
pub mod seed;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
pub(crate) mod memory;

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question, QuestionRecord};
pub use repository::{SqliteRepository, TriviaRepository};

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// A 1-based, fixed-size slice of a question listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Option<Self> {
        (number >= 1).then_some(Page(number))
    }

    pub fn offset(self) -> i64 {
        (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }

    pub fn limit(self) -> i64 {
        QUESTIONS_PER_PAGE
    }
}

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

pub async fn establish_connection(url: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// Every connection to `sqlite::memory:` opens its own database, so the pool is pinned to one.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    queries::categories::import_categories(&pool, fixtures::categories())
        .await
        .unwrap();
    queries::questions::import_questions(&pool, fixtures::questions())
        .await
        .unwrap();
    pool
}
