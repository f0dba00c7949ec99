use std::future::Future;

use anyhow::Context;
use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Page, Question};

/// Storage operations the HTTP layer is written against.
///
/// Everything goes in and comes out as plain records, so a test can hand the
/// router an in-memory implementation instead of a database.
pub trait TriviaRepository: Clone + Send + Sync + 'static {
    /// All categories ordered by their type label.
    fn categories(&self) -> impl Future<Output = anyhow::Result<Vec<Category>>> + Send;

    fn category(&self, id: i64) -> impl Future<Output = anyhow::Result<Option<Category>>> + Send;

    fn questions(&self, page: Page) -> impl Future<Output = anyhow::Result<Vec<Question>>> + Send;

    fn questions_in_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> impl Future<Output = anyhow::Result<Vec<Question>>> + Send;

    /// Case-insensitive substring match against the question text. Not paginated.
    fn search_questions(
        &self,
        term: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<Question>>> + Send;

    /// A uniformly random question of the category whose id is not in `exclude`,
    /// or `None` once the category is exhausted.
    fn random_question(
        &self,
        category_id: i64,
        exclude: &[i64],
    ) -> impl Future<Output = anyhow::Result<Option<Question>>> + Send;

    fn count_questions(&self) -> impl Future<Output = anyhow::Result<i64>> + Send;

    fn question(&self, id: i64) -> impl Future<Output = anyhow::Result<Option<Question>>> + Send;

    fn insert_question(
        &self,
        question: NewQuestion,
    ) -> impl Future<Output = anyhow::Result<Question>> + Send;

    /// Returns `false` when there was nothing to delete.
    fn delete_question(&self, id: i64) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TriviaRepository for SqliteRepository {
    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    async fn category(&self, id: i64) -> anyhow::Result<Option<Category>> {
        Ok(categories::get_category(&self.pool, id).await?)
    }

    async fn questions(&self, page: Page) -> anyhow::Result<Vec<Question>> {
        Ok(questions::get_questions_page(&self.pool, page).await?)
    }

    async fn questions_in_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> anyhow::Result<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category_id, page).await?)
    }

    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn random_question(
        &self,
        category_id: i64,
        exclude: &[i64],
    ) -> anyhow::Result<Option<Question>> {
        Ok(questions::get_random_question(&self.pool, category_id, exclude).await?)
    }

    async fn count_questions(&self) -> anyhow::Result<i64> {
        Ok(questions::count_questions(&self.pool).await?)
    }

    async fn question(&self, id: i64) -> anyhow::Result<Option<Question>> {
        Ok(questions::get_question_by_id(&self.pool, id).await?)
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
        let id = questions::create_question(&self.pool, &question).await?;
        questions::get_question_by_id(&self.pool, id)
            .await?
            .with_context(|| format!("Question {id} vanished right after insert"))
    }

    async fn delete_question(&self, id: i64) -> anyhow::Result<bool> {
        Ok(questions::delete_question(&self.pool, id).await?)
    }
}
