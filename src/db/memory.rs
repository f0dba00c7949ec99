use std::sync::{Arc, Mutex, MutexGuard};

use rand::seq::SliceRandom;

use super::{fixtures, Category, NewQuestion, Page, Question, QuestionRecord, TriviaRepository};

/// Vec-backed stand-in for the database, used by the route tests.
#[derive(Clone)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

struct Tables {
    categories: Vec<Category>,
    questions: Vec<QuestionRecord>,
    last_id: i64,
}

impl Tables {
    fn label(&self, record: &QuestionRecord) -> Question {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == record.category_id)
            .map(|c| c.kind.clone())
            .unwrap_or_default();
        Question {
            id: record.id,
            question: record.question.clone(),
            answer: record.answer.clone(),
            category,
            difficulty: record.difficulty,
            category_id: record.category_id,
        }
    }

    fn labelled<'a>(&self, records: impl Iterator<Item = &'a QuestionRecord>) -> Vec<Question> {
        records.map(|r| self.label(r)).collect()
    }
}

fn page_of<'a>(
    records: impl Iterator<Item = &'a QuestionRecord>,
    page: Page,
) -> impl Iterator<Item = &'a QuestionRecord> {
    records
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
}

impl InMemoryRepository {
    pub fn with_fixtures() -> Self {
        let questions = fixtures::questions();
        let last_id = questions.iter().map(|q| q.id).max().unwrap_or(0);
        Self {
            tables: Arc::new(Mutex::new(Tables {
                categories: fixtures::categories(),
                questions,
                last_id,
            })),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

impl TriviaRepository for InMemoryRepository {
    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        let mut categories = self.tables().categories.clone();
        categories.sort_by(|a, b| a.kind.cmp(&b.kind).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn category(&self, id: i64) -> anyhow::Result<Option<Category>> {
        Ok(self.tables().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn questions(&self, page: Page) -> anyhow::Result<Vec<Question>> {
        let tables = self.tables();
        Ok(tables.labelled(page_of(tables.questions.iter(), page)))
    }

    async fn questions_in_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> anyhow::Result<Vec<Question>> {
        let tables = self.tables();
        let in_category = tables
            .questions
            .iter()
            .filter(|q| q.category_id == category_id);
        Ok(tables.labelled(page_of(in_category, page)))
    }

    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>> {
        let term = term.to_lowercase();
        let tables = self.tables();
        let matching = tables
            .questions
            .iter()
            .filter(|q| q.question.to_lowercase().contains(&term));
        Ok(tables.labelled(matching))
    }

    async fn random_question(
        &self,
        category_id: i64,
        exclude: &[i64],
    ) -> anyhow::Result<Option<Question>> {
        let tables = self.tables();
        let candidates: Vec<&QuestionRecord> = tables
            .questions
            .iter()
            .filter(|q| q.category_id == category_id && !exclude.contains(&q.id))
            .collect();
        Ok(candidates
            .choose(&mut rand::thread_rng())
            .map(|q| tables.label(q)))
    }

    async fn count_questions(&self) -> anyhow::Result<i64> {
        Ok(self.tables().questions.len() as i64)
    }

    async fn question(&self, id: i64) -> anyhow::Result<Option<Question>> {
        let tables = self.tables();
        Ok(tables
            .questions
            .iter()
            .find(|q| q.id == id)
            .map(|q| tables.label(q)))
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<Question> {
        let mut tables = self.tables();
        anyhow::ensure!(
            tables.categories.iter().any(|c| c.id == question.category_id),
            "Unknown category {}",
            question.category_id
        );
        tables.last_id += 1;
        let record = QuestionRecord {
            id: tables.last_id,
            question: question.question,
            answer: question.answer,
            category_id: question.category_id,
            difficulty: question.difficulty,
        };
        let created = tables.label(&record);
        tables.questions.push(record);
        Ok(created)
    }

    async fn delete_question(&self, id: i64) -> anyhow::Result<bool> {
        let mut tables = self.tables();
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() < before)
    }
}
