use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::db::Page;

/// A question as clients see it, labelled with its category's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
    pub category_id: i64,
}

/// Flat row of the questions table, used for seeding and dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub difficulty: i64,
}

const SELECT_QUESTION: &str = r#"
SELECT q.id, q.question, q.answer, c.type AS category, q.difficulty, q.category_id
FROM questions q JOIN categories c ON c.id = q.category_id
"#;

pub async fn get_questions_page(pool: &SqlitePool, page: Page) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_QUESTION} ORDER BY q.id LIMIT ?1 OFFSET ?2"
    ))
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
    page: Page,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_QUESTION} WHERE q.category_id = ?1 ORDER BY q.id LIMIT ?2 OFFSET ?3"
    ))
    .bind(category_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await
}

// SQLite's LIKE only folds ASCII, so both sides are lowercased in Rust instead.
// Wildcards in the term are matched literally.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        r#"{SELECT_QUESTION} WHERE q.question_folded LIKE '%' || ?1 || '%' ESCAPE '\' ORDER BY q.id"#
    ))
    .bind(escape_like(&fold(term)))
    .fetch_all(pool)
    .await
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Picks one question of the category uniformly at random, skipping `exclude`.
///
/// The excluded ids travel as a single JSON array parameter, so the list length
/// is not bounded by SQLite's host parameter limit.
pub async fn get_random_question(
    pool: &SqlitePool,
    category_id: i64,
    exclude: &[i64],
) -> sqlx::Result<Option<Question>> {
    let exclude = serde_json::to_string(exclude).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    sqlx::query_as::<_, Question>(&format!(
        r#"{SELECT_QUESTION}
WHERE q.category_id = ?1 AND q.id NOT IN (SELECT value FROM json_each(?2))
ORDER BY RANDOM() LIMIT 1"#
    ))
    .bind(category_id)
    .bind(exclude)
    .fetch_optional(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTION} WHERE q.id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, question_folded, answer, category_id, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&question.question)
    .bind(fold(&question.question))
    .bind(&question.answer)
    .bind(question.category_id)
    .bind(question.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns whether a row was actually removed.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let mut conn = pool.acquire().await?;

    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(deleted > 0)
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<QuestionRecord>> {
    sqlx::query_as::<_, QuestionRecord>(
        r#"
        SELECT id, question, answer, category_id, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<QuestionRecord>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        let folded = fold(&question.question);
        sqlx::query(
            r#"
INSERT INTO questions (id, question, question_folded, answer, category_id, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT (id) DO UPDATE SET
    question = excluded.question,
    question_folded = excluded.question_folded,
    answer = excluded.answer,
    category_id = excluded.category_id,
    difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(folded)
        .bind(question.answer)
        .bind(question.category_id)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
