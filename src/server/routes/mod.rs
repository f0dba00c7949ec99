mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use serde::{Serialize, Serializer};

use crate::db::{Category, Question, TriviaRepository};

use super::envelope::{ApiError, Envelope};

pub type ApiResponse<T> = Result<Envelope<T>, ApiError>;

/// Payload shared by every question listing.
#[derive(Debug, Serialize)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    /// Count of every stored question, whatever filter produced `questions`.
    pub total_questions: i64,
    pub current_category: CurrentCategory,
    pub categories: Vec<Category>,
}

#[derive(Debug)]
pub enum CurrentCategory {
    /// Serialized as `""`.
    Unfiltered,
    Category(Category),
}

impl Serialize for CurrentCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CurrentCategory::Unfiltered => serializer.serialize_str(""),
            CurrentCategory::Category(category) => category.serialize(serializer),
        }
    }
}

async fn question_listing<R: TriviaRepository>(
    repo: &R,
    questions: Vec<Question>,
    current_category: CurrentCategory,
) -> Result<QuestionListing, ApiError> {
    Ok(QuestionListing {
        questions,
        total_questions: repo.count_questions().await?,
        current_category,
        categories: repo.categories().await?,
    })
}
