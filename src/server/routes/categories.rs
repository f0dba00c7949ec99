use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};

use crate::{
    db::{Category, TriviaRepository},
    server::{
        envelope::{ApiError, Envelope},
        validation::{parse_id, PageQuery},
    },
};

use super::{question_listing, ApiResponse, CurrentCategory, QuestionListing};

async fn get_categories<R: TriviaRepository>(State(repo): State<R>) -> ApiResponse<Vec<Category>> {
    Ok(Envelope::ok(repo.categories().await?))
}

// An empty page is fine here, only an unknown category is a 404.
async fn category_questions<R: TriviaRepository>(
    State(repo): State<R>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionListing> {
    let id = parse_id(&id)?;
    let category = repo.category(id).await?.ok_or(ApiError::NotFound)?;
    let questions = repo.questions_in_category(id, query.page()?).await?;
    let listing =
        question_listing(&repo, questions, CurrentCategory::Category(category)).await?;
    Ok(Envelope::ok(listing))
}

pub fn category_router<R: TriviaRepository>(repo: R) -> Router {
    Router::new()
        .route("/categories", get(get_categories::<R>))
        .route("/categories/{id}/questions", get(category_questions::<R>))
        .with_state(repo)
}
