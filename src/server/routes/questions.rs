use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    db::{NewQuestion, Question, TriviaRepository},
    server::{
        envelope::{ApiError, Envelope},
        validation::{parse_id, parse_json, PageQuery},
    },
    telemetry::QUESTIONS_CREATED,
};

use super::{question_listing, ApiResponse, CurrentCategory, QuestionListing};

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(default)]
    search_term: Option<String>,
}

async fn get_questions<R: TriviaRepository>(
    State(repo): State<R>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionListing> {
    let questions = repo.questions(query.page()?).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let listing = question_listing(&repo, questions, CurrentCategory::Unfiltered).await?;
    Ok(Envelope::ok(listing))
}

async fn create_question<R: TriviaRepository>(
    State(repo): State<R>,
    body: Bytes,
) -> ApiResponse<Question> {
    let payload: Value = parse_json(&body)?;
    let new_question = NewQuestion::from_payload(&payload)?;
    if repo.category(new_question.category_id).await?.is_none() {
        tracing::debug!(
            "Refusing question for unknown category {}",
            new_question.category_id
        );
        return Err(ApiError::UnprocessableEntity);
    }
    let question = repo.insert_question(new_question).await?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {}", question.id);
    Ok(Envelope::created(question))
}

async fn delete_question<R: TriviaRepository>(
    State(repo): State<R>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if !repo.delete_question(id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(StatusCode::NO_CONTENT)
}

// Not paginated, and an empty match is still a success.
async fn search_questions<R: TriviaRepository>(
    State(repo): State<R>,
    body: Bytes,
) -> ApiResponse<QuestionListing> {
    let request: SearchRequest = parse_json(&body)?;
    let term = request.search_term.unwrap_or_default();
    let questions = repo.search_questions(&term).await?;
    let listing = question_listing(&repo, questions, CurrentCategory::Unfiltered).await?;
    Ok(Envelope::ok(listing))
}

pub fn questions_router<R: TriviaRepository>(repo: R) -> Router {
    Router::new()
        .route(
            "/questions",
            get(get_questions::<R>).post(create_question::<R>),
        )
        .route("/questions/search", post(search_questions::<R>))
        .route("/questions/{id}", delete(delete_question::<R>))
        .with_state(repo)
}
