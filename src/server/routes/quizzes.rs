use axum::{body::Bytes, extract::State, routing::post, Router};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::{
    db::{Question, TriviaRepository},
    server::{
        envelope::{ApiError, Envelope},
        validation::parse_json,
    },
    telemetry::QUIZ_ROUNDS,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRound {
    quiz_category: QuizCategory,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

// Clients send the category they got from /categories, sometimes with the id as a string.
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

async fn play_quiz<R: TriviaRepository>(
    State(repo): State<R>,
    body: Bytes,
) -> ApiResponse<Question> {
    let round: QuizRound = parse_json(&body)?;
    let category = repo
        .category(round.quiz_category.id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let previous = round.previous_questions.unwrap_or_default();

    match repo.random_question(category.id, &previous).await? {
        Some(question) => {
            QUIZ_ROUNDS
                .with_label_values(&[category.kind.as_str(), "served"])
                .inc();
            Ok(Envelope::ok(question))
        }
        None => {
            QUIZ_ROUNDS
                .with_label_values(&[category.kind.as_str(), "exhausted"])
                .inc();
            tracing::debug!(
                "No question left in category {} after {} rounds",
                category.id,
                previous.len()
            );
            Err(ApiError::NotFound)
        }
    }
}

pub fn quizzes_router<R: TriviaRepository>(repo: R) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz::<R>))
        .with_state(repo)
}
