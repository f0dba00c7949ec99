use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::db::{NewQuestion, Page};

use super::envelope::ApiError;

/// Decodes a raw request body; anything that is not the expected JSON is a malformed request.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::debug!("Rejected request body: {error}");
        ApiError::MalformedRequest
    })
}

impl NewQuestion {
    /// Every field is required and must already have its JSON type: strings are
    /// never read as numbers or the other way round.
    pub fn from_payload(payload: &Value) -> Result<Self, ApiError> {
        let fields = payload.as_object().ok_or(ApiError::MalformedRequest)?;
        Ok(NewQuestion {
            question: string_field(fields, "question")?,
            answer: string_field(fields, "answer")?,
            category_id: integer_field(fields, "category_id")?,
            difficulty: integer_field(fields, "difficulty")?,
        })
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<String, ApiError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ApiError::MalformedRequest)
}

fn integer_field(fields: &Map<String, Value>, name: &str) -> Result<i64, ApiError> {
    fields
        .get(name)
        .and_then(Value::as_i64)
        .ok_or(ApiError::MalformedRequest)
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, ApiError> {
        match self.page {
            None => Ok(Page::default()),
            Some(number) => Page::new(number).ok_or(ApiError::MalformedRequest),
        }
    }
}

/// Path ids that are not integers name nothing that could exist.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}
