use prometheus::{register_counter_vec, register_int_counter};
use prometheus::{CounterVec, IntCounter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_ROUNDS: CounterVec = register_counter_vec!(
        "trivia_quiz_rounds_total",
        "Number of quiz rounds played",
        &["category", "outcome"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED: IntCounter = register_int_counter!(
        "trivia_questions_created_total",
        "Number of questions created through the API"
    )
    .unwrap();
}

const DEFAULT_LOG_LEVEL: &str = "info";

/// Builds the filter from `LOG_LEVEL`; a missing or unparsable value means `info`.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn span_events(flag: Option<&str>) -> FmtSpan {
    if flag.is_some_and(|value| value.eq_ignore_ascii_case("true")) {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    }
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let spans = std::env::var("INCLUDE_SPAN_EVENTS").ok();

    tracing_subscriber::registry()
        .with(env_filter(level.as_deref()))
        .with(fmt::layer().with_span_events(span_events(spans.as_deref())))
        .init();
}
