use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_questions_for_filter, Question},
    quiz::{select_next, CategoryFilter, Selection},
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
    },
    telemetry::QUIZ_QUESTIONS_CNTR,
};

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

// the frontend also sends `type`, which is not needed to pick a question
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    /// `None` once every question of the category was asked.
    question: Option<Question>,
    previous_questions: Vec<i64>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizBody>> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (Some(previous_questions), Some(category)) =
        (request.previous_questions, request.quiz_category)
    else {
        return Err(ApiError::BadRequest(
            "previous_questions and quiz_category are required".to_owned(),
        ));
    };

    let filter = CategoryFilter::from(category.id);
    let candidates = get_questions_for_filter(&pool, filter).await?;
    let previous: HashSet<i64> = previous_questions.iter().copied().collect();

    let selection = select_next(&candidates, &previous, &mut rand::thread_rng());
    let question = match selection {
        Selection::Next(question) => {
            QUIZ_QUESTIONS_CNTR.with_label_values(&["served"]).inc();
            Some(question.clone())
        }
        Selection::Exhausted => {
            tracing::info!(?filter, asked = previous.len(), "Quiz exhausted");
            QUIZ_QUESTIONS_CNTR.with_label_values(&["exhausted"]).inc();
            None
        }
    };

    Ok(Json(QuizBody {
        success: true,
        question,
        previous_questions,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
