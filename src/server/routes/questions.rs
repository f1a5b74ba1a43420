use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::{self, get_all_questions, search_questions},
        },
        Question,
    },
    pagination::Paginator,
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
    },
};

use super::{categories_by_id, PageQuery};

const DIFFICULTIES: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Deserialize)]
struct NewQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResultsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    State(paginator): State<Paginator>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsBody>> {
    let questions = get_all_questions(&pool).await?;
    let current = paginator.paginate(&questions, page);
    if current.is_empty() {
        return Err(ApiError::NotFound(format!("page {page} of questions")));
    }

    Ok(Json(QuestionsBody {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        categories: categories_by_id(get_all_categories(&pool).await?),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    State(paginator): State<Paginator>,
    Query(PageQuery { page }): Query<PageQuery>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse<Json<CreatedBody>> {
    let Json(new_question) = body.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let question = new_question.question.trim();
    let answer = new_question.answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::Unprocessable(
            "question and answer must not be empty".to_owned(),
        ));
    }
    if !DIFFICULTIES.contains(&new_question.difficulty) {
        return Err(ApiError::Unprocessable(format!(
            "difficulty {} is out of range",
            new_question.difficulty
        )));
    }
    get_category(&pool, new_question.category)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApiError::Unprocessable(format!("unknown category {}", new_question.category))
            }
            e => e.into(),
        })?;

    let id = questions::create_question(
        &pool,
        question,
        answer,
        new_question.category,
        new_question.difficulty,
    )
    .await?;
    tracing::info!(id, category = new_question.category, "Question created");

    let all = get_all_questions(&pool).await?;
    Ok(Json(CreatedBody {
        success: true,
        created: id,
        questions: paginator.paginate(&all, page).to_vec(),
        total_questions: all.len(),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<DeletedBody>> {
    let Path(id) = path.map_err(|e| ApiError::NotFound(e.body_text()))?;
    if !questions::delete_question(&pool, id).await? {
        return Err(ApiError::Unprocessable(format!("question {id} does not exist")));
    }
    tracing::info!(id, "Question deleted");
    Ok(Json(DeletedBody {
        success: true,
        deleted: id,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    State(paginator): State<Paginator>,
    Query(PageQuery { page }): Query<PageQuery>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<SearchResultsBody>> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let term = match body.search_term {
        Some(term) if !term.is_empty() => term,
        _ => return Err(ApiError::BadRequest("searchTerm is required".to_owned())),
    };

    let found = search_questions(&pool, &term).await?;
    if found.is_empty() {
        return Err(ApiError::NotFound(format!("questions matching {term:?}")));
    }

    Ok(Json(SearchResultsBody {
        success: true,
        questions: paginator.paginate(&found, page).to_vec(),
        total_questions: found.len(),
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search))
        .with_state(state)
}
