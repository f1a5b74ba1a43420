use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::get_questions_for_category,
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

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".to_owned()));
    }
    Ok(Json(CategoriesBody {
        success: true,
        categories: categories_by_id(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    State(paginator): State<Paginator>,
    path: Result<Path<i64>, PathRejection>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let Path(id) = path.map_err(|e| ApiError::NotFound(e.body_text()))?;
    // RowNotFound renders as 404
    let category = get_category(&pool, id).await?;
    let questions = get_questions_for_category(&pool, category.id).await?;

    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: paginator.paginate(&questions, page).to_vec(),
        total_questions: questions.len(),
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
