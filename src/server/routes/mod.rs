mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::db::Category;

use super::deserializers::{deserialize_page, first_page};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

/// Categories as the frontend expects them: an object of id to type.
fn categories_by_id(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
