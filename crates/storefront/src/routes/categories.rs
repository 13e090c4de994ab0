//! Catalog route handlers for categories.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use comforty_core::{Category, CategoryId, Product};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Category detail response: the category plus the products filed under it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub category: Category,
    pub products: Vec<Product>,
}

/// List all categories.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.content().categories().await?;
    Ok(Json(categories))
}

/// Show a category with its products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryDetail>> {
    let category = state
        .content()
        .category_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;
    let products = state.content().products_by_category(&id).await?;
    Ok(Json(CategoryDetail { category, products }))
}
