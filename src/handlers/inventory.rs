// src/handlers/inventory.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        filters::ColumnFilterState,
        inventory::{InventoryRow, ProductRecord},
        pagination::Page,
    },
};

pub const MAX_PAGE_SIZE: usize = 100;

// ---
// Payload: tabela de inventário
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRowsPayload {
    #[serde(default)]
    pub products: Vec<ProductRecord>,

    #[serde(default)]
    pub filters: ColumnFilterState,

    /// Bodegas centrais. Se não vier, usa as configuradas no servidor.
    #[schema(example = json!(["bodega-central"]))]
    pub admin_store_ids: Option<Vec<String>>,

    #[validate(range(min = 1, message = "A página começa em 1."))]
    #[schema(example = 1)]
    pub page: Option<usize>,

    #[validate(range(min = 1, max = 100, message = "pageSize deve estar entre 1 e 100."))]
    #[schema(example = 10)]
    pub page_size: Option<usize>,
}

// POST /api/inventory/rows
#[utoipa::path(
    post,
    path = "/api/inventory/rows",
    tag = "Inventory",
    request_body = InventoryRowsPayload,
    responses(
        (status = 200, description = "Página de linhas produto/variação já filtradas", body = Page<InventoryRow>),
        (status = 400, description = "Paginação inválida")
    )
)]
pub async fn get_inventory_rows(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<InventoryRowsPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let page_size = payload
        .page_size
        .unwrap_or(app_state.config.default_page_size)
        .min(MAX_PAGE_SIZE);

    let page = app_state.inventory_service.build_inventory_view(
        &payload.products,
        &payload.filters,
        payload.admin_store_ids.as_deref(),
        payload.page.unwrap_or(1),
        page_size,
    );

    Ok((StatusCode::OK, Json(page)))
}
