// src/handlers/transactions.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::inventory::MAX_PAGE_SIZE,
    middleware::i18n::Locale,
    models::{
        pagination::Page,
        sales::{OrderRecord, SaleRecord, TransactionKind, TransactionRecord},
    },
    services::transactions_service::{TransactionQuery, list_transactions},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPayload {
    #[serde(default)]
    pub sales: Vec<SaleRecord>,

    #[serde(default)]
    pub orders: Vec<OrderRecord>,

    /// Só vendas ou só ordens. Vazio = ambas.
    pub kind: Option<TransactionKind>,

    #[schema(example = "Web")]
    pub store_id: Option<String>,

    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: Option<usize>,

    #[validate(range(min = 1, max = 100, message = "pageSize deve estar entre 1 e 100."))]
    pub page_size: Option<usize>,
}

// POST /api/transactions
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = TransactionsPayload,
    responses(
        (status = 200, description = "Vendas e ordens de compra, mais recentes primeiro", body = Page<TransactionRecord>),
        (status = 400, description = "Paginação inválida")
    )
)]
pub async fn list(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<TransactionsPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let query = TransactionQuery {
        kind: payload.kind,
        store_id: payload.store_id,
        page: payload.page.unwrap_or(1),
        page_size: payload
            .page_size
            .unwrap_or(app_state.config.default_page_size)
            .min(MAX_PAGE_SIZE),
    };

    let page = list_transactions(payload.sales, payload.orders, &query, &app_state.config.utc_offset);

    let page_amount = page
        .items
        .iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.total()));
    tracing::info!(
        items = page.items.len(),
        total_items = page.total_items,
        page_amount = %page_amount,
        "Transações listadas"
    );

    Ok((StatusCode::OK, Json(page)))
}
