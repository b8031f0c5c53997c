// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        dashboard::ResumeReport,
        sales::{MonthlyMeta, OrderRecord, SaleRecord},
    },
    services::dashboard_service::parse_timestamp,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumePayload {
    /// Vendas já recortadas pelo período desejado (o "mês" é tudo que chega).
    #[serde(default)]
    pub sales: Vec<SaleRecord>,

    #[serde(default)]
    pub orders: Vec<OrderRecord>,

    pub monthly_meta: Option<MonthlyMeta>,

    /// Congela o relógio (ISO 8601, mesmas regras de `createdAt`).
    /// Sem ele, vale a hora atual da loja.
    #[schema(example = "2026-10-19T15:00:00-03:00")]
    pub now: Option<String>,
}

// POST /api/dashboard/resume
#[utoipa::path(
    post,
    path = "/api/dashboard/resume",
    tag = "Dashboard",
    request_body = ResumePayload,
    responses(
        (status = 200, description = "Totais de hoje, ontem, 7 dias e mês por meio de pagamento", body = ResumeReport),
        (status = 400, description = "Data de referência inválida")
    )
)]
pub async fn get_resume(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ResumePayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let now = payload
        .now
        .as_deref()
        .map(|raw| {
            parse_timestamp(raw, &app_state.config.utc_offset)
                .ok_or_else(|| AppError::InvalidTimestamp(raw.to_string()).to_api_error(&locale))
        })
        .transpose()?;

    let report = app_state.dashboard_service.get_resume(
        &payload.sales,
        &payload.orders,
        payload.monthly_meta,
        now,
    );

    tracing::info!(
        sales = payload.sales.len(),
        orders = payload.orders.len(),
        skipped = report.skipped,
        "Resumo calculado"
    );

    Ok((StatusCode::OK, Json(report)))
}
