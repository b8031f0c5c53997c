//! Motor de resumo de vendas e de tabela de inventário do back-office.
//!
//! O núcleo (`services`) é puro: recebe listas de registros e devolve visões
//! agregadas, filtradas e paginadas. A camada HTTP (`handlers`) só adapta JSON.

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    Json, Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::config::AppState;

/// Monta o router principal com todas as rotas.
pub fn app(app_state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/resume", post(handlers::dashboard::get_resume));

    let inventory_routes = Router::new()
        .route("/rows", post(handlers::inventory::get_inventory_rows));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(docs::ApiDoc::openapi()) }))
        .route("/api/transactions", post(handlers::transactions::list))
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/inventory", inventory_routes)
        .with_state(app_state)
}
