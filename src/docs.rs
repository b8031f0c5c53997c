// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_resume,

        // --- Inventory ---
        handlers::inventory::get_inventory_rows,

        // --- Transactions ---
        handlers::transactions::list,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::dashboard::Tally,
            models::dashboard::Bucket,
            models::dashboard::CategoryResume,
            models::dashboard::ResumeTotals,
            models::dashboard::ResumeReport,

            // --- Sales ---
            models::sales::PaymentStatus,
            models::sales::SaleItem,
            models::sales::SaleRecord,
            models::sales::OrderItem,
            models::sales::OrderRecord,
            models::sales::TransactionKind,
            models::sales::TransactionRecord,
            models::sales::MonthlyMeta,

            // --- Inventory ---
            models::inventory::CategoryRef,
            models::inventory::StoreStock,
            models::inventory::VariationRecord,
            models::inventory::ProductRecord,
            models::inventory::InventoryRow,
            models::filters::ColumnFilterState,

            // --- Payloads ---
            handlers::dashboard::ResumePayload,
            handlers::inventory::InventoryRowsPayload,
            handlers::transactions::TransactionsPayload,
        )
    ),
    tags(
        (name = "Dashboard", description = "Resumo de vendas por período e meio de pagamento"),
        (name = "Inventory", description = "Tabela de produtos e variações com filtros"),
        (name = "Transactions", description = "Listagem unificada de vendas e ordens de compra")
    )
)]
pub struct ApiDoc;
