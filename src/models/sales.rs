// src/models/sales.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Canal de venda online. Toda venda Web conta como cartão.
pub const WEB_STORE_ID: &str = "Web";

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    #[serde(rename = "Pagado")]
    Paid,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Anulado")]
    Voided,
    // Qualquer outro texto vindo do checkout: tratado como não pago
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn is_paid(self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

// --- Venda ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    #[schema(example = "var-001")]
    pub variation_id: String,
    #[schema(example = 2)]
    pub quantity: i64,
    #[schema(example = "4990")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[schema(example = "sale-1024")]
    pub id: String,
    /// Texto cru do timestamp (ISO 8601). Pode vir vazio ou inválido.
    #[serde(default)]
    #[schema(example = "2026-10-19T14:30:00-03:00")]
    pub created_at: Option<String>,
    #[schema(example = "9980")]
    pub total: Decimal,
    pub status: PaymentStatus,
    #[serde(default)]
    #[schema(example = "efectivo")]
    pub payment_type: String,
    #[schema(example = "Web")]
    pub store_id: String,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

impl SaleRecord {
    /// Soma dos subtotais das linhas (quantidade * preço unitário), saturando.
    pub fn items_subtotal(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |acc, item| {
            let line = Decimal::from(item.quantity).saturating_mul(item.unit_price);
            acc.saturating_add(line)
        })
    }
}

// --- Ordem de compra ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub variation_id: String,
    #[schema(example = 12)]
    pub quantity_ordered: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[schema(example = "order-77")]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub total: Decimal,
    pub status: PaymentStatus,
    #[serde(rename = "type", default)]
    #[schema(example = "debito")]
    pub order_type: String,
    pub store_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

// --- União explícita venda / ordem ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TransactionRecord {
    Sale(SaleRecord),
    Order(OrderRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Sale,
    Order,
}

impl TransactionRecord {
    pub fn kind(&self) -> TransactionKind {
        match self {
            TransactionRecord::Sale(_) => TransactionKind::Sale,
            TransactionRecord::Order(_) => TransactionKind::Order,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            TransactionRecord::Sale(sale) => &sale.id,
            TransactionRecord::Order(order) => &order.id,
        }
    }

    pub fn created_at(&self) -> Option<&str> {
        match self {
            TransactionRecord::Sale(sale) => sale.created_at.as_deref(),
            TransactionRecord::Order(order) => order.created_at.as_deref(),
        }
    }

    pub fn store_id(&self) -> &str {
        match self {
            TransactionRecord::Sale(sale) => &sale.store_id,
            TransactionRecord::Order(order) => &order.store_id,
        }
    }

    pub fn total(&self) -> Decimal {
        match self {
            TransactionRecord::Sale(sale) => sale.total,
            TransactionRecord::Order(order) => order.total,
        }
    }
}

// --- Meta mensal (só repassada) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMeta {
    #[schema(example = "15000000")]
    pub meta: Decimal,
    #[serde(default)]
    #[schema(example = "2026-10")]
    pub month: Option<String>,
}
