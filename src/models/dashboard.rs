// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::sales::MonthlyMeta;

// Contador básico: quantidade de registros e valor somado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    #[schema(example = 2)]
    pub count: u64,
    #[schema(example = "3000")]
    pub amount: Decimal,
}

impl Tally {
    /// Satura nos limites do `Decimal` em vez de estourar.
    pub fn add(&mut self, amount: Decimal) {
        self.count = self.count.saturating_add(1);
        self.amount = self.amount.saturating_add(amount);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Efectivo,
    DebitoCredito,
}

// Um balde de tempo (hoje, ontem, 7 dias, mês)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub total: Tally,
    pub efectivo: Tally,
    pub debito_credito: Tally,
}

impl Bucket {
    /// Soma sempre no total; no meio de pagamento só quando houver (venda paga).
    pub fn record(&mut self, amount: Decimal, method: Option<PaymentMethod>) {
        self.total.add(amount);
        match method {
            Some(PaymentMethod::Efectivo) => self.efectivo.add(amount),
            Some(PaymentMethod::DebitoCredito) => self.debito_credito.add(amount),
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResume {
    pub today: Bucket,
    pub yesterday: Bucket,
    pub last7: Bucket,
    pub month: Bucket,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTotals {
    pub sales: CategoryResume,
    pub orders: CategoryResume,
}

// Resposta completa do resumo (os cards do topo do dashboard)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReport {
    pub totals: ResumeTotals,
    pub monthly_meta: Option<MonthlyMeta>,
    /// Percentual do mês sobre a meta (0 quando não há meta).
    #[schema(example = "20.00")]
    pub progress: Decimal,
    /// Registros ignorados por timestamp ilegível.
    #[schema(example = 0)]
    pub skipped: u64,
}
