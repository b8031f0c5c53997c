// src/services/transactions_service.rs

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};

use crate::models::{
    pagination::Page,
    sales::{OrderRecord, SaleRecord, TransactionKind, TransactionRecord},
};
use crate::services::{dashboard_service::parse_timestamp, pagination::paginate};

#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub kind: Option<TransactionKind>,
    pub store_id: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

/// Junta vendas e ordens numa só lista, mais recentes primeiro.
/// Registros sem data válida vão para o fim, na ordem de chegada.
pub fn list_transactions(
    sales: Vec<SaleRecord>,
    orders: Vec<OrderRecord>,
    query: &TransactionQuery,
    offset: &FixedOffset,
) -> Page<TransactionRecord> {
    let store = query.store_id.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let mut keyed: Vec<(Option<DateTime<FixedOffset>>, TransactionRecord)> = sales
        .into_iter()
        .map(TransactionRecord::Sale)
        .chain(orders.into_iter().map(TransactionRecord::Order))
        .filter(|t| query.kind.is_none_or(|k| t.kind() == k))
        .filter(|t| store.is_none_or(|s| t.store_id() == s))
        .map(|t| (t.created_at().and_then(|raw| parse_timestamp(raw, offset)), t))
        .collect();

    // sort_by é estável: empates mantêm a ordem de entrada
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let records: Vec<TransactionRecord> = keyed.into_iter().map(|(_, t)| t).collect();
    paginate(&records, query.page, query.page_size)
}
