// src/models/pagination.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::filters::ColumnFilterState;

pub const DEFAULT_PAGE_SIZE: usize = 10;

// Uma página da tabela
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[schema(example = 1)]
    pub page: usize,
    #[schema(example = 10)]
    pub page_size: usize,
    #[schema(example = 3)]
    pub total_pages: usize,
    #[schema(example = 27)]
    pub total_items: usize,
}

/// Estado de filtros + paginação do lado de quem chama (a tela da tabela).
/// O cliente guarda este estado entre interações e usa `page_of` sobre as
/// linhas já filtradas; os handlers HTTP são sem estado e recebem só
/// `filters`/`page`/`pageSize` por requisição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub filters: ColumnFilterState,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            filters: ColumnFilterState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
