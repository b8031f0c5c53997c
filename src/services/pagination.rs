// src/services/pagination.rs

use crate::models::{
    filters::ColumnFilterState,
    pagination::{Page, TableState},
};

/// ceil(total / page_size). Tamanho zero é tratado como 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Mantém a página dentro de [1, max(total_pages, 1)].
pub fn clamp_page(page: usize, total_items: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total_items, page_size).max(1))
}

/// Recorta a janela da página pedida (já ajustada ao total).
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = clamp_page(page, items.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items.get(start..end).unwrap_or_default().to_vec(),
        page,
        page_size,
        total_pages: total_pages(items.len(), page_size),
        total_items: items.len(),
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Troca os filtros. Qualquer mudança volta para a página 1.
    pub fn set_filters(&mut self, filters: ColumnFilterState) {
        if self.filters != filters {
            self.filters = filters;
            self.page = 1;
        }
    }

    /// Altera um único filtro via closure (mesma regra de reset).
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut ColumnFilterState)) {
        let mut next = self.filters.clone();
        edit(&mut next);
        self.set_filters(next);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Depois de refiltrar, garante que a página atual ainda existe.
    pub fn clamp_to(&mut self, row_count: usize) {
        self.page = clamp_page(self.page, row_count, self.page_size);
    }

    pub fn page_of<T: Clone>(&mut self, rows: &[T]) -> Page<T> {
        self.clamp_to(rows.len());
        paginate(rows, self.page, self.page_size)
    }
}
