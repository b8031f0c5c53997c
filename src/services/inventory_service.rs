// src/services/inventory_service.rs

use std::collections::HashSet;

use rust_decimal::Decimal;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::models::{
    filters::{ColumnFilterState, NumericFilter, active_text},
    inventory::{FlattenedRow, InventoryRow, ProductRecord, VariationRecord},
    pagination::Page,
};
use crate::services::pagination::paginate;

/// Minúsculas e sem acentos: "Camión" -> "camion".
pub fn normalize_text(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack).contains(needle)
}

fn needle(value: &Option<String>) -> Option<String> {
    active_text(value).map(normalize_text)
}

// Filtros de produto já normalizados (uma vez por chamada)
struct ProductNeedles {
    search: Option<String>,
    name: Option<String>,
    brand: Option<String>,
    genre: Option<String>,
    category: Option<String>,
}

impl ProductNeedles {
    fn from_state(filters: &ColumnFilterState) -> Self {
        Self {
            search: needle(&filters.search),
            name: needle(&filters.name),
            brand: needle(&filters.brand),
            genre: needle(&filters.genre),
            category: needle(&filters.category),
        }
    }

    fn matches(&self, product: &ProductRecord) -> bool {
        let text_ok = |field: &str, wanted: &Option<String>| {
            wanted.as_deref().is_none_or(|n| contains_normalized(field, n))
        };

        let search_ok = self.search.as_deref().is_none_or(|n| {
            contains_normalized(&product.name, n)
                || contains_normalized(&product.brand, n)
                || product.variations.iter().any(|v| contains_normalized(&v.sku, n))
        });

        // Categoria: bate no nome dela ou da categoria pai
        let category_ok = self.category.as_deref().is_none_or(|n| {
            product.category.as_ref().is_some_and(|c| {
                contains_normalized(&c.name, n)
                    || c.parent_name.as_deref().is_some_and(|p| contains_normalized(p, n))
            })
        });

        search_ok
            && text_ok(product.name.as_str(), &self.name)
            && text_ok(product.brand.as_str(), &self.brand)
            && text_ok(product.genre.as_str(), &self.genre)
            && category_ok
    }
}

/// Fase 1: filtros de nível de produto (nome, marca, gênero, categoria, busca).
pub fn apply_column_filters<'a>(
    products: &'a [ProductRecord],
    filters: &ColumnFilterState,
) -> Vec<&'a ProductRecord> {
    if !filters.has_product_filters() {
        return products.iter().collect();
    }
    let needles = ProductNeedles::from_state(filters);
    products.iter().filter(|p| needles.matches(p)).collect()
}

/// Fase 2: uma linha por variação; a primeira de cada produto leva `is_first`.
pub fn flatten<'a>(products: &[&'a ProductRecord]) -> Vec<FlattenedRow<'a>> {
    let mut rows = Vec::with_capacity(products.iter().map(|p| p.variations.len()).sum());

    for &product in products {
        let total_stock = product.total_stock();
        let row_span = product.variations.len();

        for (idx, variation) in product.variations.iter().enumerate() {
            rows.push(FlattenedRow {
                product,
                variation,
                is_first: idx == 0,
                row_span,
                total_stock,
            });
        }
    }

    rows
}

/// Estoque em lojas de venda (exclui as lojas/bodegas de administração).
pub fn stock_agregado(variation: &VariationRecord, admin_store_ids: &HashSet<&str>) -> i64 {
    variation
        .store_stocks
        .iter()
        .filter(|s| !admin_store_ids.contains(s.store_id.as_str()))
        .fold(0_i64, |acc, s| acc.saturating_add(s.quantity))
}

fn admin_set(admin_store_ids: &[String]) -> HashSet<&str> {
    admin_store_ids.iter().map(String::as_str).collect()
}

// Filtros de nível de variação já interpretados
struct VariationPredicates {
    size: Option<String>,
    sku: Option<String>,
    cost_price: Option<NumericFilter>,
    list_price: Option<NumericFilter>,
    offer_price: Option<NumericFilter>,
    stock: Option<NumericFilter>,
    stock_agregado: Option<NumericFilter>,
    has_offer: Option<bool>,
}

impl VariationPredicates {
    fn from_state(filters: &ColumnFilterState) -> Self {
        Self {
            size: needle(&filters.size),
            sku: needle(&filters.sku),
            cost_price: NumericFilter::from_field("costPrice", &filters.cost_price),
            list_price: NumericFilter::from_field("listPrice", &filters.list_price),
            offer_price: NumericFilter::from_field("offerPrice", &filters.offer_price),
            stock: NumericFilter::from_field("stock", &filters.stock),
            stock_agregado: NumericFilter::from_field("stockAgregado", &filters.stock_agregado),
            has_offer: filters.has_offer,
        }
    }

    fn matches(&self, variation: &VariationRecord, admin: &HashSet<&str>) -> bool {
        let num_ok = |filter: &Option<NumericFilter>, value: Decimal| {
            filter.is_none_or(|f| f.matches(value))
        };

        self.size.as_deref().is_none_or(|n| contains_normalized(&variation.size, n))
            && self.sku.as_deref().is_none_or(|n| contains_normalized(&variation.sku, n))
            && num_ok(&self.cost_price, variation.cost_price)
            && num_ok(&self.list_price, variation.list_price)
            // Sem preço de oferta, o filtro de oferta não bate
            && self
                .offer_price
                .is_none_or(|f| variation.offer_price.is_some_and(|o| f.matches(o)))
            && num_ok(&self.stock, Decimal::from(variation.stock_quantity))
            && self.stock_agregado.is_none_or(|f| {
                f.matches(Decimal::from(stock_agregado(variation, admin)))
            })
            && self.has_offer.is_none_or(|wanted| variation.has_active_offer() == wanted)
    }
}

/// Refaz `is_first`/`row_span` sobre as linhas que sobraram de cada produto.
fn retag(rows: &mut [FlattenedRow<'_>]) {
    let mut start = 0;
    while start < rows.len() {
        let product = rows[start].product;
        let end = rows[start..]
            .iter()
            .position(|r| !std::ptr::eq(r.product, product))
            .map_or(rows.len(), |n| start + n);

        for (idx, row) in rows[start..end].iter_mut().enumerate() {
            row.is_first = idx == 0;
            row.row_span = end - start;
        }
        start = end;
    }
}

/// Fase 3: filtros por variação (talla, sku, preços, estoque, oferta).
pub fn apply_variation_filters<'a>(
    rows: Vec<FlattenedRow<'a>>,
    filters: &ColumnFilterState,
    admin_store_ids: &[String],
) -> Vec<FlattenedRow<'a>> {
    let predicates = VariationPredicates::from_state(filters);
    let admin = admin_set(admin_store_ids);

    let mut kept: Vec<FlattenedRow<'a>> = rows
        .into_iter()
        .filter(|row| predicates.matches(row.variation, &admin))
        .collect();
    retag(&mut kept);
    kept
}

pub fn to_inventory_row(row: &FlattenedRow<'_>, admin: &HashSet<&str>) -> InventoryRow {
    InventoryRow {
        product_id: row.product.id.clone(),
        name: row.product.name.clone(),
        brand: row.product.brand.clone(),
        genre: row.product.genre.clone(),
        category: row.product.category.as_ref().map(|c| c.name.clone()),
        variation: row.variation.clone(),
        is_first: row.is_first,
        row_span: row.row_span,
        total_stock: row.total_stock,
        stock_agregado: stock_agregado(row.variation, admin),
        has_offer: row.variation.has_active_offer(),
        markup: row.variation.markup(),
    }
}

#[derive(Clone)]
pub struct InventoryService {
    admin_store_ids: Vec<String>,
}

impl InventoryService {
    pub fn new(admin_store_ids: Vec<String>) -> Self {
        Self { admin_store_ids }
    }

    /// Pipeline completo: produto -> achatar -> variação -> página.
    /// `admin_store_ids` do chamador substitui o configurado quando vier.
    pub fn build_inventory_view(
        &self,
        products: &[ProductRecord],
        filters: &ColumnFilterState,
        admin_store_ids: Option<&[String]>,
        page: usize,
        page_size: usize,
    ) -> Page<InventoryRow> {
        let admin_ids = admin_store_ids.unwrap_or(&self.admin_store_ids);

        let filtered = apply_column_filters(products, filters);
        let rows = flatten(&filtered);
        let rows = apply_variation_filters(rows, filters, admin_ids);

        tracing::debug!(
            products = products.len(),
            matching_products = filtered.len(),
            rows = rows.len(),
            "Inventário filtrado"
        );

        let window = paginate(&rows, page, page_size);
        let admin = admin_set(admin_ids);
        Page {
            items: window.items.iter().map(|r| to_inventory_row(r, &admin)).collect(),
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
            total_items: window.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{CategoryRef, StoreStock};

    fn variation(id: &str, size: &str, stock: i64, list: i64, offer: Option<i64>) -> VariationRecord {
        VariationRecord {
            id: id.to_string(),
            size: size.to_string(),
            cost_price: Decimal::from(list / 2),
            list_price: Decimal::from(list),
            offer_price: offer.map(Decimal::from),
            stock_quantity: stock,
            sku: format!("SKU-{id}"),
            store_stocks: vec![
                StoreStock { store_id: "bodega".into(), quantity: 100 },
                StoreStock { store_id: "store1".into(), quantity: stock },
            ],
        }
    }

    fn product(id: &str, name: &str, brand: &str, variations: Vec<VariationRecord>) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            genre: "Unisex".to_string(),
            category_id: Some("c1".into()),
            category: Some(CategoryRef {
                id: "c1".into(),
                name: "Zapatillas".into(),
                parent_name: Some("Calzado".into()),
            }),
            variations,
        }
    }

    fn catalog() -> Vec<ProductRecord> {
        vec![
            product(
                "p1",
                "Zapatilla Camión",
                "Nike",
                vec![
                    variation("a", "40", 2, 40000, Some(30000)),
                    variation("b", "41", 8, 40000, None),
                    variation("c", "42", 0, 40000, Some(45000)),
                ],
            ),
            product("p2", "Polera Básica", "Adidas", vec![variation("d", "M", 5, 12000, None)]),
            product("p3", "Gorro", "Puma", vec![]),
        ]
    }

    #[test]
    fn text_match_ignores_case_and_accents() {
        let products = catalog();
        let filters = ColumnFilterState {
            name: Some("CAMION".into()),
            ..Default::default()
        };
        let kept = apply_column_filters(&products, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "p1");

        let filters = ColumnFilterState {
            name: Some("básica".into()),
            ..Default::default()
        };
        assert_eq!(apply_column_filters(&products, &filters)[0].id, "p2");
    }

    #[test]
    fn category_matches_parent_name() {
        let products = catalog();
        let filters = ColumnFilterState {
            category: Some("calzado".into()),
            ..Default::default()
        };
        assert_eq!(apply_column_filters(&products, &filters).len(), 3);
    }

    #[test]
    fn search_looks_at_skus() {
        let products = catalog();
        let filters = ColumnFilterState {
            search: Some("sku-d".into()),
            ..Default::default()
        };
        let kept = apply_column_filters(&products, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "p2");
    }

    #[test]
    fn flatten_emits_one_row_per_variation() {
        let products = catalog();
        let all = apply_column_filters(&products, &ColumnFilterState::default());
        let rows = flatten(&all);

        let expected: usize = products.iter().map(|p| p.variations.len()).sum();
        assert_eq!(rows.len(), expected);

        for p in products.iter().filter(|p| !p.variations.is_empty()) {
            let firsts = rows.iter().filter(|r| r.product.id == p.id && r.is_first).count();
            assert_eq!(firsts, 1, "produto {}", p.id);
        }
        assert!(rows.iter().filter(|r| r.product.id == "p1").all(|r| r.total_stock == 10 && r.row_span == 3));
    }

    #[test]
    fn stock_agregado_excludes_admin_stores() {
        let v = variation("a", "40", 7, 1000, None);
        let admin: HashSet<&str> = ["bodega"].into_iter().collect();
        assert_eq!(stock_agregado(&v, &admin), 7);
        assert_eq!(stock_agregado(&v, &HashSet::new()), 107);
    }

    #[test]
    fn stock_agregado_saturates_on_huge_quantities() {
        let v = variation("a", "40", i64::MAX, 1000, None);
        assert_eq!(stock_agregado(&v, &HashSet::new()), i64::MAX);
    }

    #[test]
    fn variation_filters_keep_only_matching_rows() {
        let products = catalog();
        let all = apply_column_filters(&products, &ColumnFilterState::default());
        let filters = ColumnFilterState {
            stock: Some(">=2".into()),
            has_offer: Some(false),
            ..Default::default()
        };

        let rows = apply_variation_filters(flatten(&all), &filters, &["bodega".to_string()]);
        let ids: Vec<&str> = rows.iter().map(|r| r.variation.id.as_str()).collect();

        // "a" tem oferta ativa; "c" fica fora pelo estoque
        assert_eq!(ids, vec!["b", "d"]);
        assert!(rows.iter().all(|r| r.is_first && r.row_span == 1));
    }

    #[test]
    fn stock_agregado_filter_uses_retail_stores_only() {
        let products = catalog();
        let all = apply_column_filters(&products, &ColumnFilterState::default());
        let filters = ColumnFilterState {
            stock_agregado: Some("<5".into()),
            ..Default::default()
        };

        let rows = apply_variation_filters(flatten(&all), &filters, &["bodega".to_string()]);
        let ids: Vec<&str> = rows.iter().map(|r| r.variation.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(rows[0].is_first);
        assert!(!rows[1].is_first);
        assert_eq!(rows[1].row_span, 2);
    }

    #[test]
    fn malformed_numeric_filter_matches_everything() {
        let products = catalog();
        let all = apply_column_filters(&products, &ColumnFilterState::default());
        let filters = ColumnFilterState {
            list_price: Some("barato".into()),
            ..Default::default()
        };
        assert_eq!(apply_variation_filters(flatten(&all), &filters, &[]).len(), 4);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let products = catalog();
        let filters = ColumnFilterState {
            brand: Some("reebok".into()),
            ..Default::default()
        };
        let service = InventoryService::new(vec![]);
        let page = service.build_inventory_view(&products, &filters, None, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn view_reports_markup_and_offer() {
        let products = catalog();
        let service = InventoryService::new(vec!["bodega".into()]);
        let page = service.build_inventory_view(&products, &ColumnFilterState::default(), None, 1, 10);

        let first = &page.items[0];
        assert_eq!(first.markup, Some(Decimal::from(2)));
        assert!(first.has_offer);
        assert_eq!(first.stock_agregado, 2);
        assert_eq!(page.total_items, 4);
    }
}
