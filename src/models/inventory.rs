// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- 1. Categoria já resolvida pela camada de dados ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    #[schema(example = "Zapatillas")]
    pub name: String,
    /// Nome da categoria pai quando esta é uma subcategoria.
    #[serde(default)]
    #[schema(example = "Calzado")]
    pub parent_name: Option<String>,
}

// --- 2. Estoque por loja ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStock {
    #[schema(example = "store1")]
    pub store_id: String,
    #[schema(example = 4)]
    pub quantity: i64,
}

// --- 3. Variação (talla / preço / estoque) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariationRecord {
    pub id: String,
    #[schema(example = "42")]
    pub size: String,
    #[schema(example = "15000")]
    pub cost_price: Decimal,
    #[schema(example = "39990")]
    pub list_price: Decimal,
    #[serde(default)]
    #[schema(example = "29990")]
    pub offer_price: Option<Decimal>,
    #[schema(example = 12)]
    pub stock_quantity: i64,
    #[schema(example = "ZAP-42-NEG")]
    pub sku: String,
    #[serde(default)]
    pub store_stocks: Vec<StoreStock>,
}

impl VariationRecord {
    /// Oferta ativa: preço de oferta positivo e abaixo do preço de lista.
    pub fn has_active_offer(&self) -> bool {
        match self.offer_price {
            Some(offer) => offer > Decimal::ZERO && offer < self.list_price,
            None => false,
        }
    }

    /// Markup = preço de lista / custo. `None` quando o custo é zero
    /// ou quando a razão não cabe num `Decimal`.
    pub fn markup(&self) -> Option<Decimal> {
        if self.cost_price <= Decimal::ZERO {
            return None;
        }
        self.list_price
            .checked_div(self.cost_price)
            .map(|m| m.round_dp(2))
    }
}

// --- 4. Produto (catálogo) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    #[schema(example = "Zapatilla Runner")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Nike")]
    pub brand: String,
    #[serde(default)]
    #[schema(example = "Hombre")]
    pub genre: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub variations: Vec<VariationRecord>,
}

impl ProductRecord {
    pub fn total_stock(&self) -> i64 {
        self.variations
            .iter()
            .fold(0_i64, |acc, v| acc.saturating_add(v.stock_quantity))
    }
}

// --- 5. Linha achatada (produto + variação) ---
// Visão efêmera: referencia o produto dono, nunca é persistida.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedRow<'a> {
    pub product: &'a ProductRecord,
    pub variation: &'a VariationRecord,
    pub is_first: bool,
    pub row_span: usize,
    pub total_stock: i64,
}

// DTO da tabela (o que sai no JSON)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub genre: String,
    pub category: Option<String>,
    pub variation: VariationRecord,
    pub is_first: bool,
    pub row_span: usize,
    pub total_stock: i64,
    pub stock_agregado: i64,
    pub has_offer: bool,
    pub markup: Option<Decimal>,
}
