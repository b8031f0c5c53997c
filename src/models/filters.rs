// src/models/filters.rs

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Estado dos filtros de coluna da tabela de inventário.
// Campos vazios (ou None) não filtram nada.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnFilterState {
    // Nível de produto
    #[schema(example = "runner")]
    pub search: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub genre: Option<String>,
    pub category: Option<String>,

    // Nível de variação (texto)
    pub size: Option<String>,
    pub sku: Option<String>,

    // Nível de variação (expressões numéricas: "10", ">5", "<=3", "10-20")
    pub cost_price: Option<String>,
    pub list_price: Option<String>,
    pub offer_price: Option<String>,
    #[schema(example = "<5")]
    pub stock: Option<String>,
    pub stock_agregado: Option<String>,

    pub has_offer: Option<bool>,
}

/// Normaliza o valor de um filtro de texto: `None` quando vazio.
pub fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ColumnFilterState {
    pub fn has_product_filters(&self) -> bool {
        [&self.search, &self.name, &self.brand, &self.genre, &self.category]
            .into_iter()
            .any(|f| active_text(f).is_some())
    }
}

// --- Predicado numérico ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFilter {
    Eq(Decimal),
    Gt(Decimal),
    Gte(Decimal),
    Lt(Decimal),
    Lte(Decimal),
    Between(Decimal, Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expressão numérica inválida: {0:?}")]
pub struct InvalidNumericFilter(pub String);

fn parse_number(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

impl FromStr for NumericFilter {
    type Err = InvalidNumericFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = s.trim();
        let invalid = || InvalidNumericFilter(s.to_string());

        // Operadores de dois caracteres primeiro
        let ops: [(&str, fn(Decimal) -> NumericFilter); 5] = [
            (">=", NumericFilter::Gte),
            ("<=", NumericFilter::Lte),
            (">", NumericFilter::Gt),
            ("<", NumericFilter::Lt),
            ("=", NumericFilter::Eq),
        ];
        for (op, build) in ops {
            if let Some(rest) = expr.strip_prefix(op) {
                return parse_number(rest).map(build).ok_or_else(invalid);
            }
        }

        if let Some((lo, hi)) = expr.split_once("..") {
            return range(lo, hi).ok_or_else(invalid);
        }
        // "10-20". Ignora o primeiro caractere para não confundir com sinal negativo.
        if let Some(idx) = expr.get(1..).and_then(|tail| tail.find('-')) {
            let (lo, hi) = expr.split_at(idx + 1);
            return range(lo, &hi[1..]).ok_or_else(invalid);
        }

        parse_number(expr).map(NumericFilter::Eq).ok_or_else(invalid)
    }
}

fn range(lo: &str, hi: &str) -> Option<NumericFilter> {
    let (lo, hi) = (parse_number(lo)?, parse_number(hi)?);
    if lo <= hi {
        Some(NumericFilter::Between(lo, hi))
    } else {
        Some(NumericFilter::Between(hi, lo))
    }
}

impl NumericFilter {
    pub fn matches(&self, value: Decimal) -> bool {
        match *self {
            NumericFilter::Eq(n) => value == n,
            NumericFilter::Gt(n) => value > n,
            NumericFilter::Gte(n) => value >= n,
            NumericFilter::Lt(n) => value < n,
            NumericFilter::Lte(n) => value <= n,
            NumericFilter::Between(lo, hi) => value >= lo && value <= hi,
        }
    }

    /// Lê o filtro do estado. Expressão vazia ou inválida vira "sem filtro".
    pub fn from_field(field: &str, value: &Option<String>) -> Option<Self> {
        let raw = active_text(value)?;
        match raw.parse::<NumericFilter>() {
            Ok(filter) => Some(filter),
            Err(e) => {
                tracing::debug!(field, error = %e, "Filtro numérico ignorado");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn parses_comparison_operators() {
        assert_eq!("10".parse::<NumericFilter>(), Ok(NumericFilter::Eq(d(10))));
        assert_eq!("=10".parse::<NumericFilter>(), Ok(NumericFilter::Eq(d(10))));
        assert_eq!(">5".parse::<NumericFilter>(), Ok(NumericFilter::Gt(d(5))));
        assert_eq!(">= 5".parse::<NumericFilter>(), Ok(NumericFilter::Gte(d(5))));
        assert_eq!("<3".parse::<NumericFilter>(), Ok(NumericFilter::Lt(d(3))));
        assert_eq!("<=3".parse::<NumericFilter>(), Ok(NumericFilter::Lte(d(3))));
    }

    #[test]
    fn parses_ranges_in_either_order() {
        assert_eq!(
            "10-20".parse::<NumericFilter>(),
            Ok(NumericFilter::Between(d(10), d(20)))
        );
        assert_eq!(
            "20..10".parse::<NumericFilter>(),
            Ok(NumericFilter::Between(d(10), d(20)))
        );
    }

    #[test]
    fn negative_number_is_not_a_range() {
        assert_eq!("-4".parse::<NumericFilter>(), Ok(NumericFilter::Eq(d(-4))));
    }

    #[test]
    fn accepts_decimal_comma() {
        assert_eq!(
            "1,5".parse::<NumericFilter>(),
            Ok(NumericFilter::Eq(Decimal::new(15, 1)))
        );
    }

    #[test]
    fn malformed_expression_is_no_filter() {
        assert!("abc".parse::<NumericFilter>().is_err());
        assert!(">".parse::<NumericFilter>().is_err());
        assert_eq!(NumericFilter::from_field("stock", &Some("doce".into())), None);
        assert_eq!(NumericFilter::from_field("stock", &Some("   ".into())), None);
        assert_eq!(NumericFilter::from_field("stock", &None), None);
    }

    #[test]
    fn between_is_inclusive() {
        let f = NumericFilter::Between(d(1), d(3));
        assert!(f.matches(d(1)));
        assert!(f.matches(d(3)));
        assert!(!f.matches(d(4)));
    }
}
