// src/config.rs

use anyhow::Context;
use chrono::{FixedOffset, Offset, Utc};
use std::{env, sync::Arc};

use crate::{
    models::pagination::DEFAULT_PAGE_SIZE,
    services::{dashboard_service::DashboardService, inventory_service::InventoryService},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Fuso usado para definir "hoje" / "ontem" nos resumos.
    pub utc_offset: FixedOffset,
    /// Lojas/bodegas centrais fora do "stock agregado".
    pub admin_store_ids: Vec<String>,
    pub default_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            utc_offset: Utc.fix(),
            admin_store_ids: Vec::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub fn parse_store_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let utc_offset = match env::var("APP_UTC_OFFSET") {
            Ok(raw) => raw
                .trim()
                .parse::<FixedOffset>()
                .with_context(|| format!("APP_UTC_OFFSET inválido: {raw:?} (use ex. -03:00)"))?,
            Err(_) => defaults.utc_offset,
        };

        let admin_store_ids = env::var("ADMIN_STORE_IDS")
            .map(|raw| parse_store_ids(&raw))
            .unwrap_or_default();

        let default_page_size = match env::var("DEFAULT_PAGE_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("DEFAULT_PAGE_SIZE inválido: {raw:?}"))?,
            Err(_) => defaults.default_page_size,
        };

        Ok(Self {
            bind_addr,
            utc_offset,
            admin_store_ids,
            default_page_size,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dashboard_service: DashboardService,
    pub inventory_service: InventoryService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        // --- Monta o gráfico de dependências ---
        let dashboard_service = DashboardService::new(config.utc_offset);
        let inventory_service = InventoryService::new(config.admin_store_ids.clone());

        Self {
            config: Arc::new(config),
            dashboard_service,
            inventory_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_ids_are_trimmed_and_split() {
        assert_eq!(parse_store_ids(" bodega, central ,,"), vec!["bodega", "central"]);
        assert!(parse_store_ids("").is_empty());
    }

    #[test]
    fn offset_format_parses() {
        let offset: FixedOffset = "-03:00".parse().unwrap();
        assert_eq!(offset.local_minus_utc(), -3 * 3600);
    }
}
