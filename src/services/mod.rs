pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod pagination;
pub mod transactions_service;
