pub mod dashboard;
pub mod filters;
pub mod inventory;
pub mod pagination;
pub mod sales;
