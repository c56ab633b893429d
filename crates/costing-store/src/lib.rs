//! # Costing Store
//!
//! 供應商與料件資料存取層

pub mod memory;
pub mod query;
pub mod repository;

// Re-export 主要類型
pub use memory::{Dataset, InMemoryRepository, VendorRecord};
pub use query::{Page, VendorQuery};
pub use repository::CostingRepository;
