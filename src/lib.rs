//! # Costing
//!
//! 採購成本捲算引擎
//!
//! - `costing_core`：資料模型、成本政策、錯誤類型
//! - `costing_calc`：成本捲算、差異百分比、供應商比價
//! - `costing_store`：供應商與料件資料存取

pub use costing_calc::{variance, CostRollupEngine, RollupReport, VendorComparison};
pub use costing_core::{CostPolicy, CostingError, DerivedCosts, Item, Result};
pub use costing_store::{CostingRepository, InMemoryRepository, VendorQuery};

/// 載入資料並捲算供應商所有料件
pub fn rollup_vendor<R: CostingRepository>(
    repo: &R,
    engine: &CostRollupEngine,
    vendor_id: &str,
) -> Result<RollupReport> {
    let items = repo.list_items_for_vendor(vendor_id)?;
    engine.rollup(&items)
}
