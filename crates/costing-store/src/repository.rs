//! 資料存取介面

use costing_core::{Commodity, ComparisonItem, CostingError, Item, Result, Vendor};

/// 供應商與料件查詢介面
///
/// 捲算引擎只依賴此介面提供的料件，不依賴任何特定資料來源。
pub trait CostingRepository {
    /// 列出所有供應商（依登錄順序）
    fn list_vendors(&self) -> Vec<Vendor>;

    /// 取得供應商
    fn get_vendor(&self, vendor_id: &str) -> Result<Vendor>;

    /// 列出供應商的採購料件（依序號）
    fn list_items_for_vendor(&self, vendor_id: &str) -> Result<Vec<Item>>;

    /// 列出供應商的比價報價
    fn list_comparison_items(&self, vendor_id: &str) -> Result<Vec<ComparisonItem>>;

    /// 列出大宗物料
    fn list_commodities(&self) -> Vec<Commodity>;

    /// 取得供應商的單一料件
    fn get_item(&self, vendor_id: &str, part_code: &str) -> Result<Item> {
        self.list_items_for_vendor(vendor_id)?
            .into_iter()
            .find(|item| item.part_code == part_code)
            .ok_or_else(|| CostingError::ItemNotFound {
                vendor_id: vendor_id.to_string(),
                part_code: part_code.to_string(),
            })
    }

    /// 依 ID 列表取得比價資料，略過不存在的供應商
    fn comparison_selection(&self, vendor_ids: &[&str]) -> Vec<(Vendor, Vec<ComparisonItem>)> {
        vendor_ids
            .iter()
            .filter_map(|id| {
                let vendor = self.get_vendor(id).ok()?;
                let quotes = self.list_comparison_items(id).ok()?;
                Some((vendor, quotes))
            })
            .collect()
    }

    /// 列出屬於某大宗物料的供應商
    fn list_vendors_for_commodity(&self, commodity_id: &str) -> Vec<Vendor> {
        self.list_vendors()
            .into_iter()
            .filter(|v| v.commodity_id.as_deref() == Some(commodity_id))
            .collect()
    }
}
