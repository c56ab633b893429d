//! 供應商與大宗物料模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 供應商狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    /// 合作中
    Active,
    /// 審查中
    Review,
    /// 待核准
    Pending,
}

/// 供應商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// 供應商ID（如 V-0234）
    pub id: String,

    /// 名稱
    pub name: String,

    /// 所在地
    pub location: String,

    /// 供應料件數
    pub total_items: u32,

    /// 最近議價日期
    pub last_negotiation: NaiveDate,

    /// 年採購額
    pub annual_spend: Decimal,

    /// 狀態
    pub status: VendorStatus,

    /// 所屬大宗物料
    #[serde(default)]
    pub commodity_id: Option<String>,
}

impl Vendor {
    /// 創建新的供應商
    pub fn new(id: String, name: String, location: String, last_negotiation: NaiveDate) -> Self {
        Self {
            id,
            name,
            location,
            total_items: 0,
            last_negotiation,
            annual_spend: Decimal::ZERO,
            status: VendorStatus::Active,
            commodity_id: None,
        }
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: VendorStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置年採購額
    pub fn with_annual_spend(mut self, annual_spend: Decimal) -> Self {
        self.annual_spend = annual_spend;
        self
    }

    /// 建構器模式：設置供應料件數
    pub fn with_total_items(mut self, total_items: u32) -> Self {
        self.total_items = total_items;
        self
    }

    /// 建構器模式：設置所屬大宗物料
    pub fn with_commodity_id(mut self, commodity_id: String) -> Self {
        self.commodity_id = Some(commodity_id);
        self
    }

    /// 名稱、ID 或所在地是否包含關鍵字（不分大小寫）
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self.id.to_lowercase().contains(&keyword)
            || self.location.to_lowercase().contains(&keyword)
    }

    /// 檢查是否為合作中
    pub fn is_active(&self) -> bool {
        self.status == VendorStatus::Active
    }

    /// 簡稱（名稱第一個字）
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// 大宗物料（鋁、銅、鋼...）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commodity {
    pub id: String,
    pub name: String,
    pub total_vendors: u32,
    pub annual_spend: Decimal,

    /// 價格趨勢（百分比，正為上漲）
    pub trend_pct: Decimal,
}

impl Commodity {
    /// 價格是否上漲
    pub fn is_trending_up(&self) -> bool {
        self.trend_pct > Decimal::ZERO
    }
}

/// 供應商對單一料件的報價成本結構
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    /// 料號
    pub part_code: String,

    /// 說明
    pub description: String,

    /// 年用量
    pub quantity_annual: u32,

    /// 可量化成本（連動市場指數）
    pub qualifiable_cost: Decimal,

    /// 次可量化成本（議定）
    pub less_qualifiable_cost: Decimal,

    /// 不可量化成本（需核准）
    pub non_qualifiable_cost: Decimal,

    /// 總成本
    pub total_cost: Decimal,
}

impl ComparisonItem {
    /// 三類成本加總
    pub fn category_sum(&self) -> Decimal {
        self.qualifiable_cost + self.less_qualifiable_cost + self.non_qualifiable_cost
    }

    /// 單件成本
    pub fn unit_cost(&self) -> Option<Decimal> {
        if self.quantity_annual == 0 {
            return None;
        }
        Some(self.total_cost / Decimal::from(self.quantity_annual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> Vendor {
        Vendor::new(
            "V-0234".to_string(),
            "Atlas Manufacturing Co.".to_string(),
            "Detroit, MI".to_string(),
            NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
        )
        .with_total_items(147)
        .with_annual_spend(Decimal::from(2_450_000))
    }

    #[test]
    fn test_create_vendor() {
        let vendor = atlas();

        assert_eq!(vendor.id, "V-0234");
        assert_eq!(vendor.total_items, 147);
        assert!(vendor.is_active());
        assert_eq!(vendor.short_name(), "Atlas");
    }

    #[test]
    fn test_vendor_matches_keyword() {
        let vendor = atlas().with_status(VendorStatus::Review);

        assert!(vendor.matches("atlas"));
        assert!(vendor.matches("v-0234"));
        assert!(vendor.matches("DETROIT"));
        assert!(!vendor.matches("steel"));
        assert!(!vendor.is_active());
    }

    #[test]
    fn test_vendor_status_serde() {
        let json = serde_json::to_string(&VendorStatus::Review).unwrap();
        assert_eq!(json, "\"review\"");
    }

    #[test]
    fn test_comparison_item_totals() {
        let item = ComparisonItem {
            part_code: "AL-2847".to_string(),
            description: "Aluminum Housing Component".to_string(),
            quantity_annual: 15000,
            qualifiable_cost: Decimal::from(67500),
            less_qualifiable_cost: Decimal::from(48750),
            non_qualifiable_cost: Decimal::from(26250),
            total_cost: Decimal::from(142500),
        };

        assert_eq!(item.category_sum(), item.total_cost);
        assert_eq!(item.unit_cost(), Some(Decimal::new(95, 1)));
    }
}
