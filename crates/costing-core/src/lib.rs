//! # Costing Core
//!
//! 核心資料模型與類型定義

pub mod approval;
pub mod breakdown;
pub mod item;
pub mod policy;
pub mod vendor;

// Re-export 主要類型
pub use approval::{ApprovalRequest, ApprovalStatus};
pub use breakdown::{
    CostCategory, LessQualifiableCosts, NonQualifiableCost, NonQualifiableKind,
    QualifiableMaterial,
};
pub use item::{DerivedCosts, Item, RawItem};
pub use policy::CostPolicy;
pub use vendor::{Commodity, ComparisonItem, Vendor, VendorStatus};

/// 成本計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CostingError {
    #[error("無效的輸入: 料號 {part_code} 欄位 {field} = {value}")]
    InvalidInput {
        part_code: String,
        field: &'static str,
        value: String,
    },

    #[error("無法比較: {0}")]
    UndefinedVariance(String),

    #[error("未選擇任何供應商")]
    NoVendorsSelected,

    #[error("找不到供應商: {0}")]
    VendorNotFound(String),

    #[error("找不到料號: 供應商 {vendor_id} 料號 {part_code}")]
    ItemNotFound {
        vendor_id: String,
        part_code: String,
    },

    #[error("重複的料號: 供應商 {vendor_id} 料號 {part_code}")]
    DuplicatePartCode {
        vendor_id: String,
        part_code: String,
    },

    #[error("無效的成本政策: {0}")]
    InvalidPolicy(String),

    #[error("無效的審批狀態轉換: {from:?} -> {to:?}")]
    InvalidTransition {
        from: ApprovalStatus,
        to: ApprovalStatus,
    },

    /// 合法但過大的輸入使 Decimal 運算超出表示範圍
    #[error("數值溢位: {subject} 計算 {step} 時")]
    Overflow {
        subject: String,
        step: &'static str,
    },

    #[error("資料集解析錯誤: {0}")]
    Dataset(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CostingError>;
