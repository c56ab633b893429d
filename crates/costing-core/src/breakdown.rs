//! 成本分類模型
//!
//! - 可量化成本：直接連動市場指數（原料價格）
//! - 次可量化成本：議定成本（加工、管銷、利潤）
//! - 不可量化成本：需人工核准的特殊成本（模具、認證）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 成本分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Qualifiable,
    LessQualifiable,
    NonQualifiable,
}

impl CostCategory {
    /// 修改是否需要採購主管核准
    ///
    /// 可量化成本隨市場價格更新，不需核准。
    pub fn requires_approval(&self) -> bool {
        !matches!(self, CostCategory::Qualifiable)
    }
}

/// 可量化成本明細（單一原料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiableMaterial {
    /// 原料名稱
    pub material: String,

    /// 成分比例（%）
    pub composition_pct: Decimal,

    /// 價格指數來源（如 LME Aluminum）
    pub index_source: String,

    /// 即時價格（每公斤）
    pub live_price: Decimal,

    pub gross_weight: Decimal,
    pub net_weight: Decimal,
    pub scrap_weight: Decimal,

    /// 原料成本
    pub rm_cost: Decimal,

    /// 結算費用
    pub settle_exp: Decimal,

    /// 試作費用
    pub trial: Decimal,
}

impl QualifiableMaterial {
    /// 明細小計 = 原料成本 + 結算費用 + 試作費用
    pub fn line_total(&self) -> Decimal {
        self.rm_cost + self.settle_exp + self.trial
    }
}

/// 次可量化成本（議定項目）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessQualifiableCosts {
    pub bop: Decimal,
    pub conversion_cost: Decimal,
    pub overhead_cost: Decimal,
    pub profit_on_conversion: Decimal,
    pub profit_on_rm: Decimal,
    pub transport: Decimal,
}

impl LessQualifiableCosts {
    pub fn total(&self) -> Decimal {
        self.bop
            + self.conversion_cost
            + self.overhead_cost
            + self.profit_on_conversion
            + self.profit_on_rm
            + self.transport
    }
}

/// 不可量化成本類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonQualifiableKind {
    /// 模具費
    Tooling,
    /// 特殊認證
    Certification,
    /// 特殊製程
    SpecialProcess,
}

/// 不可量化成本項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonQualifiableCost {
    pub kind: NonQualifiableKind,
    pub description: String,
    pub amount: Decimal,
}

impl NonQualifiableCost {
    pub fn new(kind: NonQualifiableKind, description: String, amount: Decimal) -> Self {
        Self {
            kind,
            description,
            amount,
        }
    }
}
