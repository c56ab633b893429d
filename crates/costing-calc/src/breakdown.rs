//! 料件成本分類彙總

use costing_core::{
    CostCategory, LessQualifiableCosts, NonQualifiableCost, QualifiableMaterial,
};
use rust_decimal::Decimal;

/// 料件的三類成本明細
#[derive(Debug, Clone, Default)]
pub struct CostBreakdown {
    pub part_code: String,
    pub qualifiable: Vec<QualifiableMaterial>,
    pub less_qualifiable: LessQualifiableCosts,
    pub non_qualifiable: Vec<NonQualifiableCost>,
}

impl CostBreakdown {
    /// 創建空的成本明細
    pub fn new(part_code: String) -> Self {
        Self {
            part_code,
            ..Default::default()
        }
    }

    /// 建構器模式：添加可量化原料
    pub fn with_material(mut self, material: QualifiableMaterial) -> Self {
        self.qualifiable.push(material);
        self
    }

    /// 建構器模式：設置次可量化成本
    pub fn with_less_qualifiable(mut self, costs: LessQualifiableCosts) -> Self {
        self.less_qualifiable = costs;
        self
    }

    /// 建構器模式：添加不可量化成本
    pub fn with_non_qualifiable(mut self, cost: NonQualifiableCost) -> Self {
        self.non_qualifiable.push(cost);
        self
    }

    pub fn total_qualifiable(&self) -> Decimal {
        self.qualifiable.iter().map(|m| m.line_total()).sum()
    }

    pub fn total_less_qualifiable(&self) -> Decimal {
        self.less_qualifiable.total()
    }

    pub fn total_non_qualifiable(&self) -> Decimal {
        self.non_qualifiable.iter().map(|c| c.amount).sum()
    }

    /// 依分類取得小計
    pub fn category_total(&self, category: CostCategory) -> Decimal {
        match category {
            CostCategory::Qualifiable => self.total_qualifiable(),
            CostCategory::LessQualifiable => self.total_less_qualifiable(),
            CostCategory::NonQualifiable => self.total_non_qualifiable(),
        }
    }

    /// 三類成本總計
    pub fn total(&self) -> Decimal {
        self.total_qualifiable() + self.total_less_qualifiable() + self.total_non_qualifiable()
    }
}
