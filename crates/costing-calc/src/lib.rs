//! # Costing Calculation Engine
//!
//! 成本捲算、供應商比價與成本分類彙總

pub mod breakdown;
pub mod comparison;
pub mod rollup;
pub mod variance;

// Re-export 主要類型
pub use breakdown::CostBreakdown;
pub use comparison::{
    ComparisonRow, CostStructureTotals, ItemComparison, VendorComparison, VendorSummary,
};
pub use rollup::CostRollupEngine;
pub use variance::{variance, VarianceTrend};

use costing_core::{CostingError, DerivedCosts, Item, Result};
use rust_decimal::Decimal;

/// 批次捲算結果
#[derive(Debug, Clone)]
pub struct RollupReport {
    /// 每列料件及其捲算結果（與輸入順序相同）
    pub rows: Vec<RollupRow>,

    /// 所有料件總計加總
    pub grand_total: Decimal,
}

impl RollupReport {
    /// 創建空的捲算結果
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            grand_total: Decimal::ZERO,
        }
    }

    /// 添加一列；總計溢位時不寫入
    pub fn push(&mut self, item: Item, costs: DerivedCosts) -> Result<()> {
        self.grand_total = self.grand_total.checked_add(costs.g_total).ok_or_else(|| {
            CostingError::Overflow {
                subject: item.part_code.clone(),
                step: "grandTotal",
            }
        })?;
        self.rows.push(RollupRow { item, costs });
        Ok(())
    }

    /// 依料號查詢
    pub fn find(&self, part_code: &str) -> Option<&RollupRow> {
        self.rows.iter().find(|row| row.item.part_code == part_code)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 單列捲算結果
#[derive(Debug, Clone)]
pub struct RollupRow {
    pub item: Item,
    pub costs: DerivedCosts,
}
