//! 與平均值的差異百分比

use costing_core::{CostingError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 差異趨勢
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarianceTrend {
    /// 高於平均（成本較差，以警示色顯示）
    AboveAverage,
    /// 等於或低於平均（以成功色顯示）
    BelowAverage,
}

impl VarianceTrend {
    /// 依差異百分比判斷趨勢
    pub fn of(variance_pct: Decimal) -> Self {
        if variance_pct > Decimal::ZERO {
            VarianceTrend::AboveAverage
        } else {
            VarianceTrend::BelowAverage
        }
    }
}

/// 計算每筆成本與算術平均的差異百分比
///
/// 回傳長度與順序與輸入相同：`(cost - average) / average × 100`，
/// `average = sum / n`。空集合或平均為零時無法比較，超出 `Decimal`
/// 範圍時回傳溢位錯誤。
pub fn variance(costs: &[Decimal]) -> Result<Vec<Decimal>> {
    if costs.is_empty() {
        return Err(CostingError::UndefinedVariance("成本集合為空".to_string()));
    }

    let sum = costs
        .iter()
        .try_fold(Decimal::ZERO, |acc, cost| acc.checked_add(*cost))
        .ok_or_else(|| overflow("sum"))?;
    let average = sum
        .checked_div(Decimal::from(costs.len()))
        .ok_or_else(|| overflow("average"))?;

    if average.is_zero() {
        return Err(CostingError::UndefinedVariance("平均成本為零".to_string()));
    }

    costs
        .iter()
        .map(|cost| {
            cost.checked_sub(average)
                .and_then(|diff| diff.checked_div(average))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(|| overflow("variancePct"))
        })
        .collect()
}

fn overflow(step: &'static str) -> CostingError {
    CostingError::Overflow {
        subject: "成本集合".to_string(),
        step,
    }
}
