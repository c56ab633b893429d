//! 成本政策配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CostingError, Result};

/// 成本捲算政策
///
/// 所有比率皆以小數表示（0.01 = 1%）。預設值即報價單沿用的商業常數：
/// 原料報廢 1%、報廢回收 75%、利潤 20%、庫存持有成本 0%。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    /// 原料報廢率（以原料總成本為基數）
    pub rejection_rate: Decimal,

    /// 報廢回收率（以報廢金額為基數）
    pub rejection_recovery_rate: Decimal,

    /// 利潤率（以報廢後小計為基數，而非總計）
    pub profit_margin: Decimal,

    /// 庫存持有成本率（以原料總成本為基數）
    ///
    /// 僅列示於捲算結果，不計入報廢後小計與總計。
    pub inventory_carrying_rate: Decimal,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            rejection_rate: Decimal::new(1, 2),
            rejection_recovery_rate: Decimal::new(75, 2),
            profit_margin: Decimal::new(20, 2),
            inventory_carrying_rate: Decimal::ZERO,
        }
    }
}

impl CostPolicy {
    /// 創建預設政策
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入政策，缺少的欄位沿用預設值
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// 建構器模式：設置報廢率
    pub fn with_rejection_rate(mut self, rate: Decimal) -> Self {
        self.rejection_rate = rate;
        self
    }

    /// 建構器模式：設置報廢回收率
    pub fn with_rejection_recovery_rate(mut self, rate: Decimal) -> Self {
        self.rejection_recovery_rate = rate;
        self
    }

    /// 建構器模式：設置利潤率
    pub fn with_profit_margin(mut self, margin: Decimal) -> Self {
        self.profit_margin = margin;
        self
    }

    /// 建構器模式：設置庫存持有成本率
    pub fn with_inventory_carrying_rate(mut self, rate: Decimal) -> Self {
        self.inventory_carrying_rate = rate;
        self
    }

    /// 檢查政策是否合法
    ///
    /// 所有比率不得為負；報廢率與回收率不得超過 100%。
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("rejection_rate", self.rejection_rate),
            ("rejection_recovery_rate", self.rejection_recovery_rate),
            ("profit_margin", self.profit_margin),
            ("inventory_carrying_rate", self.inventory_carrying_rate),
        ];

        for (name, rate) in rates {
            if rate < Decimal::ZERO {
                return Err(CostingError::InvalidPolicy(format!(
                    "{} 不得為負: {}",
                    name, rate
                )));
            }
        }

        for (name, rate) in [
            ("rejection_rate", self.rejection_rate),
            ("rejection_recovery_rate", self.rejection_recovery_rate),
        ] {
            if rate > Decimal::ONE {
                return Err(CostingError::InvalidPolicy(format!(
                    "{} 不得超過 100%: {}",
                    name, rate
                )));
            }
        }

        Ok(())
    }
}
