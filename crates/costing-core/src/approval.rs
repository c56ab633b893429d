//! 成本變更審批

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CostCategory, CostingError, Result};

/// 審批狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// 成本變更審批單
///
/// 只允許 Pending → Approved 或 Pending → Rejected。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// 審批單ID
    pub id: Uuid,

    /// 料號
    pub part_code: String,

    /// 成本分類
    pub category: CostCategory,

    /// 申請金額
    pub amount: Decimal,

    /// 說明
    pub description: String,

    pub status: ApprovalStatus,

    /// 提交時間
    pub submitted_at: DateTime<Utc>,

    /// 審核時間
    pub decided_at: Option<DateTime<Utc>>,

    /// 審核意見
    pub note: Option<String>,
}

impl ApprovalRequest {
    /// 提交新的審批單
    pub fn submit(
        part_code: String,
        category: CostCategory,
        amount: Decimal,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            part_code,
            category,
            amount,
            description,
            status: ApprovalStatus::Pending,
            submitted_at: Utc::now(),
            decided_at: None,
            note: None,
        }
    }

    /// 核准
    pub fn approve(&mut self, note: Option<String>) -> Result<()> {
        self.decide(ApprovalStatus::Approved, note)
    }

    /// 駁回（必須附上意見）
    pub fn reject(&mut self, note: String) -> Result<()> {
        self.decide(ApprovalStatus::Rejected, Some(note))
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }

    fn decide(&mut self, to: ApprovalStatus, note: Option<String>) -> Result<()> {
        if self.status != ApprovalStatus::Pending || to == ApprovalStatus::Pending {
            return Err(CostingError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.decided_at = Some(Utc::now());
        self.note = note;
        Ok(())
    }
}
