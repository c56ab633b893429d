//! 成本捲算引擎

use costing_core::{CostPolicy, CostingError, DerivedCosts, Item, Result};
use rust_decimal::Decimal;

use crate::RollupReport;

/// 成本捲算引擎
///
/// 將一筆料件依固定公式鏈轉為捲算結果。純函數：相同輸入必得相同輸出，
/// 不持有可變狀態，可在多個執行緒間共用。
#[derive(Debug, Clone, Default)]
pub struct CostRollupEngine {
    /// 成本政策
    policy: CostPolicy,
}

impl CostRollupEngine {
    /// 創建新的捲算引擎（不檢查政策）
    pub fn new(policy: CostPolicy) -> Self {
        Self { policy }
    }

    /// 創建新的捲算引擎，先檢查政策是否合法
    pub fn try_new(policy: CostPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// 獲取成本政策引用
    pub fn policy(&self) -> &CostPolicy {
        &self.policy
    }

    /// 捲算單一料件
    ///
    /// 不檢查輸入；負值會照公式傳遞到結果。數值超出 `Decimal` 範圍時
    /// panic，需要檢查時使用 [`compute_checked`](Self::compute_checked)。
    pub fn compute(&self, item: &Item) -> DerivedCosts {
        let policy = &self.policy;

        // 原料：銅材 + 毛細管
        let rm_cost_copper = item.copper_wt_pcs * item.lme + item.freight;
        let copper_cost = item.bme + item.fab_cost_freight;
        let rm_cost_capillary = copper_cost * item.capillary_wt_pcs;
        let total_rm_cost = rm_cost_copper + rm_cost_capillary;

        // 外購件與焊料（焊料以 LME 計價）
        let total_amt_bop = item.price;
        let total_amt_brazing = item.brazing_weight * item.lme;

        let inventory_carrying_cost = total_rm_cost * policy.inventory_carrying_rate;

        // 報廢與回收
        let rejection_rm = total_rm_cost * policy.rejection_rate;
        let rejection_recovery = rejection_rm * policy.rejection_recovery_rate;

        let total_after_rejection =
            total_rm_cost + total_amt_bop + total_amt_brazing + rejection_rm - rejection_recovery;

        // 利潤以報廢後小計為基數，不含人工及物流
        let profit = total_after_rejection * policy.profit_margin;

        let g_total = total_after_rejection
            + item.labour
            + item.consumables
            + item.admit_cost
            + profit
            + item.packing_handling
            + item.freight2;

        let costs = DerivedCosts {
            rm_cost_copper,
            copper_cost,
            rm_cost_capillary,
            total_rm_cost,
            total_amt_bop,
            total_amt_brazing,
            inventory_carrying_cost,
            rejection_rm,
            rejection_recovery,
            total_after_rejection,
            profit,
            g_total,
        };
        trace_row(item, &costs);
        costs
    }

    /// 捲算單一料件，運算溢位時回傳 [`CostingError::Overflow`]
    ///
    /// 與 [`compute`](Self::compute) 公式相同，不檢查輸入是否為負。
    pub fn try_compute(&self, item: &Item) -> Result<DerivedCosts> {
        let policy = &self.policy;
        let op = Checked {
            part_code: &item.part_code,
        };

        let rm_cost_copper = op.sum(
            &[op.mul(item.copper_wt_pcs, item.lme, "rmCostCopper")?, item.freight],
            "rmCostCopper",
        )?;
        let copper_cost = op.sum(&[item.bme, item.fab_cost_freight], "copperCost")?;
        let rm_cost_capillary = op.mul(copper_cost, item.capillary_wt_pcs, "rmCostCapillary")?;
        let total_rm_cost = op.sum(&[rm_cost_copper, rm_cost_capillary], "totalRmCost")?;

        let total_amt_bop = item.price;
        let total_amt_brazing = op.mul(item.brazing_weight, item.lme, "totalAmtBrazing")?;

        let inventory_carrying_cost = op.mul(
            total_rm_cost,
            policy.inventory_carrying_rate,
            "inventoryCarryingCost",
        )?;

        let rejection_rm = op.mul(total_rm_cost, policy.rejection_rate, "rejectionRm")?;
        let rejection_recovery = op.mul(
            rejection_rm,
            policy.rejection_recovery_rate,
            "rejectionRecovery",
        )?;

        let total_after_rejection = op.sub(
            op.sum(
                &[total_rm_cost, total_amt_bop, total_amt_brazing, rejection_rm],
                "totalAfterRejection",
            )?,
            rejection_recovery,
            "totalAfterRejection",
        )?;

        let profit = op.mul(total_after_rejection, policy.profit_margin, "profit")?;

        let g_total = op.sum(
            &[
                total_after_rejection,
                item.labour,
                item.consumables,
                item.admit_cost,
                profit,
                item.packing_handling,
                item.freight2,
            ],
            "gTotal",
        )?;

        let costs = DerivedCosts {
            rm_cost_copper,
            copper_cost,
            rm_cost_capillary,
            total_rm_cost,
            total_amt_bop,
            total_amt_brazing,
            inventory_carrying_cost,
            rejection_rm,
            rejection_recovery,
            total_after_rejection,
            profit,
            g_total,
        };
        trace_row(item, &costs);
        Ok(costs)
    }

    /// 檢查輸入後捲算單一料件
    ///
    /// 負值回傳 [`CostingError::InvalidInput`]，溢位回傳
    /// [`CostingError::Overflow`]。
    pub fn compute_checked(&self, item: &Item) -> Result<DerivedCosts> {
        let checked = item.validate().and_then(|()| self.try_compute(item));
        if let Err(err) = &checked {
            tracing::warn!("料件 {} 無法捲算: {}", item.part_code, err);
        }
        checked
    }

    /// 批次捲算（保持輸入順序）
    ///
    /// 任一列檢查失敗即中止並回傳該列錯誤。
    pub fn rollup(&self, items: &[Item]) -> Result<RollupReport> {
        tracing::info!("開始成本捲算：料件 {} 筆", items.len());

        let mut report = RollupReport::empty();
        for item in items {
            let costs = self.compute_checked(item)?;
            report.push(item.clone(), costs)?;
        }

        tracing::info!(
            "成本捲算完成：{} 筆，總計 {}",
            report.len(),
            report.grand_total
        );

        Ok(report)
    }
}

fn trace_row(item: &Item, costs: &DerivedCosts) {
    tracing::debug!(
        "捲算料件 {}: 原料 {}, 報廢後 {}, 總計 {}",
        item.part_code,
        costs.total_rm_cost,
        costs.total_after_rejection,
        costs.g_total
    );
}

/// 溢位檢查的 Decimal 運算
struct Checked<'a> {
    part_code: &'a str,
}

impl Checked<'_> {
    fn mul(&self, lhs: Decimal, rhs: Decimal, step: &'static str) -> Result<Decimal> {
        lhs.checked_mul(rhs).ok_or_else(|| self.overflow(step))
    }

    fn sub(&self, lhs: Decimal, rhs: Decimal, step: &'static str) -> Result<Decimal> {
        lhs.checked_sub(rhs).ok_or_else(|| self.overflow(step))
    }

    fn sum(&self, terms: &[Decimal], step: &'static str) -> Result<Decimal> {
        terms
            .iter()
            .try_fold(Decimal::ZERO, |acc, term| acc.checked_add(*term))
            .ok_or_else(|| self.overflow(step))
    }

    fn overflow(&self, step: &'static str) -> CostingError {
        CostingError::Overflow {
            subject: self.part_code.to_string(),
            step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costing_core::CostingError;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn copper_item(
        part_code: &str,
        copper_wt: &str,
        capillary_wt: &str,
        fab_cost_freight: &str,
        price: &str,
        brazing_weight: &str,
        conversion: (&str, &str, &str),
        logistics: (&str, &str),
    ) -> Item {
        Item::new(part_code.to_string(), part_code.to_string())
            .with_copper(d(copper_wt), d("8500"), d("120"))
            .with_capillary(d(capillary_wt), d("9200"), d(fab_cost_freight))
            .with_bop_part(format!("BOP-{}", part_code), d(price))
            .with_brazing_weight(d(brazing_weight))
            .with_conversion(d(conversion.0), d(conversion.1), d(conversion.2))
            .with_logistics(d(logistics.0), d(logistics.1))
    }

    fn copper_tube() -> Item {
        copper_item(
            "CU-2847",
            "0.45",
            "0.08",
            "450",
            "850",
            "0.02",
            ("120", "45", "75"),
            ("35", "80"),
        )
    }

    #[test]
    fn test_copper_tube_rollup() {
        let engine = CostRollupEngine::default();
        let costs = engine.compute(&copper_tube());

        assert_eq!(costs.rm_cost_copper, d("3945"));
        assert_eq!(costs.copper_cost, d("9650"));
        assert_eq!(costs.rm_cost_capillary, d("772"));
        assert_eq!(costs.total_rm_cost, d("4717"));
        assert_eq!(costs.total_amt_bop, d("850"));
        assert_eq!(costs.total_amt_brazing, d("170"));
        assert_eq!(costs.inventory_carrying_cost, Decimal::ZERO);
        assert_eq!(costs.rejection_rm, d("47.17"));
        assert_eq!(costs.rejection_recovery, d("35.3775"));
        assert_eq!(costs.total_after_rejection, d("5748.7925"));
        assert_eq!(costs.profit, d("1149.7585"));
        assert_eq!(costs.g_total, d("7253.551"));
    }

    #[rstest]
    #[case::connector(
        copper_item("CU-9123", "0.32", "0.05", "380", "620", "0.015", ("95", "35", "60"), ("28", "65")),
        "3319",
        "5172.757"
    )]
    #[case::heat_exchanger(
        copper_item("CU-4556", "0.68", "0.12", "620", "1250", "0.03", ("180", "65", "110"), ("52", "120")),
        "7078.4",
        "10848.3152"
    )]
    fn test_sample_rows(#[case] item: Item, #[case] total_rm_cost: &str, #[case] g_total: &str) {
        let costs = CostRollupEngine::default().compute(&item);

        assert_eq!(costs.total_rm_cost, d(total_rm_cost));
        assert_eq!(costs.g_total, d(g_total));
    }

    #[test]
    fn test_profit_base_is_subtotal() {
        let costs = CostRollupEngine::default().compute(&copper_tube());

        assert_eq!(costs.profit, costs.total_after_rejection * d("0.2"));
        assert_ne!(costs.profit, costs.g_total * d("0.2"));
    }

    #[test]
    fn test_custom_policy() {
        let policy = CostPolicy::new()
            .with_rejection_rate(d("0.02"))
            .with_rejection_recovery_rate(d("0.5"))
            .with_profit_margin(d("0.1"))
            .with_inventory_carrying_rate(d("0.01"));
        let engine = CostRollupEngine::try_new(policy).unwrap();
        let costs = engine.compute(&copper_tube());

        assert_eq!(costs.inventory_carrying_cost, d("47.17"));
        assert_eq!(costs.rejection_rm, d("94.34"));
        assert_eq!(costs.rejection_recovery, d("47.17"));
        // 庫存持有成本不計入：4717 + 850 + 170 + 94.34 - 47.17
        assert_eq!(costs.total_after_rejection, d("5784.17"));
        assert_eq!(costs.profit, d("578.417"));
    }

    #[test]
    fn test_carrying_cost_leaves_totals_unchanged() {
        let policy = CostPolicy::new().with_inventory_carrying_rate(d("0.05"));
        let engine = CostRollupEngine::try_new(policy).unwrap();
        let costs = engine.compute(&copper_tube());

        assert_eq!(costs.inventory_carrying_cost, d("235.85"));
        assert_eq!(costs.total_after_rejection, d("5748.7925"));
        assert_eq!(costs.g_total, d("7253.551"));
    }

    #[test]
    fn test_try_compute_matches_compute() {
        let engine = CostRollupEngine::default();
        let item = copper_tube();

        assert_eq!(engine.try_compute(&item).unwrap(), engine.compute(&item));
    }

    #[test]
    fn test_compute_checked_reports_overflow() {
        // 每項皆為合法非負值，但乘積超出 Decimal 範圍
        let item = Item::new("CU-HUGE".to_string(), "Oversized".to_string()).with_copper(
            d("1000000000000000"),
            d("1000000000000000"),
            Decimal::ZERO,
        );
        assert!(item.validate().is_ok());

        match CostRollupEngine::default().compute_checked(&item) {
            Err(CostingError::Overflow { subject, step }) => {
                assert_eq!(subject, "CU-HUGE");
                assert_eq!(step, "rmCostCopper");
            }
            other => panic!("預期 Overflow，實際 {:?}", other),
        }
    }

    #[test]
    fn test_rollup_reports_grand_total_overflow() {
        let mut first = copper_tube();
        first.labour = d("40000000000000000000000000000");
        let mut second = first.clone();
        second.part_code = "CU-9123".to_string();

        let engine = CostRollupEngine::default();
        assert!(engine.compute_checked(&first).is_ok());

        match engine.rollup(&[first, second]) {
            Err(CostingError::Overflow { subject, step }) => {
                assert_eq!(subject, "CU-9123");
                assert_eq!(step, "grandTotal");
            }
            other => panic!("預期 Overflow，實際 {:?}", other),
        }
    }

    #[test]
    fn test_try_new_rejects_invalid_policy() {
        let policy = CostPolicy::new().with_rejection_recovery_rate(d("1.2"));
        assert!(matches!(
            CostRollupEngine::try_new(policy),
            Err(CostingError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_compute_propagates_negative_input() {
        let mut item = copper_tube();
        item.labour = d("-7253.551");

        let engine = CostRollupEngine::default();
        // 未檢查時照公式傳遞
        let costs = engine.compute(&item);
        assert_eq!(costs.g_total, d("-120"));
        // 檢查時拒絕
        assert!(matches!(
            engine.compute_checked(&item),
            Err(CostingError::InvalidInput {
                field: "labour",
                ..
            })
        ));
    }

    #[test]
    fn test_rollup_keeps_order_and_sums() {
        let items = vec![
            copper_tube(),
            copper_item("CU-9123", "0.32", "0.05", "380", "620", "0.015", ("95", "35", "60"), ("28", "65")),
        ];

        let report = CostRollupEngine::default().rollup(&items).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.rows[0].item.part_code, "CU-2847");
        assert_eq!(report.rows[1].item.part_code, "CU-9123");
        assert_eq!(report.grand_total, d("12426.308"));
        assert!(report.find("CU-9123").is_some());
        assert!(report.find("CU-0000").is_none());
    }

    #[test]
    fn test_rollup_aborts_on_invalid_row() {
        let mut bad = copper_tube();
        bad.part_code = "CU-BAD".to_string();
        bad.freight = d("-1");

        let result = CostRollupEngine::default().rollup(&[copper_tube(), bad]);
        match result {
            Err(CostingError::InvalidInput { part_code, .. }) => assert_eq!(part_code, "CU-BAD"),
            other => panic!("預期 InvalidInput，實際 {:?}", other),
        }
    }

    #[test]
    fn test_empty_rollup() {
        let report = CostRollupEngine::default().rollup(&[]).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.grand_total, Decimal::ZERO);
    }
}
