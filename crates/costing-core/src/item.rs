//! 採購料件模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CostingError, Result};

/// 採購料件（銅材報價單的一列）
///
/// 重量單位為公斤，LME/BME 為每公噸市場價，其餘欄位為幣值。
/// 所有數值欄位都應為非負，`part_code` 在同一供應商內唯一。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// 序號（顯示順序）
    #[serde(default)]
    pub sr_no: u32,

    /// 料號
    pub part_code: String,

    /// 品名
    pub part_name: String,

    /// 銅材單件重量
    pub copper_wt_pcs: Decimal,

    /// LME 銅價
    pub lme: Decimal,

    /// 原料運費
    pub freight: Decimal,

    /// 毛細管單件重量
    pub capillary_wt_pcs: Decimal,

    /// BME 銅價
    pub bme: Decimal,

    /// 加工費及運費
    pub fab_cost_freight: Decimal,

    /// 外購件料號
    #[serde(default)]
    pub bop_part: Option<String>,

    /// 外購件單價
    pub price: Decimal,

    /// 焊料重量
    pub brazing_weight: Decimal,

    /// 人工
    pub labour: Decimal,

    /// 耗材
    pub consumables: Decimal,

    /// 管理費
    pub admit_cost: Decimal,

    /// 包裝及搬運
    pub packing_handling: Decimal,

    /// 成品運費
    pub freight2: Decimal,
}

impl Item {
    /// 創建新的料件，所有數值欄位為零
    pub fn new(part_code: String, part_name: String) -> Self {
        Self {
            sr_no: 0,
            part_code,
            part_name,
            copper_wt_pcs: Decimal::ZERO,
            lme: Decimal::ZERO,
            freight: Decimal::ZERO,
            capillary_wt_pcs: Decimal::ZERO,
            bme: Decimal::ZERO,
            fab_cost_freight: Decimal::ZERO,
            bop_part: None,
            price: Decimal::ZERO,
            brazing_weight: Decimal::ZERO,
            labour: Decimal::ZERO,
            consumables: Decimal::ZERO,
            admit_cost: Decimal::ZERO,
            packing_handling: Decimal::ZERO,
            freight2: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置序號
    pub fn with_sr_no(mut self, sr_no: u32) -> Self {
        self.sr_no = sr_no;
        self
    }

    /// 建構器模式：設置銅材（重量、LME、運費）
    pub fn with_copper(mut self, copper_wt_pcs: Decimal, lme: Decimal, freight: Decimal) -> Self {
        self.copper_wt_pcs = copper_wt_pcs;
        self.lme = lme;
        self.freight = freight;
        self
    }

    /// 建構器模式：設置毛細管（重量、BME、加工費及運費）
    pub fn with_capillary(
        mut self,
        capillary_wt_pcs: Decimal,
        bme: Decimal,
        fab_cost_freight: Decimal,
    ) -> Self {
        self.capillary_wt_pcs = capillary_wt_pcs;
        self.bme = bme;
        self.fab_cost_freight = fab_cost_freight;
        self
    }

    /// 建構器模式：設置外購件
    pub fn with_bop_part(mut self, bop_part: String, price: Decimal) -> Self {
        self.bop_part = Some(bop_part);
        self.price = price;
        self
    }

    /// 建構器模式：設置焊料重量
    pub fn with_brazing_weight(mut self, brazing_weight: Decimal) -> Self {
        self.brazing_weight = brazing_weight;
        self
    }

    /// 建構器模式：設置加工成本（人工、耗材、管理費）
    pub fn with_conversion(
        mut self,
        labour: Decimal,
        consumables: Decimal,
        admit_cost: Decimal,
    ) -> Self {
        self.labour = labour;
        self.consumables = consumables;
        self.admit_cost = admit_cost;
        self
    }

    /// 建構器模式：設置物流成本（包裝搬運、成品運費）
    pub fn with_logistics(mut self, packing_handling: Decimal, freight2: Decimal) -> Self {
        self.packing_handling = packing_handling;
        self.freight2 = freight2;
        self
    }

    /// 所有數值欄位（欄位名稱, 值）
    pub fn numeric_fields(&self) -> [(&'static str, Decimal); 13] {
        [
            ("copperWtPcs", self.copper_wt_pcs),
            ("lme", self.lme),
            ("freight", self.freight),
            ("capillaryWtPcs", self.capillary_wt_pcs),
            ("bme", self.bme),
            ("fabCostFreight", self.fab_cost_freight),
            ("price", self.price),
            ("brazingWeight", self.brazing_weight),
            ("labour", self.labour),
            ("consumables", self.consumables),
            ("admitCost", self.admit_cost),
            ("packingHandling", self.packing_handling),
            ("freight2", self.freight2),
        ]
    }

    /// 檢查所有數值欄位皆為非負
    pub fn validate(&self) -> Result<()> {
        if let Some((field, value)) = self
            .numeric_fields()
            .into_iter()
            .find(|(_, value)| *value < Decimal::ZERO)
        {
            return Err(CostingError::InvalidInput {
                part_code: self.part_code.clone(),
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

/// 浮點來源的料件（表單或試算表匯入）
///
/// 轉換為 [`Item`] 時拒絕 NaN 與無限大。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    pub sr_no: u32,
    pub part_code: String,
    pub part_name: String,
    pub copper_wt_pcs: f64,
    pub lme: f64,
    pub freight: f64,
    pub capillary_wt_pcs: f64,
    pub bme: f64,
    pub fab_cost_freight: f64,
    pub bop_part: Option<String>,
    pub price: f64,
    pub brazing_weight: f64,
    pub labour: f64,
    pub consumables: f64,
    pub admit_cost: f64,
    pub packing_handling: f64,
    pub freight2: f64,
}

impl TryFrom<RawItem> for Item {
    type Error = CostingError;

    fn try_from(raw: RawItem) -> Result<Self> {
        let part_code = raw.part_code.as_str();
        let item = Item {
            sr_no: raw.sr_no,
            part_code: raw.part_code.clone(),
            part_name: raw.part_name.clone(),
            copper_wt_pcs: to_decimal(part_code, "copperWtPcs", raw.copper_wt_pcs)?,
            lme: to_decimal(part_code, "lme", raw.lme)?,
            freight: to_decimal(part_code, "freight", raw.freight)?,
            capillary_wt_pcs: to_decimal(part_code, "capillaryWtPcs", raw.capillary_wt_pcs)?,
            bme: to_decimal(part_code, "bme", raw.bme)?,
            fab_cost_freight: to_decimal(part_code, "fabCostFreight", raw.fab_cost_freight)?,
            bop_part: raw.bop_part.clone(),
            price: to_decimal(part_code, "price", raw.price)?,
            brazing_weight: to_decimal(part_code, "brazingWeight", raw.brazing_weight)?,
            labour: to_decimal(part_code, "labour", raw.labour)?,
            consumables: to_decimal(part_code, "consumables", raw.consumables)?,
            admit_cost: to_decimal(part_code, "admitCost", raw.admit_cost)?,
            packing_handling: to_decimal(part_code, "packingHandling", raw.packing_handling)?,
            freight2: to_decimal(part_code, "freight2", raw.freight2)?,
        };
        item.validate()?;
        Ok(item)
    }
}

fn to_decimal(part_code: &str, field: &'static str, value: f64) -> Result<Decimal> {
    let invalid = || CostingError::InvalidInput {
        part_code: part_code.to_string(),
        field,
        value: value.to_string(),
    };

    if !value.is_finite() {
        return Err(invalid());
    }
    Decimal::try_from(value).map_err(|_| invalid())
}

/// 捲算結果（每次重新計算，不儲存）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedCosts {
    /// 銅材原料成本 = 重量 × LME + 運費
    pub rm_cost_copper: Decimal,

    /// 銅價 = BME + 加工費及運費
    pub copper_cost: Decimal,

    /// 毛細管原料成本 = 銅價 × 毛細管重量
    pub rm_cost_capillary: Decimal,

    /// 原料總成本
    pub total_rm_cost: Decimal,

    /// 外購件金額
    pub total_amt_bop: Decimal,

    /// 焊料金額 = 焊料重量 × LME
    pub total_amt_brazing: Decimal,

    /// 庫存持有成本（僅列示，不計入小計）
    pub inventory_carrying_cost: Decimal,

    /// 原料報廢
    pub rejection_rm: Decimal,

    /// 報廢回收
    pub rejection_recovery: Decimal,

    /// 報廢後小計
    pub total_after_rejection: Decimal,

    /// 利潤
    pub profit: Decimal,

    /// 總計（G-Total）
    pub g_total: Decimal,
}

impl DerivedCosts {
    /// 報廢淨損失（報廢 - 回收）
    pub fn net_rejection_loss(&self) -> Decimal {
        self.rejection_rm - self.rejection_recovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn copper_tube() -> Item {
        Item::new("CU-2847".to_string(), "Copper Tube Assembly".to_string())
            .with_sr_no(1)
            .with_copper(Decimal::new(45, 2), Decimal::from(8500), Decimal::from(120))
            .with_capillary(Decimal::new(8, 2), Decimal::from(9200), Decimal::from(450))
            .with_bop_part("BOP-123".to_string(), Decimal::from(850))
            .with_brazing_weight(Decimal::new(2, 2))
            .with_conversion(Decimal::from(120), Decimal::from(45), Decimal::from(75))
            .with_logistics(Decimal::from(35), Decimal::from(80))
    }

    #[test]
    fn test_create_item() {
        let item = copper_tube();

        assert_eq!(item.part_code, "CU-2847");
        assert_eq!(item.copper_wt_pcs, Decimal::new(45, 2));
        assert_eq!(item.bop_part, Some("BOP-123".to_string()));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_field() {
        let mut item = copper_tube();
        item.labour = Decimal::from(-5);

        match item.validate() {
            Err(CostingError::InvalidInput {
                part_code, field, ..
            }) => {
                assert_eq!(part_code, "CU-2847");
                assert_eq!(field, "labour");
            }
            other => panic!("預期 InvalidInput，實際 {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "srNo": 2,
            "partName": "Copper Connector",
            "partCode": "CU-9123",
            "copperWtPcs": 0.32,
            "lme": 8500,
            "freight": 120,
            "capillaryWtPcs": 0.05,
            "bme": 9200,
            "fabCostFreight": 380,
            "bopPart": "BOP-456",
            "price": 620,
            "brazingWeight": 0.015,
            "labour": 95,
            "consumables": 35,
            "admitCost": 60,
            "packingHandling": 28,
            "freight2": 65
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.sr_no, 2);
        assert_eq!(item.part_code, "CU-9123");
        assert_eq!(item.copper_wt_pcs, Decimal::new(32, 2));
        assert_eq!(item.brazing_weight, Decimal::new(15, 3));
        assert_eq!(item.freight2, Decimal::from(65));
    }

    #[test]
    fn test_raw_item_conversion() {
        let raw = RawItem {
            part_code: "CU-0001".to_string(),
            part_name: "Test Part".to_string(),
            copper_wt_pcs: 0.5,
            lme: 8000.0,
            labour: 100.0,
            ..Default::default()
        };

        let item = Item::try_from(raw).unwrap();
        assert_eq!(item.copper_wt_pcs, Decimal::new(5, 1));
        assert_eq!(item.lme, Decimal::from(8000));
        assert_eq!(item.labour, Decimal::from(100));
    }

    #[rstest]
    #[case::nan(RawItem { lme: f64::NAN, ..Default::default() }, "lme")]
    #[case::infinite(RawItem { freight2: f64::INFINITY, ..Default::default() }, "freight2")]
    #[case::negative(RawItem { price: -1.0, ..Default::default() }, "price")]
    fn test_raw_item_rejected(#[case] raw: RawItem, #[case] expected: &str) {
        match Item::try_from(raw) {
            Err(CostingError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("預期 InvalidInput，實際 {:?}", other),
        }
    }

    #[test]
    fn test_raw_item_accepts_large_finite() {
        // 轉換只檢查有限且非負；溢位留給捲算時回報
        let raw = RawItem {
            part_code: "CU-HUGE".to_string(),
            copper_wt_pcs: 1e15,
            lme: 1e15,
            ..Default::default()
        };
        let item = Item::try_from(raw).unwrap();
        assert_eq!(item.lme, Decimal::from(1_000_000_000_000_000i64));
    }
}
