//! 供應商比價

use costing_core::{ComparisonItem, CostingError, Result, Vendor};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::variance::{variance, VarianceTrend};

/// 供應商摘要卡
#[derive(Debug, Clone)]
pub struct VendorSummary {
    pub vendor_id: String,
    pub vendor_name: String,

    /// 報價料件數
    pub item_count: usize,

    /// 報價總成本
    pub total_cost: Decimal,
}

/// 單一供應商的成本結構加總
#[derive(Debug, Clone)]
pub struct CostStructureTotals {
    pub vendor_id: String,

    /// 簡稱（圖表標籤）
    pub label: String,

    pub qualifiable: Decimal,
    pub less_qualifiable: Decimal,
    pub non_qualifiable: Decimal,
}

impl CostStructureTotals {
    pub fn total(&self) -> Result<Decimal> {
        sum_checked(
            [self.qualifiable, self.less_qualifiable, self.non_qualifiable],
            &self.vendor_id,
            "costStructureTotal",
        )
    }
}

/// 溢位檢查的加總
fn sum_checked(
    values: impl IntoIterator<Item = Decimal>,
    vendor_id: &str,
    step: &'static str,
) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(|| CostingError::Overflow {
            subject: vendor_id.to_string(),
            step,
        })
}

/// 比價表中的一列
#[derive(Debug, Clone)]
pub enum ComparisonRow {
    /// 供應商有報價
    Quoted {
        vendor_id: String,
        vendor_name: String,
        item: ComparisonItem,
        /// 與有報價供應商平均的差異百分比；無法比較時為 None
        variance_pct: Option<Decimal>,
        trend: Option<VarianceTrend>,
    },

    /// 未向該供應商採購此料件
    NotProcured {
        vendor_id: String,
        vendor_name: String,
    },
}

impl ComparisonRow {
    pub fn vendor_id(&self) -> &str {
        match self {
            ComparisonRow::Quoted { vendor_id, .. } | ComparisonRow::NotProcured { vendor_id, .. } => {
                vendor_id
            }
        }
    }

    pub fn is_procured(&self) -> bool {
        matches!(self, ComparisonRow::Quoted { .. })
    }

    /// 報價總成本
    pub fn total_cost(&self) -> Option<Decimal> {
        match self {
            ComparisonRow::Quoted { item, .. } => Some(item.total_cost),
            ComparisonRow::NotProcured { .. } => None,
        }
    }
}

/// 單一料件的逐家比價
#[derive(Debug, Clone)]
pub struct ItemComparison {
    pub part_code: String,
    pub description: String,

    /// 依選取順序，每家供應商一列
    pub rows: Vec<ComparisonRow>,
}

impl ItemComparison {
    /// 報價最低的列
    pub fn lowest(&self) -> Option<&ComparisonRow> {
        self.rows
            .iter()
            .filter_map(|row| row.total_cost().map(|cost| (cost, row)))
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, row)| row)
    }
}

/// 供應商比價結果
#[derive(Debug, Clone)]
pub struct VendorComparison {
    pub vendors: Vec<VendorSummary>,
    pub cost_structure: Vec<CostStructureTotals>,
    pub items: Vec<ItemComparison>,
}

impl VendorComparison {
    /// 建立比價結果
    ///
    /// 料件為所有選取供應商報價的聯集（依首次出現順序），
    /// 差異百分比只在有報價的供應商之間計算。
    pub fn build(selection: &[(Vendor, Vec<ComparisonItem>)]) -> Result<Self> {
        if selection.is_empty() {
            return Err(CostingError::NoVendorsSelected);
        }

        tracing::info!("開始供應商比價：供應商 {} 家", selection.len());

        let vendors = selection
            .iter()
            .map(|(vendor, items)| {
                Ok(VendorSummary {
                    vendor_id: vendor.id.clone(),
                    vendor_name: vendor.name.clone(),
                    item_count: items.len(),
                    total_cost: sum_checked(
                        items.iter().map(|i| i.total_cost),
                        &vendor.id,
                        "totalCost",
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cost_structure = selection
            .iter()
            .map(|(vendor, items)| {
                Ok(CostStructureTotals {
                    vendor_id: vendor.id.clone(),
                    label: vendor.short_name().to_string(),
                    qualifiable: sum_checked(
                        items.iter().map(|i| i.qualifiable_cost),
                        &vendor.id,
                        "qualifiable",
                    )?,
                    less_qualifiable: sum_checked(
                        items.iter().map(|i| i.less_qualifiable_cost),
                        &vendor.id,
                        "lessQualifiable",
                    )?,
                    non_qualifiable: sum_checked(
                        items.iter().map(|i| i.non_qualifiable_cost),
                        &vendor.id,
                        "nonQualifiable",
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let items = Self::compare_items(selection);

        tracing::info!("供應商比價完成：料件 {} 項", items.len());

        Ok(Self {
            vendors,
            cost_structure,
            items,
        })
    }

    /// 依料號取得比價
    pub fn item(&self, part_code: &str) -> Option<&ItemComparison> {
        self.items.iter().find(|i| i.part_code == part_code)
    }

    /// 逐料件比價
    fn compare_items(selection: &[(Vendor, Vec<ComparisonItem>)]) -> Vec<ItemComparison> {
        // 料號 -> (供應商ID -> 報價)，保留首次出現順序
        let mut order: Vec<&ComparisonItem> = Vec::new();
        let mut quotes: HashMap<&str, HashMap<&str, &ComparisonItem>> = HashMap::new();

        for (vendor, items) in selection {
            for item in items {
                let by_vendor = quotes.entry(item.part_code.as_str()).or_insert_with(|| {
                    order.push(item);
                    HashMap::new()
                });
                by_vendor.insert(vendor.id.as_str(), item);
            }
        }

        order
            .into_iter()
            .map(|first| {
                let by_vendor = &quotes[first.part_code.as_str()];
                Self::compare_item(first, by_vendor, selection)
            })
            .collect()
    }

    fn compare_item(
        first: &ComparisonItem,
        by_vendor: &HashMap<&str, &ComparisonItem>,
        selection: &[(Vendor, Vec<ComparisonItem>)],
    ) -> ItemComparison {
        let quoted: Vec<&ComparisonItem> = selection
            .iter()
            .filter_map(|(vendor, _)| by_vendor.get(vendor.id.as_str()).copied())
            .collect();
        let costs: Vec<Decimal> = quoted.iter().map(|i| i.total_cost).collect();

        let variances = match variance(&costs) {
            Ok(values) => Some(values),
            Err(err) => {
                tracing::warn!("料件 {} 無法比較: {}", first.part_code, err);
                None
            }
        };

        let mut quoted_index = 0;
        let rows = selection
            .iter()
            .map(|(vendor, _)| match by_vendor.get(vendor.id.as_str()) {
                Some(item) => {
                    let variance_pct = variances.as_ref().map(|v| v[quoted_index]);
                    quoted_index += 1;
                    ComparisonRow::Quoted {
                        vendor_id: vendor.id.clone(),
                        vendor_name: vendor.name.clone(),
                        item: (*item).clone(),
                        variance_pct,
                        trend: variance_pct.map(VarianceTrend::of),
                    }
                }
                None => ComparisonRow::NotProcured {
                    vendor_id: vendor.id.clone(),
                    vendor_name: vendor.name.clone(),
                },
            })
            .collect();

        ItemComparison {
            part_code: first.part_code.clone(),
            description: first.description.clone(),
            rows,
        }
    }
}
