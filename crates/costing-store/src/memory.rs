//! 記憶體內資料存取實現

use costing_core::{Commodity, ComparisonItem, CostingError, Item, Result, Vendor};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::repository::CostingRepository;

/// 內建範例資料集
const SAMPLE_DATASET: &str = include_str!("../data/sample.json");

/// 資料集（JSON 格式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub commodities: Vec<Commodity>,
    pub vendors: Vec<VendorRecord>,
}

/// 單一供應商的資料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRecord {
    pub vendor: Vendor,

    /// 採購料件
    #[serde(default)]
    pub items: Vec<Item>,

    /// 比價報價
    #[serde(default)]
    pub quotes: Vec<ComparisonItem>,
}

/// 記憶體內資料存取
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    /// 供應商（依登錄順序）
    records: Vec<VendorRecord>,

    /// 供應商ID -> records 索引
    index: HashMap<String, usize>,

    commodities: Vec<Commodity>,
}

impl InMemoryRepository {
    /// 創建空的資料存取
    pub fn new() -> Self {
        Self::default()
    }

    /// 載入內建範例資料集
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_DATASET)
    }

    /// 從 JSON 載入資料集
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Self::from_dataset(dataset)
    }

    /// 從資料集建立，料件逐筆檢查
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let mut repo = Self::new();

        for commodity in dataset.commodities {
            repo.add_commodity(commodity);
        }

        for record in dataset.vendors {
            let vendor_id = record.vendor.id.clone();
            repo.add_vendor(record.vendor);
            repo.add_items(&vendor_id, record.items)?;
            repo.add_quotes(&vendor_id, record.quotes)?;
        }

        tracing::info!(
            "資料集載入完成：供應商 {} 家，大宗物料 {} 項",
            repo.records.len(),
            repo.commodities.len()
        );

        Ok(repo)
    }

    /// 建構器模式：添加供應商
    pub fn with_vendor(mut self, vendor: Vendor) -> Self {
        self.add_vendor(vendor);
        self
    }

    /// 添加供應商；ID 已存在時更新供應商資料，保留料件與報價
    pub fn add_vendor(&mut self, vendor: Vendor) {
        match self.index.get(&vendor.id) {
            Some(&idx) => self.records[idx].vendor = vendor,
            None => {
                self.index.insert(vendor.id.clone(), self.records.len());
                self.records.push(VendorRecord {
                    vendor,
                    items: Vec::new(),
                    quotes: Vec::new(),
                });
            }
        }
    }

    /// 添加採購料件
    ///
    /// 料件須通過檢查，且料號在同一供應商內不得重複；任一筆失敗則整批不寫入。
    pub fn add_items(&mut self, vendor_id: &str, items: Vec<Item>) -> Result<()> {
        let record = self.record_mut(vendor_id)?;

        let mut seen: HashSet<&str> = record.items.iter().map(|i| i.part_code.as_str()).collect();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.part_code.as_str()) {
                return Err(CostingError::DuplicatePartCode {
                    vendor_id: vendor_id.to_string(),
                    part_code: item.part_code.clone(),
                });
            }
        }

        record.items.extend(items);
        record.items.sort_by_key(|i| i.sr_no);
        Ok(())
    }

    /// 添加比價報價；同料號的報價以新值取代
    pub fn add_quotes(&mut self, vendor_id: &str, quotes: Vec<ComparisonItem>) -> Result<()> {
        let record = self.record_mut(vendor_id)?;

        for quote in quotes {
            match record
                .quotes
                .iter_mut()
                .find(|q| q.part_code == quote.part_code)
            {
                Some(existing) => *existing = quote,
                None => record.quotes.push(quote),
            }
        }
        Ok(())
    }

    /// 添加大宗物料
    pub fn add_commodity(&mut self, commodity: Commodity) {
        self.commodities.push(commodity);
    }

    fn record(&self, vendor_id: &str) -> Result<&VendorRecord> {
        self.index
            .get(vendor_id)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| CostingError::VendorNotFound(vendor_id.to_string()))
    }

    fn record_mut(&mut self, vendor_id: &str) -> Result<&mut VendorRecord> {
        let idx = *self
            .index
            .get(vendor_id)
            .ok_or_else(|| CostingError::VendorNotFound(vendor_id.to_string()))?;
        Ok(&mut self.records[idx])
    }
}

impl CostingRepository for InMemoryRepository {
    fn list_vendors(&self) -> Vec<Vendor> {
        self.records.iter().map(|r| r.vendor.clone()).collect()
    }

    fn get_vendor(&self, vendor_id: &str) -> Result<Vendor> {
        self.record(vendor_id).map(|r| r.vendor.clone())
    }

    fn list_items_for_vendor(&self, vendor_id: &str) -> Result<Vec<Item>> {
        self.record(vendor_id).map(|r| r.items.clone())
    }

    fn list_comparison_items(&self, vendor_id: &str) -> Result<Vec<ComparisonItem>> {
        self.record(vendor_id).map(|r| r.quotes.clone())
    }

    fn list_commodities(&self) -> Vec<Commodity> {
        self.commodities.clone()
    }
}
