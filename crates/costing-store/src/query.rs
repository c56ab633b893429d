//! 供應商查詢與分頁

use costing_core::{Vendor, VendorStatus};

/// 預設每頁筆數
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 分頁結果
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 目前頁碼（從 1 開始）
    pub page: usize,

    pub page_size: usize,

    /// 符合條件的總筆數
    pub total: usize,
}

impl<T> Page<T> {
    /// 總頁數（至少一頁）
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// 供應商查詢條件
#[derive(Debug, Clone)]
pub struct VendorQuery {
    /// 關鍵字（名稱、ID、所在地，不分大小寫）
    pub search: Option<String>,

    pub status: Option<VendorStatus>,

    /// 頁碼（從 1 開始）
    pub page: usize,

    pub page_size: usize,
}

impl Default for VendorQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl VendorQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置關鍵字
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: VendorStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// 建構器模式：設置頁碼與每頁筆數（至少 1）
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self
    }

    /// 檢查供應商是否符合條件
    pub fn matches(&self, vendor: &Vendor) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |keyword| vendor.matches(keyword));
        let status_ok = self.status.map_or(true, |status| vendor.status == status);
        search_ok && status_ok
    }

    /// 過濾並分頁
    pub fn apply(&self, vendors: &[Vendor]) -> Page<Vendor> {
        let matched: Vec<&Vendor> = vendors.iter().filter(|v| self.matches(v)).collect();
        let total = matched.len();

        let items = matched
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect();

        Page {
            items,
            page: self.page,
            page_size: self.page_size,
            total,
        }
    }
}
