pub mod child;
pub mod runtime;

pub use child::{ChildField, ChildFieldUpdate, FieldError, FieldValue, parse_join_date};
pub use runtime::{RuntimeMode, TlsMode, classify_tls_mode};

/// 分页请求（page 从 1 开始）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// 构造分页请求，缺省值为第 1 页、每页 10 条；非法值被收敛到合法区间。
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        let page = page.filter(|value| *value > 0).unwrap_or(1);
        let page_size = page_size
            .filter(|value| *value > 0)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .min(Self::MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// 根据总数计算分页信息。
    pub fn page_info(&self, total_count: u64) -> PageInfo {
        let total_pages = total_count.div_ceil(u64::from(self.page_size));
        PageInfo {
            current_page: self.page,
            page_size: self.page_size,
            total_count,
            total_pages,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// 分页结果元信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}
