//! 验证辅助函数
//!
//! - ensure_parent：子账户查询必须带 parent_id
//! - search_pattern：把用户输入转成 ILIKE 模式（转义通配符）

use crate::error::StorageError;

/// 验证 parent_id 非空
pub fn ensure_parent(parent_id: &str) -> Result<(), StorageError> {
    if parent_id.trim().is_empty() {
        return Err(StorageError::new("parent_id required"));
    }
    Ok(())
}

/// 构造 `%关键字%` 形式的 ILIKE 模式，`%`、`_` 与 `\` 按字面匹配。
pub fn search_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// 内存实现使用的大小写不敏感包含匹配。
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
