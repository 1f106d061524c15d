//! 内存存储实现模块
//!
//! 仅用于本地演示和测试（未配置 GUARD_DATABASE_URL 时启用）。
//!
//! 包含以下实现：
//! - ChildStore: InMemoryChildStore
//! - UpdateStore: InMemoryUpdateStore

pub mod child;
pub mod update;

pub use child::*;
pub use update::*;
