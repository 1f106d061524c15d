//! 响应构造、请求体解析与 DTO 转换

pub mod response;
pub mod validation;

pub use response::*;
pub use validation::*;
