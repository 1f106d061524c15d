//! Handlers 模块

pub mod api_status;
pub mod children;
pub mod connectivity;
pub mod register;
pub mod system;
pub mod updates;

pub use api_status::*;
pub use children::*;
pub use connectivity::*;
pub use register::*;
pub use system::*;
pub use updates::*;
