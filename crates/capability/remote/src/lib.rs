//! 外部数据库能力
//!
//! 面向客户站点自带的 PostgreSQL 库，每个请求独立建立一次性会话：
//! - connection：连接串校验与连接参数（超时、TLS 策略）
//! - driver：RemoteDriver / RemoteSession 接口
//! - postgres：基于 sqlx 的实现
//! - in_memory：内存实现（测试与本地演示）
//! - probe：连通性探测
//! - status：Active 状态读取与切换
//! - provision：注册用户并补齐基线数据

pub mod connection;
pub mod driver;
pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod probe;
pub mod provision;
pub mod status;

pub use connection::{CONNECTION_SCHEME_PREFIX, ConnectionSettings, ConnectionString};
pub use driver::{
    ACTIVE_TABLE, CATEGORIES_TABLE, RemoteDriver, RemoteSession, RemoteUser, USER_LIMIT_TABLE,
    USERS_TABLE,
};
pub use error::{ConnectivityError, ConnectivityKind, RemoteError};
pub use in_memory::{InMemoryRemoteDriver, RemoteDatabase};
pub use postgres::{PgRemoteDriver, classify_sqlx_error};
pub use probe::{LivenessProber, PROBE_SUCCESS_MESSAGE, ProbeReport};
pub use provision::{
    BootstrapDefaults, DEFAULT_CATEGORY, DEFAULT_ROLE, ProvisionError, Provisioner,
    RegistrationRequest,
};
pub use status::{ActiveStatus, StatusError, StatusService};
