//! 外部数据库访问错误类型
//!
//! - ConnectivityError：连接阶段（或连接中断）的分类错误，附带驱动错误码与原始描述
//! - RemoteError：外部库访问的统一错误（输入、连接、查询、超时）

/// 连通性错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityKind {
    AuthenticationFailed,
    HostUnreachable,
    ConnectionTimedOut,
    Unknown,
}

/// 连通性错误（已分类）。展示文本即 [`ConnectivityError::message`]。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct ConnectivityError {
    kind: ConnectivityKind,
    code: Option<String>,
    detail: String,
}

impl ConnectivityError {
    pub fn new(kind: ConnectivityKind, code: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            detail: detail.into(),
        }
    }

    pub fn authentication_failed(detail: impl Into<String>) -> Self {
        Self::new(
            ConnectivityKind::AuthenticationFailed,
            Some("28P01".to_string()),
            detail,
        )
    }

    pub fn host_unreachable(code: &str, detail: impl Into<String>) -> Self {
        Self::new(ConnectivityKind::HostUnreachable, Some(code.to_string()), detail)
    }

    pub fn timed_out(detail: impl Into<String>) -> Self {
        Self::new(
            ConnectivityKind::ConnectionTimedOut,
            Some("ETIMEDOUT".to_string()),
            detail,
        )
    }

    pub fn unknown(code: Option<String>, detail: impl Into<String>) -> Self {
        Self::new(ConnectivityKind::Unknown, code, detail)
    }

    pub fn kind(&self) -> ConnectivityKind {
        self.kind
    }

    /// 驱动错误码（SQLSTATE 或 ECONNREFUSED/ENOTFOUND/ETIMEDOUT）。
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// 驱动给出的原始错误描述。
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// 面向用户的错误提示。
    pub fn message(&self) -> &str {
        match self.kind {
            ConnectivityKind::AuthenticationFailed => {
                "Password authentication failed. Please check your database credentials."
            }
            ConnectivityKind::HostUnreachable => {
                "Cannot reach database server. Please check the host and port."
            }
            ConnectivityKind::ConnectionTimedOut => {
                "Connection timeout. Please check your network connection."
            }
            ConnectivityKind::Unknown if self.detail.is_empty() => "Failed to connect to database",
            ConnectivityKind::Unknown => &self.detail,
        }
    }
}

/// 外部库访问错误。
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("Database URL is required")]
    MissingDatabaseUrl,
    #[error("Invalid database URL format")]
    InvalidConnectionString,
    #[error("{0}")]
    Connectivity(#[from] ConnectivityError),
    #[error("query timed out after {0} ms")]
    QueryTimedOut(u64),
    #[error("{message}")]
    Query {
        code: Option<String>,
        message: String,
    },
}

impl RemoteError {
    pub fn query(code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Query {
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    /// 是否属于调用方输入错误（缺失或格式错误的连接串）。
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::MissingDatabaseUrl | Self::InvalidConnectionString)
    }

    /// 统一折算为连通性错误（探测结果展示使用）。
    pub fn into_connectivity(self) -> ConnectivityError {
        match self {
            Self::Connectivity(err) => err,
            Self::QueryTimedOut(ms) => {
                ConnectivityError::timed_out(format!("query timed out after {ms} ms"))
            }
            Self::Query { code, message } => ConnectivityError::unknown(code, message),
            other => ConnectivityError::unknown(None, other.to_string()),
        }
    }
}
