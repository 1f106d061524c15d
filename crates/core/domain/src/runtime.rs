//! 运行模式与外部数据库 TLS 策略。

/// 进程运行模式（决定非托管主机的证书校验强度）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    /// 解析运行模式字符串；仅 `production`/`prod` 视为生产模式。
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// 外部数据库连接的 TLS 模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// 加密连接，但不校验服务端证书。
    Permissive,
    /// 加密连接并完整校验证书与主机名。
    Strict,
}

/// 根据主机名与运行模式选择 TLS 模式。
///
/// 主机名命中任一托管服务标记（忽略大小写）时强制 `Permissive`；
/// 否则开发模式 `Permissive`，生产模式 `Strict`。
pub fn classify_tls_mode(host: &str, mode: RuntimeMode, managed_markers: &[String]) -> TlsMode {
    let host = host.to_ascii_lowercase();
    let managed = managed_markers
        .iter()
        .map(|marker| marker.trim().to_ascii_lowercase())
        .any(|marker| !marker.is_empty() && host.contains(&marker));
    if managed || !mode.is_production() {
        TlsMode::Permissive
    } else {
        TlsMode::Strict
    }
}
