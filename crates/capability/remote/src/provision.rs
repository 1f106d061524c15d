//! 注册与基线初始化（Bootstrap Provisioner）
//!
//! 步骤（前一步成功才继续）：
//! 1. 校验连接串
//! 2. 按 email 查重
//! 3. 校验口令长度
//! 4. bcrypt 哈希后写入用户行
//! 5. 逐项「查不到就插入」：UserLimit、Active、默认分类
//!
//! 第 5 步失败时用户行已写入，不做补偿回滚。

use crate::connection::ConnectionString;
use crate::driver::{RemoteDriver, RemoteSession, RemoteUser};
use crate::error::RemoteError;
use chrono::Utc;
use guard_auth::{AuthError, PasswordPolicy, hash_password_blocking};
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_ROLE: &str = "Admin";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// 基线数据默认值。
#[derive(Debug, Clone)]
pub struct BootstrapDefaults {
    pub max_role: i32,
    pub active_status: bool,
    pub category_name: String,
}

impl Default for BootstrapDefaults {
    fn default() -> Self {
        Self {
            max_role: 6,
            active_status: true,
            category_name: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// 注册请求。
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub database_url: Option<String>,
    pub role: Option<String>,
}

/// 注册/初始化错误。
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Database URL is required")]
    MissingDatabaseUrl,
    #[error("Invalid database URL format")]
    InvalidConnectionString,
    #[error("Email is required")]
    MissingEmail,
    #[error("User already exists with this email")]
    UserAlreadyExists,
    #[error("{0}")]
    PasswordTooShort(AuthError),
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("remote database error: {0}")]
    Remote(RemoteError),
    #[error("user {user_id} created but baseline provisioning failed: {source}")]
    Bootstrap {
        user_id: String,
        #[source]
        source: RemoteError,
    },
}

impl ProvisionError {
    /// 调用方输入问题（映射为 400）。
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDatabaseUrl
                | Self::InvalidConnectionString
                | Self::MissingEmail
                | Self::UserAlreadyExists
                | Self::PasswordTooShort(_)
        )
    }
}

impl From<RemoteError> for ProvisionError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::MissingDatabaseUrl => Self::MissingDatabaseUrl,
            RemoteError::InvalidConnectionString => Self::InvalidConnectionString,
            other => Self::Remote(other),
        }
    }
}

pub struct Provisioner {
    driver: Arc<dyn RemoteDriver>,
    defaults: BootstrapDefaults,
    policy: PasswordPolicy,
}

impl Provisioner {
    pub fn new(driver: Arc<dyn RemoteDriver>, defaults: BootstrapDefaults) -> Self {
        Self {
            driver,
            defaults,
            policy: PasswordPolicy::default(),
        }
    }

    /// 在外部库注册用户并补齐基线数据，返回新建的用户行。
    pub async fn register_and_provision(
        &self,
        request: RegistrationRequest,
    ) -> Result<RemoteUser, ProvisionError> {
        let target = ConnectionString::parse_optional(request.database_url.as_deref())?;
        let email = request.email.trim().to_string();
        if email.is_empty() {
            return Err(ProvisionError::MissingEmail);
        }
        let session = self.driver.connect(&target).await?;
        let result = self.provision(session.as_ref(), &request, email).await;
        session.close().await;
        match &result {
            Ok(user) => {
                guard_telemetry::record_registration();
                tracing::info!(host = %target.host(), user_id = %user.id, "remote user registered");
            }
            Err(ProvisionError::UserAlreadyExists) => {
                guard_telemetry::record_registration_conflict();
            }
            Err(err @ ProvisionError::Bootstrap { .. }) => {
                guard_telemetry::record_provisioning_failure();
                tracing::error!(host = %target.host(), error = %err, "baseline provisioning incomplete");
            }
            Err(_) => {}
        }
        result
    }

    async fn provision(
        &self,
        session: &dyn RemoteSession,
        request: &RegistrationRequest,
        email: String,
    ) -> Result<RemoteUser, ProvisionError> {
        if session.user_exists(&email).await? {
            return Err(ProvisionError::UserAlreadyExists);
        }
        self.policy
            .check(&request.password)
            .map_err(ProvisionError::PasswordTooShort)?;
        let password = hash_password_blocking(request.password.clone())
            .await
            .map_err(|err| match err {
                AuthError::Internal(message) => ProvisionError::Hash(message),
                other => ProvisionError::Hash(other.to_string()),
            })?;

        let now = Utc::now();
        let user = RemoteUser {
            id: Uuid::new_v4().to_string(),
            name: display_name(request.name.as_deref(), &email),
            email,
            password,
            role: request
                .role
                .as_deref()
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .unwrap_or(DEFAULT_ROLE)
                .to_string(),
            created_at: now,
            updated_at: now,
        };
        session.insert_user(&user).await?;

        self.ensure_defaults(session)
            .await
            .map_err(|source| ProvisionError::Bootstrap {
                user_id: user.id.clone(),
                source,
            })?;
        Ok(user)
    }

    async fn ensure_defaults(&self, session: &dyn RemoteSession) -> Result<(), RemoteError> {
        if !session.user_limit_exists().await? {
            session
                .insert_user_limit(&Uuid::new_v4().to_string(), self.defaults.max_role)
                .await?;
        }
        if !session.active_status_exists().await? {
            session
                .insert_active_status(&Uuid::new_v4().to_string(), self.defaults.active_status)
                .await?;
        }
        if !session.category_exists(&self.defaults.category_name).await? {
            session
                .insert_category(&Uuid::new_v4().to_string(), &self.defaults.category_name)
                .await?;
        }
        Ok(())
    }
}

/// 未提供姓名时取 email 的 @ 前部分。
fn display_name(name: Option<&str>, email: &str) -> String {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => email.split('@').next().unwrap_or(email).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::display_name;

    #[test]
    fn display_name_falls_back_to_local_part() {
        assert_eq!(display_name(None, "owner@shop.com"), "owner");
        assert_eq!(display_name(Some("  "), "owner@shop.com"), "owner");
        assert_eq!(display_name(Some(" Jane "), "owner@shop.com"), "Jane");
    }
}
