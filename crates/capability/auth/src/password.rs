use crate::AuthError;

/// 外部库用户口令的 bcrypt cost（客户站点登录流程按此校验）。
pub const BCRYPT_COST: u32 = 10;

/// 口令最小长度（按字符计）。
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// 口令策略。
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    pub fn check(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.min_length {
            return Err(AuthError::PasswordTooShort {
                min: self.min_length,
            });
        }
        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|err| AuthError::Internal(err.to_string()))
}

pub fn verify_password(stored_password_hash: &str, password: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, stored_password_hash)
        .map_err(|err| AuthError::Internal(err.to_string()))
}

/// 在阻塞线程池中计算 bcrypt 哈希，避免占用异步工作线程。
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| AuthError::Internal(err.to_string()))?
}
