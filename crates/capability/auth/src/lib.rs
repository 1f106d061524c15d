//! 口令能力：bcrypt 哈希、校验与口令策略。

mod password;

pub use password::{
    BCRYPT_COST, MIN_PASSWORD_LENGTH, PasswordPolicy, hash_password, hash_password_blocking,
    verify_password,
};

/// 口令相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("internal error: {0}")]
    Internal(String),
}
