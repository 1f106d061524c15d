//! 子账户字段级更新（封闭字段集 + 按字段校验/转换）。

use chrono::{DateTime, NaiveDate, Utc};

/// 客户端提交的原始字段值。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// 字段更新校验错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// 允许更新的子账户字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildField {
    Name,
    Email,
    Phone,
    Domain,
    TotalAmount,
    Status,
    JoinDate,
    DatabaseUrl,
}

impl ChildField {
    /// 对外字段名（与前端表单保持一致）。
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Domain => "domain",
            Self::TotalAmount => "totalAmt",
            Self::Status => "status",
            Self::JoinDate => "joinDate",
            Self::DatabaseUrl => "databaseUrl",
        }
    }

    pub fn parse(name: &str) -> Result<Self, FieldError> {
        match name.trim() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "domain" => Ok(Self::Domain),
            "totalAmt" | "totalAmount" => Ok(Self::TotalAmount),
            "status" => Ok(Self::Status),
            "joinDate" => Ok(Self::JoinDate),
            "databaseUrl" => Ok(Self::DatabaseUrl),
            other => Err(FieldError::UnknownField(other.to_string())),
        }
    }
}

/// 已校验的单字段更新。
#[derive(Debug, Clone, PartialEq)]
pub enum ChildFieldUpdate {
    Name(String),
    Email(String),
    Phone(String),
    Domain(String),
    TotalAmount(f64),
    Status(bool),
    JoinDate(DateTime<Utc>),
    DatabaseUrl(String),
}

impl ChildFieldUpdate {
    /// 按字段名解析并校验原始值。
    pub fn parse(field: &str, value: FieldValue) -> Result<Self, FieldError> {
        let field = ChildField::parse(field)?;
        Self::from_value(field, value)
    }

    pub fn from_value(field: ChildField, value: FieldValue) -> Result<Self, FieldError> {
        let name = field.as_str();
        match field {
            ChildField::Name => {
                let text = required_text(name, value)?;
                Ok(Self::Name(text.to_lowercase()))
            }
            ChildField::Email => {
                let text = required_text(name, value)?;
                if !text.contains('@') {
                    return Err(invalid(name, "must contain '@'"));
                }
                Ok(Self::Email(text.to_lowercase()))
            }
            ChildField::Phone => {
                let text = required_text(name, value)?;
                if text.chars().count() < 10 {
                    return Err(invalid(name, "must be at least 10 characters"));
                }
                Ok(Self::Phone(text))
            }
            ChildField::Domain => {
                let text = required_text(name, value)?;
                Ok(Self::Domain(text.to_lowercase()))
            }
            ChildField::TotalAmount => {
                let amount = match value {
                    FieldValue::Number(number) => number,
                    FieldValue::Text(text) => text
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| invalid(name, "not a number"))?,
                    FieldValue::Bool(_) => return Err(invalid(name, "not a number")),
                };
                if !amount.is_finite() || amount < 0.0 {
                    return Err(invalid(name, "must be a non-negative number"));
                }
                Ok(Self::TotalAmount(amount))
            }
            ChildField::Status => match value {
                FieldValue::Bool(flag) => Ok(Self::Status(flag)),
                FieldValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                    "true" => Ok(Self::Status(true)),
                    "false" => Ok(Self::Status(false)),
                    _ => Err(invalid(name, "expected true or false")),
                },
                FieldValue::Number(_) => Err(invalid(name, "expected true or false")),
            },
            ChildField::JoinDate => {
                let text = required_text(name, value)?;
                let date = parse_join_date(&text).ok_or_else(|| invalid(name, "not a date"))?;
                Ok(Self::JoinDate(date))
            }
            ChildField::DatabaseUrl => {
                let text = required_text(name, value)?;
                if !text.starts_with("postgres") {
                    return Err(invalid(name, "must be a postgres connection string"));
                }
                Ok(Self::DatabaseUrl(text))
            }
        }
    }

    pub fn field(&self) -> ChildField {
        match self {
            Self::Name(_) => ChildField::Name,
            Self::Email(_) => ChildField::Email,
            Self::Phone(_) => ChildField::Phone,
            Self::Domain(_) => ChildField::Domain,
            Self::TotalAmount(_) => ChildField::TotalAmount,
            Self::Status(_) => ChildField::Status,
            Self::JoinDate(_) => ChildField::JoinDate,
            Self::DatabaseUrl(_) => ChildField::DatabaseUrl,
        }
    }
}

/// 解析加入日期：接受 RFC 3339 时间戳或 `YYYY-MM-DD`（按 UTC 零点）。
pub fn parse_join_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn required_text(field: &'static str, value: FieldValue) -> Result<String, FieldError> {
    let text = match value {
        FieldValue::Text(text) => text,
        FieldValue::Number(number) => number.to_string(),
        FieldValue::Bool(_) => return Err(invalid(field, "expected text")),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, "required"));
    }
    Ok(trimmed.to_string())
}

fn invalid(field: &'static str, reason: &str) -> FieldError {
    FieldError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}
