//! 输入验证辅助函数
//!
//! - lenient_json：外部库端点的请求体解析，缺失或非法 JSON 视为空对象
//! - strict_json：其余端点的请求体解析，非法 JSON 返回 400
//! - normalize_required / normalize_optional：去除首尾空格并检查非空
//! - field_value：把 JSON 值转换为字段级更新的原始值

use crate::utils::response::bad_request_error;
use axum::{body::Bytes, response::Response};
use domain::FieldValue;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 宽松解析请求体（失败时返回默认值，由后续必填校验给出 400）
pub fn lenient_json<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_default()
}

/// 严格解析请求体
pub fn strict_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    let slice: &[u8] = if body.is_empty() { b"{}" } else { body };
    serde_json::from_slice(slice).map_err(|err| bad_request_error(format!("invalid body: {err}")))
}

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: Option<String>, field: &str) -> Result<String, Response> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(bad_request_error(format!("{field} required"))),
    }
}

/// 验证可选字段，如果提供则去除空格并检查非空
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, Response> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(bad_request_error(format!("{field} required")));
            }
            Ok(Some(trimmed.to_string()))
        }
        None => Ok(None),
    }
}

/// JSON 值转字段原始值；null、数组与对象不接受
pub fn field_value(value: Value) -> Option<FieldValue> {
    match value {
        Value::Bool(flag) => Some(FieldValue::Bool(flag)),
        Value::Number(number) => number.as_f64().map(FieldValue::Number),
        Value::String(text) => Some(FieldValue::Text(text)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_contract::DatabaseUrlRequest;

    #[test]
    fn lenient_json_defaults_on_garbage() {
        let req: DatabaseUrlRequest = lenient_json(&Bytes::from_static(b"not json"));
        assert!(req.database_url.is_none());
        let req: DatabaseUrlRequest = lenient_json(&Bytes::new());
        assert!(req.database_url.is_none());
    }

    #[test]
    fn field_value_maps_json_types() {
        assert_eq!(field_value(Value::Bool(true)), Some(FieldValue::Bool(true)));
        assert_eq!(
            field_value(serde_json::json!(12.5)),
            Some(FieldValue::Number(12.5))
        );
        assert_eq!(field_value(Value::Null), None);
    }

    #[test]
    fn required_rejects_blank() {
        assert!(normalize_required(Some("  ".to_string()), "name").is_err());
        assert!(normalize_required(None, "name").is_err());
        assert_eq!(
            normalize_required(Some(" shop ".to_string()), "name").ok(),
            Some("shop".to_string())
        );
    }
}
