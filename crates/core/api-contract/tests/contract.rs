use api_contract::{
    CheckDbResponse, ChildFieldUpdateRequest, CreateChildRequest, CreateUpdateRequest,
    DatabaseUrlRequest, MessageResponse, RegisterRequest,
};
use serde_json::Value;

#[test]
fn database_url_request_is_camel_case() {
    let req: DatabaseUrlRequest =
        serde_json::from_str(r#"{"databaseUrl":"postgres://u:p@h/db"}"#).expect("parse");
    assert_eq!(req.database_url.as_deref(), Some("postgres://u:p@h/db"));

    let empty: DatabaseUrlRequest = serde_json::from_str("{}").expect("parse");
    assert!(empty.database_url.is_none());
}

#[test]
fn check_db_success_omits_error_fields() {
    let response = CheckDbResponse {
        success: true,
        message: "Database connection successful".to_string(),
        error: None,
        code: None,
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert_eq!(value["success"], Value::Bool(true));
    assert!(value.get("error").is_none());
    assert!(value.get("code").is_none());
}

#[test]
fn message_response_with_error() {
    let value = serde_json::to_value(MessageResponse::with_error(
        "Error checking API status",
        "relation \"Active\" does not exist",
    ))
    .expect("serialize");
    assert_eq!(value["message"], "Error checking API status");
    assert!(value["error"].as_str().is_some());

    let value = serde_json::to_value(MessageResponse::new("No active status found"))
        .expect("serialize");
    assert!(value.get("error").is_none());
}

#[test]
fn register_request_tolerates_missing_fields() {
    let req: RegisterRequest =
        serde_json::from_str(r#"{"email":"a@b.com","databaseUrl":"postgres://h/db"}"#)
            .expect("parse");
    assert_eq!(req.email, "a@b.com");
    assert!(req.password.is_empty());
    assert!(req.role.is_none());
}

#[test]
fn create_update_defaults_show_to_false() {
    let req: CreateUpdateRequest =
        serde_json::from_str(r#"{"title":"v2.1 released"}"#).expect("parse");
    assert!(!req.show);
    assert!(req.link.is_none());
}

#[test]
fn child_field_update_keeps_raw_value() {
    let req: ChildFieldUpdateRequest =
        serde_json::from_str(r#"{"field":"totalAmt","value":"12.5"}"#).expect("parse");
    assert_eq!(req.field, "totalAmt");
    assert_eq!(req.value, Value::String("12.5".to_string()));

    let req: ChildFieldUpdateRequest =
        serde_json::from_str(r#"{"field":"status","value":false}"#).expect("parse");
    assert_eq!(req.value, Value::Bool(false));
}

#[test]
fn create_child_request_is_camel_case() {
    let req: CreateChildRequest = serde_json::from_str(
        r#"{"name":"Shop","totalAmt":99.0,"joinDate":"2024-01-02","parentId":"p-1"}"#,
    )
    .expect("parse");
    assert_eq!(req.total_amt, Some(99.0));
    assert_eq!(req.join_date.as_deref(), Some("2024-01-02"));
    assert_eq!(req.parent_id.as_deref(), Some("p-1"));
    assert!(req.email.is_none());
}
