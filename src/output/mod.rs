pub mod human;

use serde_json::{Value, json};

use crate::core::profile::ValidationErrors;

/// JSON envelope wrapped around every command result.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Error envelope listing each failing profile field.
pub fn validation_error(command: &str, errors: &ValidationErrors) -> Value {
    let fields: Vec<Value> = errors
        .0
        .iter()
        .map(|e| json!({ "field": e.field(), "message": e.to_string() }))
        .collect();
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": "validation_error",
            "message": errors.to_string(),
            "fields": fields
        }
    })
}
