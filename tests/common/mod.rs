//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use serde::Serialize;
use serde_json::json;
use swaggen::{ApiSchema, NamedSchema};

#[derive(Debug, Serialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

impl ApiSchema for Todo {
    fn api_schema() -> Option<NamedSchema> {
        Some(NamedSchema::named(
            "Todo",
            json!({
                "type": "object",
                "required": ["id", "title", "done"],
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "title": { "type": "string" },
                    "done": { "type": "boolean" },
                }
            }),
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct User {
    pub name: String,
}

impl ApiSchema for User {
    fn api_schema() -> Option<NamedSchema> {
        Some(NamedSchema::named(
            "User",
            json!({
                "type": "object",
                "required": ["name"],
                "properties": { "name": { "type": "string" } }
            }),
        ))
    }
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
