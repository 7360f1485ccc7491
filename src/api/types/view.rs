//! View results
//!
//! Handlers resolve to either a view identifier with a bag of named display
//! attributes, or a redirect path. Views render as JSON for whatever client
//! does the actual templating.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// A named view plus its display attributes
#[derive(Debug, Clone)]
pub struct View {
    name: &'static str,
    model: Map<String, Value>,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            model: Map::new(),
        }
    }

    /// Add a named attribute to the view model. Values that fail to
    /// serialize become null rather than failing the request.
    pub fn attr(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.model.insert(key.to_string(), value);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn model(&self) -> &Map<String, Value> {
        &self.model
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            Json(json!({
                "view": self.name,
                "model": self.model,
            })),
        )
            .into_response()
    }
}

/// Redirect-equivalent result (303, so form posts become GETs)
pub fn redirect(path: &str) -> Response {
    Redirect::to(path).into_response()
}
