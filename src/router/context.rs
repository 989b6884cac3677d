//! Per-request state passed through hooks and handlers.

use std::collections::HashMap;
use std::num::ParseIntError;

use serde::Serialize;

/// Request-scoped state.
#[derive(Debug, Clone)]
pub struct Context {
    method: String,
    path: String,
    /// Parameters extracted by the matched pattern.
    pub params: HashMap<String, String>,
    /// Scratch space shared by hooks and the handler.
    pub data: HashMap<String, serde_json::Value>,
    status: u16,
    body: String,
}

impl Context {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            params,
            data: HashMap::new(),
            status: 200,
            body: String::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameter `key`, or `default` when absent.
    pub fn param_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.params.get(key).map_or(default, String::as_str)
    }

    /// Parameter `key` parsed as an integer, or `default` when absent.
    pub fn param_int(&self, key: &str, default: i64) -> Result<i64, ParseIntError> {
        match self.params.get(key) {
            Some(raw) => raw.parse(),
            None => Ok(default),
        }
    }

    pub fn write_str(&mut self, text: &str) {
        self.body.push_str(text);
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Set `status` and replace the body with its reason phrase.
    pub fn reject(&mut self, status: u16) {
        self.status = status;
        self.body = reason_phrase(status).to_string();
    }

    pub fn into_response(self) -> Response {
        Response {
            status: self.status,
            body: self.body,
            data: self.data,
        }
    }
}

/// What a dispatch produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: String,
    /// Request data left by hooks and the handler.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, serde_json::Value>,
}

impl Response {
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            body: reason_phrase(status).to_string(),
            data: HashMap::new(),
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "",
    }
}
