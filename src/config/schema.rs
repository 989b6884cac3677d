//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML route tables.

use serde::{Deserialize, Serialize};

use crate::router::Method;
use crate::trie::DEFAULT_DELIMITER;

/// Root configuration: custom placeholder types, routes and hooks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Segment delimiter for patterns and paths.
    pub delimiter: String,

    /// Custom placeholder types, usable as `<name:type>`.
    pub patterns: Vec<PatternConfig>,

    /// Route definitions.
    pub routes: Vec<RouteConfig>,

    /// Hooks attached to registered patterns or their prefixes.
    pub hooks: Vec<HookConfig>,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouteTableConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            patterns: Vec::new(),
            routes: Vec::new(),
            hooks: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A custom placeholder type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternConfig {
    /// Type name referenced from placeholders.
    pub name: String,

    /// Regular expression body, without the surrounding group.
    pub regex: String,
}

/// A route answering with a templated body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Pattern string, e.g. `/hi/<username:str>`.
    pub pattern: String,

    /// Methods served (default: GET).
    #[serde(default = "default_methods")]
    pub methods: Vec<Method>,

    /// Response status (default: 200).
    #[serde(default = "default_status")]
    pub status: u16,

    /// Response body; `{param}` is replaced by the matched parameter.
    #[serde(default)]
    pub body: String,
}

fn default_methods() -> Vec<Method> {
    vec![Method::Get]
}

fn default_status() -> u16 {
    200
}

/// When a hook runs relative to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookStage {
    Before,
    After,
}

/// A hook that records `label` in the request trace.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HookConfig {
    /// Pattern (or prefix of one) the hook attaches to.
    pub pattern: String,

    pub stage: HookStage,

    /// Label appended to the `trace` entry of the request data.
    pub label: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
