//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect duplicate route patterns and placeholder type names
//! - Validate value ranges (status codes, non-empty fields)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouteTableConfig;
use crate::trie::PatternStore;

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("pattern type #{0} has an empty name")]
    EmptyTypeName(usize),

    #[error("pattern type `{0}` is defined more than once or shadows a built-in")]
    DuplicateTypeName(String),

    #[error("route #{0} has an empty pattern")]
    EmptyRoutePattern(usize),

    #[error("route `{0}` is defined more than once")]
    DuplicateRoute(String),

    #[error("route `{0}` lists no methods")]
    NoMethods(String),

    #[error("route `{pattern}` has invalid status {status}")]
    InvalidStatus { pattern: String, status: u16 },

    #[error("hook #{0} has an empty pattern")]
    EmptyHookPattern(usize),
}

/// Check a parsed route table, collecting every problem found.
pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.delimiter.is_empty() {
        errors.push(ValidationError::EmptyDelimiter);
    }

    let builtins = PatternStore::with_builtins();
    let mut type_names = HashSet::new();
    for (i, pattern) in config.patterns.iter().enumerate() {
        if pattern.name.is_empty() {
            errors.push(ValidationError::EmptyTypeName(i));
        } else if builtins.contains(&pattern.name) || !type_names.insert(pattern.name.as_str()) {
            errors.push(ValidationError::DuplicateTypeName(pattern.name.clone()));
        }
    }

    let mut routes = HashSet::new();
    for (i, route) in config.routes.iter().enumerate() {
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyRoutePattern(i));
            continue;
        }
        if !routes.insert(route.pattern.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.pattern.clone()));
        }
        if route.methods.is_empty() {
            errors.push(ValidationError::NoMethods(route.pattern.clone()));
        }
        if !(100..=599).contains(&route.status) {
            errors.push(ValidationError::InvalidStatus {
                pattern: route.pattern.clone(),
                status: route.status,
            });
        }
    }

    for (i, hook) in config.hooks.iter().enumerate() {
        if hook.pattern.is_empty() {
            errors.push(ValidationError::EmptyHookPattern(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
