//! Route table configuration.
//!
//! # Data Flow
//! ```text
//! routes.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks, all errors at once)
//!     → RouteTableConfig (validated, immutable)
//!     → router::table::build_router
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a file with only `[[routes]]` is valid
//! - Validation separates syntactic (serde) from semantic checks
//! - Pattern syntax itself is checked when the router is built

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    HookConfig, HookStage, ObservabilityConfig, PatternConfig, RouteConfig, RouteTableConfig,
};
pub use validation::{validate_config, ValidationError};
