//! LeakCheck Core - Foundation crate for the LeakCheck lookup service.
//!
//! This crate provides the lookup contract shared by every other LeakCheck
//! crate: the query and result types, error handling, and configuration.
//!
//! # Modules
//!
//! - [`error`] - Validation and configuration errors using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Query and result types (`QueryKind`, `Identifier`, `LeakResult`)
//!
//! # Example
//!
//! ```rust
//! use leakcheck_core::{Identifier, LeakResult, QueryKind, Severity};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let identifier = Identifier::new("  a@b.com ", QueryKind::Email)?;
//! assert_eq!(identifier.value(), "a@b.com");
//!
//! let result = LeakResult::safe();
//! assert_eq!(result.severity(), Severity::Safe);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BackendConfig, BackendKind, DatabaseConfig, ServerConfig, StandInConfig};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use types::{BreachRecord, Identifier, LeakResult, QueryKind, Severity};
