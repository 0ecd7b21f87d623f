//! Common error handling utilities for the NurseOS events API
//!
//! This crate holds the process-level error type shared by the server binary
//! and the stable error codes returned in API error bodies.
//!
//! # Error Categories
//!
//! - **ConfigError**: configuration could not be loaded or is inconsistent
//! - **DatabaseError**: the event store could not be reached at startup
//! - **NetworkError**: the listener could not be bound
//! - **ServerError**: the HTTP server stopped with an error
//!
//! # Example
//!
//! ```rust
//! use error_common::{NurseOsError, Result};
//!
//! fn check_port(port: u16) -> Result<u16> {
//!     if port == 0 {
//!         return Err(NurseOsError::ConfigError("server.port must be non-zero".into()));
//!     }
//!     Ok(port)
//! }
//!
//! assert!(check_port(0).is_err());
//! assert_eq!(check_port(8000).unwrap(), 8000);
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
