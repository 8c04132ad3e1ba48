//! Centralized error types for motebridge
//!
//! The bridge core never terminates the host process: every failure a device
//! can provoke is either absorbed (malformed input, handshake failures, missing
//! configuration) or surfaced as one of the typed errors below.
//!
//! - [`common`]: umbrella [`BridgeError`] plus category/severity classification
//! - [`device`]: slot and device identity errors
//! - [`config`]: configuration precondition violations
//! - [`transport`]: failures reported by the privileged transport
//!
//! # Example
//!
//! ```
//! use motebridge_errors::{BridgeError, ConfigError, ErrorSeverity};
//!
//! let err: BridgeError = ConfigError::device_connected("00:11:22:33:44:55").into();
//! assert_eq!(err.severity(), ErrorSeverity::Error);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod config;
pub mod device;
pub mod transport;

pub use common::{BridgeError, ErrorCategory, ErrorSeverity};
pub use config::ConfigError;
pub use device::DeviceError;
pub use transport::TransportError;

/// A specialized `Result` type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
