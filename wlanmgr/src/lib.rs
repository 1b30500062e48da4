//! Connection lifecycle management for a single Wi-Fi interface.
//!
//! This crate orchestrates a station-mode radio driver on a small device:
//!
//! - Connecting with a bounded number of attempts and a per-attempt timeout
//! - Classifying failures (wrong password, access point out of range, ...)
//! - Watching the link once it is up and reconnecting after drops
//! - Notifying observers when the link comes up or goes down
//!
//! The driver itself is supplied by the caller through the [`Radio`] trait.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wlanmgr::{ConnectionManager, Credentials, ManagerConfig};
//!
//! # async fn example(radio: Arc<impl wlanmgr::Radio + 'static>) -> wlanmgr::Result<()> {
//! let manager = ConnectionManager::new(
//!     radio,
//!     Credentials::new("MyNetwork", "password123")?,
//!     ManagerConfig::new().with_retry_count(5),
//! )?;
//!
//! manager.connect().await?;
//! println!("MAC {} / IP {}", manager.get_mac_address().await?, manager.get_ip_address().await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, WlanError>`. A rejected password is
//! reported at once as [`WlanError::InvalidCredentials`]; every other
//! failure is retried until the configured attempts are used up. Once the
//! link is maintained in the background, failures are only logged.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade. Diagnostic
//! messages are logged at `debug`, or at `info` when
//! [`ManagerConfig::verbose`] is set. Passwords are never logged.

// Internal implementation modules
mod core;
mod util;

// Public API modules
pub mod api;
pub mod radio;
pub mod types;

// Re-exported public API
pub use api::connection_manager::ConnectionManager;
pub use api::models::{
    Credentials, IpConfig, LinkStatus, ManagerConfig, ManagerState, RadioError, WlanError,
    status_to_error,
};
pub use api::signal::{LinkSignal, SignalListener};
pub use radio::Radio;

/// A specialized `Result` type for connection management.
pub type Result<T> = std::result::Result<T, WlanError>;
