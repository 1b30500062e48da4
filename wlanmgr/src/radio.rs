//! The radio driver capability the manager orchestrates.
//!
//! The manager never constructs a radio itself. Callers hand one in through
//! [`ConnectionManager::new`](crate::ConnectionManager::new), which keeps
//! unrelated managers from sharing an implicit process-wide handle and
//! lets tests substitute a scripted driver.

use async_trait::async_trait;

use crate::Result;
use crate::api::models::IpConfig;

/// Operations a station-mode Wi-Fi driver must provide.
///
/// Implementations report driver failures as
/// [`WlanError::Radio`](crate::WlanError::Radio).
#[async_trait]
pub trait Radio: Send + Sync {
    /// Powers the interface up or down.
    async fn set_active(&self, active: bool) -> Result<()>;

    /// Returns whether the link is currently up.
    async fn is_connected(&self) -> Result<bool>;

    /// Starts associating with `ssid`.
    ///
    /// Must not block until the link is up; progress is read through
    /// [`status`](Self::status).
    async fn connect(&self, ssid: &str, password: &str) -> Result<()>;

    /// Drops the current association, if any.
    async fn disconnect(&self) -> Result<()>;

    /// Returns the raw driver status code.
    ///
    /// See [`types::constants::link_status`](crate::types::constants::link_status).
    async fn status(&self) -> Result<i32>;

    /// Writes the power management mode.
    async fn set_power_management(&self, mode: u32) -> Result<()>;

    /// Reads the hardware address.
    async fn mac_address(&self) -> Result<[u8; 6]>;

    /// Reads the current IP configuration.
    async fn ifconfig(&self) -> Result<IpConfig>;
}
