use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::net::Ipv4Addr;
use thiserror::Error;

use crate::types::constants::{limits, link_status, timing};

/// Link status reported by the radio driver.
///
/// Use `LinkStatus::from(code)` to convert the raw integer returned by
/// [`Radio::status`](crate::Radio::status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    /// Association is in progress.
    Connecting,
    /// Associated, waiting for address assignment.
    IpPending,
    /// Associated with an address.
    GotIp,
    /// The access point rejected the password.
    WrongPassword,
    /// No access point with the SSID was found.
    NoAccessPoint,
    /// Connection failed for an unknown reason.
    ConnectFailed,
    /// Status code outside the recognized set.
    Other(i32),
}

impl From<i32> for LinkStatus {
    fn from(code: i32) -> Self {
        match code {
            link_status::CONNECTING => Self::Connecting,
            link_status::NO_IP => Self::IpPending,
            link_status::GOT_IP => Self::GotIp,
            link_status::WRONG_PASSWORD => Self::WrongPassword,
            link_status::NO_AP_FOUND => Self::NoAccessPoint,
            link_status::CONNECT_FAIL => Self::ConnectFailed,
            v => Self::Other(v),
        }
    }
}

impl Display for LinkStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::IpPending => write!(f, "waiting for IP address"),
            Self::GotIp => write!(f, "got IP address"),
            Self::WrongPassword => write!(f, "wrong password"),
            Self::NoAccessPoint => write!(f, "no access point found"),
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::Other(v) => write!(f, "unknown status ({v})"),
        }
    }
}

impl LinkStatus {
    /// Returns `true` if the attempt should keep waiting on this status.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Connecting | Self::IpPending)
    }
}

/// Converts a radio status code to the error that ends an attempt.
///
/// Returns `None` for in-progress codes. Recognized failures map to their
/// classified variant. Anything else, including `GotIp` reported while the
/// link is still down, maps to `UnexpectedStatus`.
pub fn status_to_error(code: i32) -> Option<WlanError> {
    match LinkStatus::from(code) {
        s if s.is_pending() => None,
        LinkStatus::WrongPassword => Some(WlanError::InvalidCredentials),
        LinkStatus::NoAccessPoint => Some(WlanError::AccessPointUnreachable),
        LinkStatus::ConnectFailed => Some(WlanError::ConnectionFailed),
        _ => Some(WlanError::UnexpectedStatus(code)),
    }
}

/// Failure reported by the radio driver itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: {message}")]
pub struct RadioError {
    /// Driver operation that failed, e.g. `"connect"`.
    pub operation: &'static str,
    /// Driver-supplied description.
    pub message: String,
}

impl RadioError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Errors that can occur while managing the connection.
///
/// Every variant except `InvalidCredentials` and `InvalidConfig` is
/// retryable: the initial connect spends an attempt on it and the
/// maintenance loop tries again on the next tick.
///
/// # Example
///
/// ```ignore
/// match manager.connect().await {
///     Ok(()) => println!("Connected"),
///     Err(WlanError::InvalidCredentials) => eprintln!("Wrong password"),
///     Err(WlanError::AccessPointUnreachable) => eprintln!("Network not in range"),
///     Err(e) => eprintln!("Could not connect: {e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WlanError {
    /// The access point rejected the password.
    #[error("invalid password was provided")]
    InvalidCredentials,

    /// No access point with the configured SSID could be reached.
    #[error("access point is not reachable")]
    AccessPointUnreachable,

    /// The connection failed for an unknown reason.
    #[error("the connection failed for unknown reasons")]
    ConnectionFailed,

    /// The attempt did not finish within its tick budget.
    #[error("connection timed out")]
    Timeout,

    /// The driver reported a status code outside the recognized set.
    #[error("unexpected status code received: {0}")]
    UnexpectedStatus(i32),

    /// A radio driver operation failed.
    #[error("radio error: {0}")]
    Radio(#[from] RadioError),

    /// Construction parameters were rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WlanError {
    /// Returns `true` if another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidCredentials | Self::InvalidConfig(_))
    }
}

/// Network credentials for the single managed profile.
///
/// The `Debug` output never contains the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) ssid: String,
    pub(crate) password: String,
}

impl Credentials {
    /// Creates credentials, rejecting SSIDs or passwords the radio could
    /// never accept.
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> crate::Result<Self> {
        let ssid = ssid.into();
        let password = password.into();

        if ssid.is_empty() {
            return Err(WlanError::InvalidConfig("SSID cannot be empty".into()));
        }
        if ssid.len() > limits::SSID_MAX_LEN {
            return Err(WlanError::InvalidConfig(format!(
                "SSID is {} bytes (max {})",
                ssid.len(),
                limits::SSID_MAX_LEN
            )));
        }
        if password.len() > limits::PASSWORD_MAX_LEN {
            return Err(WlanError::InvalidConfig(format!(
                "password is {} bytes (max {})",
                password.len(),
                limits::PASSWORD_MAX_LEN
            )));
        }

        Ok(Self { ssid, password })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Retry and timeout policy for a [`ConnectionManager`](crate::ConnectionManager).
///
/// # Example
///
/// ```ignore
/// let config = ManagerConfig::new()
///     .with_timeout_secs(10)
///     .with_retry_count(5)
///     .with_verbose(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Ticks (seconds) a single attempt may wait before timing out.
    pub timeout_secs: u32,
    /// Attempts the initial connect makes before giving up.
    pub retry_count: u32,
    /// Promote diagnostic messages from `debug` to `info`.
    pub verbose: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: timing::DEFAULT_TIMEOUT_SECS,
            retry_count: timing::DEFAULT_RETRY_COUNT,
            verbose: false,
        }
    }
}

impl ManagerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.timeout_secs == 0 {
            return Err(WlanError::InvalidConfig(
                "timeout must be at least 1 second".into(),
            ));
        }
        if self.retry_count == 0 {
            return Err(WlanError::InvalidConfig(
                "retry count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// IP configuration reported by the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpConfig {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub dns: Ipv4Addr,
}

impl From<(Ipv4Addr, Ipv4Addr, Ipv4Addr, Ipv4Addr)> for IpConfig {
    fn from((address, netmask, gateway, dns): (Ipv4Addr, Ipv4Addr, Ipv4Addr, Ipv4Addr)) -> Self {
        Self {
            address,
            netmask,
            gateway,
            dns,
        }
    }
}

/// Lifecycle state of a [`ConnectionManager`](crate::ConnectionManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerState {
    /// Never connected, or explicitly disconnected.
    Idle,
    /// Connected, with the maintenance loop watching the link.
    Maintained,
    /// A drop was detected and a reconnect is in progress.
    Reconnecting,
}

impl Display for ManagerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Maintained => write!(f, "maintained"),
            Self::Reconnecting => write!(f, "reconnecting"),
        }
    }
}
