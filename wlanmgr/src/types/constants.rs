//! Constants for radio driver values and manager policy.
//!
//! Status codes correspond to the integers a station-mode Wi-Fi driver
//! reports from its `status()` query.

/// Link status codes reported by the radio driver.
pub mod link_status {
    /// Connection failed for an unspecified reason.
    pub const CONNECT_FAIL: i32 = -1;
    /// No access point with the requested SSID replied.
    pub const NO_AP_FOUND: i32 = -2;
    /// The access point rejected the credentials.
    pub const WRONG_PASSWORD: i32 = -3;
    /// Association is in progress.
    pub const CONNECTING: i32 = 1;
    /// Associated, but no address has been assigned yet.
    ///
    /// Drivers do not list this among their own status codes; address
    /// assignment can take a few seconds after the link comes up.
    pub const NO_IP: i32 = 2;
    /// Associated and an address has been assigned.
    pub const GOT_IP: i32 = 3;
}

/// Power management values written to the radio.
pub mod power_management {
    /// Power saving disabled.
    pub const PERFORMANCE: u32 = 0xA11140;
}

/// Timing and retry defaults.
pub mod timing {
    use std::time::Duration;

    /// One polling tick.
    const TICK_MS: u64 = 1_000;

    /// Default number of ticks a single attempt may wait.
    pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

    /// Default number of attempts made by the initial connect.
    pub const DEFAULT_RETRY_COUNT: u32 = 3;

    /// Returns the polling tick duration.
    pub fn tick() -> Duration {
        Duration::from_millis(TICK_MS)
    }
}

/// Credential limits from IEEE 802.11.
pub mod limits {
    pub const SSID_MAX_LEN: usize = 32;
    pub const PASSWORD_MAX_LEN: usize = 64;
}
