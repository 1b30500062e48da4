//! One bounded connect-and-poll cycle.
//!
//! Issues the connect command, then polls the radio once per tick until the
//! link comes up, a terminal status is reported, or the tick budget runs out.

use log::{debug, warn};
use std::sync::atomic::Ordering;
use tokio::time::sleep;

use crate::Result;
use crate::api::models::{LinkStatus, WlanError, status_to_error};
use crate::core::shared::Shared;
use crate::radio::Radio;
use crate::types::constants::timing;

/// Runs a single connection attempt.
///
/// On success `attempting_reconnect` is cleared and `on_connected` is set.
/// In-progress statuses (connecting, waiting for an address) keep the
/// attempt waiting. Recognized failures end it immediately with their
/// classified error; unrecognized codes end it with `UnexpectedStatus`.
/// If the budget runs out the radio is told to disconnect and `Timeout`
/// is returned.
pub(crate) async fn attempt_connection<R: Radio>(shared: &Shared<R>) -> Result<()> {
    let ssid = shared.credentials.ssid();
    let budget = shared.config.timeout_secs;

    shared
        .radio
        .connect(ssid, shared.credentials.password())
        .await?;

    for tick in 1..=budget {
        sleep(timing::tick()).await;

        if shared.radio.is_connected().await? {
            debug!("Link to '{ssid}' up after {tick}s");
            shared.attempting_reconnect.store(false, Ordering::SeqCst);
            shared.on_connected.set();
            return Ok(());
        }

        let code = shared.radio.status().await?;
        if let Some(err) = status_to_error(code) {
            debug!("Attempt on '{ssid}' ended: {}", LinkStatus::from(code));
            return Err(err);
        }
        debug!("Waiting on '{ssid}': {} ({tick}/{budget})", LinkStatus::from(code));
    }

    // Leave the radio idle rather than half-associated.
    if let Err(e) = shared.radio.disconnect().await {
        warn!("Failed to reset radio after timeout: {e}");
    }
    warn!("Connection to '{ssid}' timed out after {budget}s");
    Err(WlanError::Timeout)
}
