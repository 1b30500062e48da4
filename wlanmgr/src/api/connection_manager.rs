use log::{debug, info, warn};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;

use crate::Result;
use crate::api::models::{Credentials, IpConfig, ManagerConfig, ManagerState};
use crate::api::signal::LinkSignal;
use crate::core::attempt::attempt_connection;
use crate::core::maintenance::MaintenanceTask;
use crate::core::shared::Shared;
use crate::radio::Radio;
use crate::types::constants::power_management;
use crate::util::utils::{diag, format_mac};

/// Keeps a single Wi-Fi interface connected to one network.
///
/// The manager makes a bounded number of attempts when asked to
/// [`connect`](Self::connect), then keeps the link alive in a background
/// task until [`disconnect`](Self::disconnect) is called. Observers follow
/// link transitions through [`on_connected`](Self::on_connected) and
/// [`on_disconnected`](Self::on_disconnected).
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use wlanmgr::{ConnectionManager, Credentials, ManagerConfig};
///
/// # async fn example(radio: Arc<impl wlanmgr::Radio + 'static>) -> wlanmgr::Result<()> {
/// let creds = Credentials::new("MyNetwork", "password123")?;
/// let manager = ConnectionManager::new(radio, creds, ManagerConfig::default())?;
///
/// manager.connect().await?;
/// println!("IP: {}", manager.get_ip_address().await?);
///
/// let mut drops = manager.on_disconnected().subscribe();
/// drops.next().await;
/// println!("Link dropped, reconnecting in the background");
///
/// manager.disconnect().await?;
/// # Ok(())
/// # }
/// ```
///
/// # Runtime
///
/// [`connect`](Self::connect) spawns the maintenance loop with
/// `tokio::spawn`, so it must be called from within a Tokio runtime.
/// Dropping the manager aborts the loop.
pub struct ConnectionManager<R: Radio + 'static> {
    shared: Arc<Shared<R>>,
    maintenance: Mutex<Option<MaintenanceTask>>,
}

impl<R: Radio + 'static> ConnectionManager<R> {
    /// Creates a manager for `radio`.
    ///
    /// Nothing is sent to the radio until [`connect`](Self::connect).
    pub fn new(radio: Arc<R>, credentials: Credentials, config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared::new(radio, credentials, config)),
            maintenance: Mutex::new(None),
        })
    }

    /// Connects to the configured network and starts maintaining the link.
    ///
    /// Activates the radio, disables power saving, then makes up to
    /// `retry_count` attempts. A rejected password ends the process at
    /// once since retrying cannot fix it; any other failure is retried
    /// until the attempts are used up, after which the last error is
    /// returned.
    ///
    /// Calling this while the link is already maintained does nothing.
    pub async fn connect(&self) -> Result<()> {
        let shared = &self.shared;
        let ssid = shared.credentials.ssid();
        let verbose = shared.config.verbose;
        let retries = shared.config.retry_count;

        if shared.should_stay_connected() {
            debug!("Already maintaining connection to '{ssid}', skipping connect()");
            return Ok(());
        }

        shared.radio.set_active(true).await?;
        shared
            .radio
            .set_power_management(power_management::PERFORMANCE)
            .await?;

        let mut attempt = 1;
        loop {
            diag!(verbose, "Trying to connect to '{ssid}'. Attempt #{attempt}");
            match attempt_connection(&**shared).await {
                Ok(()) => break,
                Err(e) if !e.is_retryable() => {
                    warn!("Connection to '{ssid}' rejected: {e}");
                    return Err(e);
                }
                Err(e) if attempt >= retries => {
                    warn!("Failed to connect to '{ssid}' after {retries} attempts: {e}");
                    return Err(e);
                }
                Err(e) => {
                    diag!(verbose, "Attempt #{attempt} failed: {e}");
                    attempt += 1;
                }
            }
        }

        info!("Successfully connected to '{ssid}'");
        shared.should_stay_connected.store(true, Ordering::SeqCst);

        let mut maintenance = self.maintenance.lock().await;
        if let Some(previous) = maintenance.take() {
            // A concurrent connect() won the race; keep one loop only.
            previous.stop().await;
        }
        *maintenance = Some(MaintenanceTask::spawn(Arc::clone(shared)));
        Ok(())
    }

    /// Stops maintaining the link, disconnects and powers the radio down.
    ///
    /// `on_disconnected` is set even if the manager never connected or a
    /// radio call fails; the first radio error is returned afterwards.
    pub async fn disconnect(&self) -> Result<()> {
        let shared = &self.shared;
        shared.should_stay_connected.store(false, Ordering::SeqCst);

        let task = self.maintenance.lock().await.take();
        if let Some(task) = task {
            task.stop().await;
        }
        shared.attempting_reconnect.store(false, Ordering::SeqCst);

        let disconnected = shared.radio.disconnect().await;
        let deactivated = shared.radio.set_active(false).await;
        shared.on_disconnected.set();

        info!("Disconnected from '{}'", shared.credentials.ssid());
        disconnected.and(deactivated)
    }

    /// Returns the live link state from the radio.
    pub async fn is_connected(&self) -> Result<bool> {
        self.shared.radio.is_connected().await
    }

    /// Returns the hardware address, e.g. `"00:11:22:33:44:55"`.
    pub async fn get_mac_address(&self) -> Result<String> {
        let mac = self.shared.radio.mac_address().await?;
        Ok(format_mac(&mac))
    }

    /// Returns the address currently assigned to the interface.
    pub async fn get_ip_address(&self) -> Result<Ipv4Addr> {
        Ok(self.shared.radio.ifconfig().await?.address)
    }

    /// Returns the full IP configuration of the interface.
    pub async fn ifconfig(&self) -> Result<IpConfig> {
        self.shared.radio.ifconfig().await
    }

    /// Raised every time a connection attempt succeeds.
    pub fn on_connected(&self) -> &LinkSignal {
        &self.shared.on_connected
    }

    /// Raised once per detected drop and on [`disconnect`](Self::disconnect).
    pub fn on_disconnected(&self) -> &LinkSignal {
        &self.shared.on_disconnected
    }

    pub fn state(&self) -> ManagerState {
        self.shared.state()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.shared.credentials
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.shared.config
    }

    /// Returns `true` while a maintenance loop is running.
    pub async fn is_maintaining(&self) -> bool {
        self.maintenance
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<R: Radio + 'static> Drop for ConnectionManager<R> {
    fn drop(&mut self) {
        if let Some(task) = self.maintenance.get_mut().take() {
            task.abort();
        }
    }
}
