//! Background link maintenance.
//!
//! After the initial connect succeeds the manager spawns a single
//! maintenance task. Once per tick it checks the link; when the link is
//! down it raises `on_disconnected` (once per drop) and runs connection
//! attempts until the link is back. Failed attempts are logged and retried
//! on the next tick, so the loop only ends when the manager stops it.

use futures::{FutureExt, select};
use log::{debug, error, warn};
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::core::attempt::attempt_connection;
use crate::core::shared::Shared;
use crate::radio::Radio;
use crate::types::constants::timing;
use crate::util::utils::diag;

/// Handle to the running maintenance loop.
///
/// The owner stops it with [`stop`](Self::stop), which wakes the loop
/// immediately and waits for it to exit.
pub(crate) struct MaintenanceTask {
    shutdown: watch::Sender<()>,
    handle: JoinHandle<()>,
}

impl MaintenanceTask {
    pub(crate) fn spawn<R: Radio + 'static>(shared: Arc<Shared<R>>) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(());
        let handle = tokio::spawn(maintain_connection(shared, shutdown_rx));
        Self { shutdown, handle }
    }

    /// Signals the loop to exit and waits for it.
    pub(crate) async fn stop(self) {
        // The loop may already have exited and dropped its receiver.
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                error!("Maintenance task panicked: {e}");
            }
        }
    }

    pub(crate) fn abort(&self) {
        self.handle.abort();
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Sleeps one tick. Returns `false` if shutdown was requested meanwhile.
async fn tick(shutdown: &mut watch::Receiver<()>) -> bool {
    let mut delay = pin!(sleep(timing::tick()).fuse());
    let mut stop = pin!(shutdown.changed().fuse());

    select! {
        _ = delay => true,
        _ = stop => false,
    }
}

async fn maintain_connection<R: Radio>(shared: Arc<Shared<R>>, mut shutdown: watch::Receiver<()>) {
    let ssid = shared.credentials.ssid();
    let verbose = shared.config.verbose;
    debug!("Maintaining connection to '{ssid}'");

    while shared.should_stay_connected() {
        if !tick(&mut shutdown).await {
            break;
        }

        match shared.radio.is_connected().await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                warn!("Failed to query link state: {e}");
                continue;
            }
        }

        if !shared.attempting_reconnect.swap(true, Ordering::SeqCst) {
            diag!(verbose, "Connection to '{ssid}' lost. Trying to re-connect.");
            shared.on_disconnected.set();
        }

        let mut attempt = pin!(attempt_connection(&*shared).fuse());
        let mut stop = pin!(shutdown.changed().fuse());

        let stopped = select! {
            result = attempt => {
                match result {
                    Ok(()) => diag!(verbose, "Connection to '{ssid}' re-established."),
                    Err(e) => diag!(verbose, "Could not re-connect: {e}. Trying again."),
                }
                false
            }
            _ = stop => true,
        };

        if stopped {
            break;
        }
    }

    debug!("Stopped maintaining connection to '{ssid}'");
}
