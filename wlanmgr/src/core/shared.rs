use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::models::{Credentials, ManagerConfig, ManagerState};
use crate::api::signal::LinkSignal;
use crate::radio::Radio;

/// State shared between the public manager and its maintenance task.
pub(crate) struct Shared<R> {
    pub(crate) radio: Arc<R>,
    pub(crate) credentials: Credentials,
    pub(crate) config: ManagerConfig,
    /// Set after the initial connect succeeds, cleared by `disconnect`.
    pub(crate) should_stay_connected: AtomicBool,
    /// Set while a detected drop is being repaired.
    pub(crate) attempting_reconnect: AtomicBool,
    pub(crate) on_connected: LinkSignal,
    pub(crate) on_disconnected: LinkSignal,
}

impl<R: Radio> Shared<R> {
    pub(crate) fn new(radio: Arc<R>, credentials: Credentials, config: ManagerConfig) -> Self {
        Self {
            radio,
            credentials,
            config,
            should_stay_connected: AtomicBool::new(false),
            attempting_reconnect: AtomicBool::new(false),
            on_connected: LinkSignal::new(),
            on_disconnected: LinkSignal::new(),
        }
    }

    pub(crate) fn should_stay_connected(&self) -> bool {
        self.should_stay_connected.load(Ordering::SeqCst)
    }

    pub(crate) fn state(&self) -> ManagerState {
        if !self.should_stay_connected() {
            ManagerState::Idle
        } else if self.attempting_reconnect.load(Ordering::SeqCst) {
            ManagerState::Reconnecting
        } else {
            ManagerState::Maintained
        }
    }
}
