//! Level-triggered link notifications.
//!
//! A [`LinkSignal`] behaves like a set/clear/wait event cell. Every `set`
//! also bumps a generation counter, so a [`SignalListener`] obtained from
//! [`LinkSignal::subscribe`] observes each transition without anyone having
//! to clear the signal in between.

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SignalState {
    set: bool,
    generation: u64,
}

/// Event cell raised by the connection manager.
///
/// # Example
///
/// ```ignore
/// // Level semantics: returns at once if already set.
/// manager.on_connected().wait().await;
///
/// // Edge semantics: one wakeup per `set`, no clearing needed.
/// let mut drops = manager.on_disconnected().subscribe();
/// while let Some(n) = drops.next().await {
///     println!("link dropped ({n} new)");
/// }
/// ```
#[derive(Debug)]
pub struct LinkSignal {
    tx: watch::Sender<SignalState>,
}

impl Default for LinkSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SignalState::default());
        Self { tx }
    }

    /// Sets the signal and wakes every waiter.
    pub fn set(&self) {
        self.tx.send_modify(|s| {
            s.set = true;
            s.generation += 1;
        });
    }

    /// Clears the signal without waking anyone.
    pub fn clear(&self) {
        self.tx.send_if_modified(|s| {
            s.set = false;
            false
        });
    }

    pub fn is_set(&self) -> bool {
        self.tx.borrow().set
    }

    /// Number of times the signal has been set.
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// Waits until the signal is set.
    ///
    /// Returns immediately if it already is. Callers that wait repeatedly
    /// must `clear` in between, or use [`subscribe`](Self::subscribe).
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|s| s.set).await;
    }

    /// Returns a listener that reports every `set` from now on.
    pub fn subscribe(&self) -> SignalListener {
        let rx = self.tx.subscribe();
        let seen = rx.borrow().generation;
        SignalListener { rx, seen }
    }
}

/// Receives `set` transitions of a [`LinkSignal`].
#[derive(Debug)]
pub struct SignalListener {
    rx: watch::Receiver<SignalState>,
    seen: u64,
}

impl SignalListener {
    /// Waits for the next `set`.
    ///
    /// Returns how many times the signal was set since the last
    /// observation (at least 1), or `None` once the signal is dropped.
    pub async fn next(&mut self) -> Option<u64> {
        let seen = self.seen;
        let generation = self
            .rx
            .wait_for(|s| s.generation > seen)
            .await
            .map(|s| s.generation)
            .ok()?;
        self.seen = generation;
        Some(generation - seen)
    }

    /// Returns the number of unobserved `set` calls without waiting.
    pub fn try_next(&mut self) -> Option<u64> {
        let generation = self.rx.borrow_and_update().generation;
        if generation > self.seen {
            let fired = generation - self.seen;
            self.seen = generation;
            Some(fired)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn set_and_clear() {
        let signal = LinkSignal::new();
        assert!(!signal.is_set());
        signal.set();
        assert!(signal.is_set());
        signal.clear();
        assert!(!signal.is_set());
        assert_eq!(signal.generation(), 1);
    }

    #[tokio::test]
    async fn wait_returns_when_already_set() {
        let signal = LinkSignal::new();
        signal.set();
        signal.wait().await;
    }

    #[tokio::test(start_paused = true)]
    async fn wait_blocks_until_set() {
        let signal = std::sync::Arc::new(LinkSignal::new());
        let setter = signal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            setter.set();
        });

        let start = tokio::time::Instant::now();
        signal.wait().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn listener_sees_every_set_without_clear() {
        let signal = LinkSignal::new();
        let mut listener = signal.subscribe();
        assert_eq!(listener.try_next(), None);

        signal.set();
        assert_eq!(listener.try_next(), Some(1));
        assert_eq!(listener.try_next(), None);

        // Re-setting an already-set signal is still a new transition.
        signal.set();
        assert_eq!(listener.try_next(), Some(1));
    }

    #[test]
    fn listener_counts_coalesced_sets() {
        let signal = LinkSignal::new();
        let mut listener = signal.subscribe();
        signal.set();
        signal.clear();
        signal.set();
        assert_eq!(listener.try_next(), Some(2));
    }

    #[test]
    fn listener_ignores_history() {
        let signal = LinkSignal::new();
        signal.set();
        let mut listener = signal.subscribe();
        assert_eq!(listener.try_next(), None);
    }

    #[tokio::test]
    async fn listener_next_after_set() {
        let signal = LinkSignal::new();
        let mut listener = signal.subscribe();
        signal.set();
        signal.set();
        assert_eq!(listener.next().await, Some(2));
    }

    #[tokio::test]
    async fn listener_ends_when_signal_dropped() {
        let signal = LinkSignal::new();
        let mut listener = signal.subscribe();
        drop(signal);
        assert_eq!(listener.next().await, None);
    }
}
