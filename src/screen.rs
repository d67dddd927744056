//! State shared by the list screens: the load state machine, the mount
//! generation that discards late fetch results, and change notification.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, watch};

/// How long a panel request waits for a loading screen before answering
/// with the loading placeholder.
pub(crate) const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a screen's collections are usable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The screen's fetches have not completed yet.
    #[default]
    Loading,
    /// Every fetch succeeded and the collections are authoritative.
    Ready,
    /// A fetch failed. Holds the message shown to the user.
    Failed(String),
}

impl LoadState {
    /// Whether the collections can be read and mutated.
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// Identifies one mount of a screen.
///
/// Results delivered with a ticket from an earlier mount, or after the
/// screen was torn down, are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountTicket(u64);

/// Hands out [MountTicket]s and remembers which one is current.
#[derive(Debug, Default)]
pub(crate) struct MountGeneration {
    current: u64,
    torn_down: bool,
}

impl MountGeneration {
    pub(crate) fn begin(&mut self) -> MountTicket {
        self.current += 1;
        self.torn_down = false;
        MountTicket(self.current)
    }

    pub(crate) fn is_current(&self, ticket: MountTicket) -> bool {
        !self.torn_down && ticket.0 == self.current
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
    }

    /// Whether a mount has begun and not been torn down since.
    pub(crate) fn is_active(&self) -> bool {
        self.current > 0 && !self.torn_down
    }
}

/// A counter bumped on every change to a screen, observable through
/// [watch::Receiver]s.
#[derive(Debug)]
pub(crate) struct Revision {
    sender: watch::Sender<u64>,
}

impl Default for Revision {
    fn default() -> Self {
        let (sender, _) = watch::channel(0);
        Self { sender }
    }
}

impl Revision {
    pub(crate) fn bump(&self) {
        self.sender.send_modify(|revision| *revision += 1);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }
}

/// A screen whose changes can be observed.
pub(crate) trait ObservableScreen {
    /// Whether no fetch is in flight for the screen.
    fn is_settled(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Lock `screen` once its fetches have settled.
///
/// Waits for change notifications while a mount is in flight. Gives up
/// after `timeout` and returns the lock regardless, so the caller may still
/// see [LoadState::Loading].
pub(crate) async fn lock_when_settled<S: ObservableScreen>(
    screen: &Mutex<S>,
    timeout: Duration,
) -> MutexGuard<'_, S> {
    let settled = async {
        loop {
            let guard = screen.lock().await;
            if guard.is_settled() {
                return;
            }

            let mut changes = guard.subscribe();
            drop(guard);

            if changes.changed().await.is_err() {
                return;
            }
        }
    };

    if tokio::time::timeout(timeout, settled).await.is_err() {
        tracing::debug!("Screen still loading after {timeout:?}");
    }

    screen.lock().await
}
