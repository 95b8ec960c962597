//! Observable startup state published by the bootstrap sequencer.
//!
//! One watch channel carries the whole state record: the sequencer is the
//! single writer, the UI layer holds any number of receivers. Consumers get
//! last-write-visible semantics only; intermediate states may be skipped.

use quill_api::HealthAlert;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq)]
/// Public struct `StartupState` used across Quill components.
pub struct StartupState {
    /// Whether any usable network transport was active at check time.
    pub connected: bool,
    /// Set once the sequencer reaches a terminal outcome. The splash layer
    /// stays up until this flips.
    pub ready: bool,
    /// Screen identifier the router should present next, when one was decided.
    pub next_destination: Option<String>,
    /// Set when the backend confirmed the stored credential is no longer valid
    /// or a login step failed outright.
    pub could_not_log_in: bool,
    pub active_alert: Option<HealthAlert>,
    pub alert_active: bool,
    /// Short-lived operator-facing notice (currently only rate-limit deferral).
    pub transient_notice: Option<String>,
}

#[derive(Debug)]
pub(crate) struct StartupStatePublisher {
    tx: watch::Sender<StartupState>,
}

impl StartupStatePublisher {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(StartupState::default());
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<StartupState> {
        self.tx.subscribe()
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut StartupState)) {
        self.tx.send_modify(apply);
    }

    pub(crate) fn snapshot(&self) -> StartupState {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn updates_reach_subscribers() {
        let publisher = StartupStatePublisher::new();
        let mut rx = publisher.subscribe();
        assert!(!rx.borrow().ready);

        publisher.update(|state| state.ready = true);
        rx.changed().await.expect("changed");
        assert!(rx.borrow_and_update().ready);
    }

    #[test]
    fn snapshot_reflects_latest_write() {
        let publisher = StartupStatePublisher::new();
        publisher.update(|state| {
            state.connected = true;
            state.next_destination = Some("chat".to_string());
        });
        let snapshot = publisher.snapshot();
        assert!(snapshot.connected);
        assert_eq!(snapshot.next_destination.as_deref(), Some("chat"));
    }
}
