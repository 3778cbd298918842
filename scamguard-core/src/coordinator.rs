//! Routing facade over the per-mode scan sessions.

use std::sync::Arc;

use scamguard_model::{DetectionMode, ScanState};
use tokio_stream::wrappers::WatchStream;

use crate::gateway::ScanGateway;
use crate::session::ScanSession;

/// Owns one [`ScanSession`] per [`DetectionMode`], all sharing a single
/// gateway.
///
/// Sessions are created eagerly and are fully independent: a scan, reset,
/// or state change on one mode never touches another. Construct one
/// coordinator per process and share it by reference; sessions live as
/// long as the coordinator does.
#[derive(Debug)]
pub struct ScanCoordinator {
    phone: ScanSession,
    url: ScanSession,
    text: ScanSession,
}

impl ScanCoordinator {
    /// Build a coordinator with an idle session per mode on `gateway`.
    pub fn new(gateway: Arc<dyn ScanGateway>) -> Self {
        Self {
            phone: ScanSession::new(DetectionMode::Phone, Arc::clone(&gateway)),
            url: ScanSession::new(DetectionMode::Url, Arc::clone(&gateway)),
            text: ScanSession::new(DetectionMode::Text, gateway),
        }
    }

    /// The session owning `mode`.
    pub fn session(&self, mode: DetectionMode) -> &ScanSession {
        match mode {
            DetectionMode::Phone => &self.phone,
            DetectionMode::Url => &self.url,
            DetectionMode::Text => &self.text,
        }
    }

    /// Issue a scan on `mode`'s session. Non-blocking.
    pub fn scan(&self, mode: DetectionMode, text: &str) {
        self.session(mode).scan(text);
    }

    /// Record the latest entered text for `mode`.
    pub fn set_input(&self, mode: DetectionMode, text: impl Into<String>) {
        self.session(mode).set_input(text);
    }

    /// Latest entered text for `mode`.
    pub fn input(&self, mode: DetectionMode) -> String {
        self.session(mode).input()
    }

    /// Current state snapshot for `mode`.
    pub fn state(&self, mode: DetectionMode) -> ScanState {
        self.session(mode).state()
    }

    /// Continuously updated view of `mode`'s state. Other modes never
    /// emit on this stream.
    pub fn observe(&self, mode: DetectionMode) -> WatchStream<ScanState> {
        self.session(mode).observe()
    }

    /// Return `mode`'s session to idle and clear its input.
    pub fn reset(&self, mode: DetectionMode) {
        self.session(mode).reset();
    }
}
