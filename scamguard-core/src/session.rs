//! Per-mode scan lifecycle management.
//!
//! A [`ScanSession`] owns one detection mode's state machine and input
//! buffer. State lives in a watch channel, so reads are lock-free
//! snapshots and observers get a push-based stream without polling.

use std::sync::Arc;

use parking_lot::Mutex;
use scamguard_model::{DetectionMode, ErrorKind, ScanEnvelope, ScanPayload, ScanState};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, trace, warn};

use crate::classifier::classify;
use crate::gateway::ScanGateway;

/// Watch-backed store for one session's [`ScanState`].
///
/// Writes from completed scans go through [`ScanStateStore::commit`], which
/// drops completions of superseded generations. The generation counter and
/// the channel write share one lock so a supersede and a commit can never
/// interleave.
#[derive(Clone, Debug)]
struct ScanStateStore {
    sender: Arc<watch::Sender<ScanState>>,
    receiver: watch::Receiver<ScanState>,
    generation: Arc<Mutex<u64>>,
}

impl ScanStateStore {
    fn new() -> Self {
        let (sender, receiver) = watch::channel(ScanState::Idle);
        Self {
            sender: Arc::new(sender),
            receiver,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// Get the current state
    fn current(&self) -> ScanState {
        self.receiver.borrow().clone()
    }

    /// Subscribe to state changes
    fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.receiver.clone()
    }

    /// Open a new generation and publish `Loading` in the same step.
    /// Any scan still in flight is superseded from this point on.
    fn begin(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        // Ignore send errors (no receivers)
        let _ = self.sender.send(ScanState::Loading);
        *generation
    }

    /// Publish a terminal state if `generation` is still current.
    /// Returns whether the write was applied.
    fn commit(&self, generation: u64, state: ScanState) -> bool {
        let current = self.generation.lock();
        if *current != generation {
            return false;
        }
        let _ = self.sender.send(state);
        true
    }

    /// Supersede any outstanding scan and publish `Idle`.
    fn invalidate(&self) {
        let mut generation = self.generation.lock();
        *generation += 1;
        let _ = self.sender.send(ScanState::Idle);
    }
}

/// One detection mode's scan orchestrator.
///
/// The session drives the `Idle -> Loading -> Success | Error` lifecycle,
/// remembers the latest input text for its mode, and guarantees that the
/// published state always reflects the most recently issued scan: issuing
/// a new scan supersedes the previous one, whose completion is discarded
/// whenever it arrives.
///
/// Sessions for different modes share nothing but the gateway.
pub struct ScanSession {
    mode: DetectionMode,
    gateway: Arc<dyn ScanGateway>,
    store: ScanStateStore,
    input: Mutex<String>,
}

impl std::fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSession")
            .field("mode", &self.mode)
            .field("state", &self.store.current())
            .finish()
    }
}

impl ScanSession {
    /// Create an idle session for `mode` backed by `gateway`.
    pub fn new(mode: DetectionMode, gateway: Arc<dyn ScanGateway>) -> Self {
        Self {
            mode,
            gateway,
            store: ScanStateStore::new(),
            input: Mutex::new(String::new()),
        }
    }

    /// The mode this session owns.
    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Latest text entered for this mode, exactly as provided.
    pub fn input(&self) -> String {
        self.input.lock().clone()
    }

    /// Record the latest entered text. Allowed in any state; never causes
    /// a transition.
    pub fn set_input(&self, text: impl Into<String>) {
        *self.input.lock() = text.into();
    }

    /// Current state snapshot.
    pub fn state(&self) -> ScanState {
        self.store.current()
    }

    /// Continuously updated view of this session's state.
    ///
    /// The stream yields the current state immediately, then every
    /// transition. It never carries another session's updates.
    pub fn observe(&self) -> WatchStream<ScanState> {
        WatchStream::new(self.store.subscribe())
    }

    /// Issue a scan for `text` and return immediately.
    ///
    /// The text is recorded as the session input verbatim; the gateway
    /// receives it trimmed. Input that is empty after trimming is a no-op
    /// apart from the recording. The request runs on the tokio runtime,
    /// so this must be called from within one; progress is followed via
    /// [`ScanSession::observe`] or [`ScanSession::state`].
    ///
    /// Issuing a scan while another is in flight supersedes it: the older
    /// completion is discarded no matter when it arrives.
    pub fn scan(&self, text: &str) {
        self.set_input(text);

        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!(mode = %self.mode, "ignoring scan request for blank input");
            return;
        }

        let generation = self.store.begin();
        debug!(mode = %self.mode, generation, "scan dispatched");

        let mode = self.mode;
        let gateway = Arc::clone(&self.gateway);
        let store = self.store.clone();
        let query = trimmed.to_string();
        tokio::spawn(async move {
            let state = run_scan(mode, gateway.as_ref(), &query).await;
            if store.commit(generation, state) {
                trace!(mode = %mode, generation, "scan completed");
            } else {
                trace!(mode = %mode, generation, "discarded stale scan completion");
            }
        });
    }

    /// Return to `Idle` and clear the recorded input.
    ///
    /// A scan in flight is superseded, not cancelled; its completion is
    /// discarded when it arrives.
    pub fn reset(&self) {
        self.input.lock().clear();
        self.store.invalidate();
        debug!(mode = %self.mode, "session reset");
    }
}

/// Run one gateway round-trip and fold the outcome into a terminal state.
async fn run_scan(mode: DetectionMode, gateway: &dyn ScanGateway, query: &str) -> ScanState {
    let outcome = match mode {
        DetectionMode::Phone => gateway
            .scan_phone(query)
            .await
            .map(|envelope| envelope.map(ScanPayload::Phone)),
        DetectionMode::Url => gateway
            .scan_url(query)
            .await
            .map(|envelope| envelope.map(ScanPayload::Url)),
        DetectionMode::Text => gateway
            .scan_text(query)
            .await
            .map(|envelope| envelope.map(ScanPayload::Text)),
    };

    match outcome {
        Ok(envelope) if envelope.succeeded => ScanState::Success(classify(mode, &envelope)),
        Ok(envelope) => {
            warn!(mode = %mode, version = %envelope.version, "service reported failure");
            service_failure(&envelope)
        }
        Err(err) => {
            warn!(mode = %mode, error = %err, "scan failed");
            ScanState::failure(err.into())
        }
    }
}

/// The envelope arrived but the service flagged the request as
/// unprocessed. The transport saw a success status, so this is reported
/// as a server failure at the delivered status code.
fn service_failure<T>(envelope: &ScanEnvelope<T>) -> ScanState {
    let detail = format!(
        "the service could not process the request (version {})",
        envelope.version
    );
    ScanState::Error {
        kind: ErrorKind::Server {
            status: 200,
            body: detail.clone(),
        },
        title: "service reported failure".to_string(),
        message: detail,
    }
}
