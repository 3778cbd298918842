//! # Scamguard Core
//!
//! Core library for the Scamguard anti-fraud client: talks to the hosted
//! anti-fraud gateway, classifies its answers into normalized verdicts,
//! and runs the per-mode scan lifecycle on tokio.
//!
//! ## Overview
//!
//! - **Gateway**: [`ScanGateway`] is the async contract for the three
//!   lookups, [`HttpScanGateway`] the reqwest-backed implementation
//! - **Classification**: [`classify`] derives a tier, score, title, and
//!   reasons from a gateway envelope, deterministically
//! - **Sessions**: [`ScanSession`] owns one mode's
//!   `Idle -> Loading -> Success | Error` state machine; superseded scans
//!   never overwrite newer state
//! - **Coordination**: [`ScanCoordinator`] bundles the three independent
//!   sessions behind one shared gateway
//! - **Configuration**: [`config::ConfigLoader`] layers environment
//!   variables over an optional `scamguard.toml`
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scamguard_core::config::ConfigLoader;
//! use scamguard_core::{DetectionMode, HttpScanGateway, ScanCoordinator};
//! use tokio_stream::StreamExt;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! let gateway = Arc::new(HttpScanGateway::new(&config)?);
//! let coordinator = ScanCoordinator::new(gateway);
//!
//! let mut updates = coordinator.observe(DetectionMode::Phone);
//! coordinator.scan(DetectionMode::Phone, "0900000000");
//!
//! while let Some(state) = updates.next().await {
//!     if !state.is_pending() {
//!         println!("{state:?}");
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Deterministic envelope-to-verdict classification
pub mod classifier;

/// Gateway configuration loading
pub mod config;

/// Per-mode session routing
pub mod coordinator;

/// Anti-fraud gateway contract and HTTP implementation
pub mod gateway;

/// Per-mode scan lifecycle management
pub mod session;

pub use classifier::classify;
pub use coordinator::ScanCoordinator;
pub use gateway::{GatewayError, HttpScanGateway, ScanGateway};
pub use session::ScanSession;

// Model types most consumers need alongside the orchestration surface.
pub use scamguard_model::{
    DetectionMode, ErrorKind, RiskTier, RiskVerdict, ScanEnvelope, ScanPayload,
    ScanState,
};
