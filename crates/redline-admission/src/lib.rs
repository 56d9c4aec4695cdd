//! Redline Admission
//!
//! Sliding-window admission control for analysis requests.
//!
//! The admission controller provides:
//! - Per-client request windows with precise retry timing
//! - Per-endpoint tier configuration with a default fallback
//! - Opportunistic eviction of idle windows, no background task
//!
//! # Examples
//!
//! ```
//! use redline_admission::{AdmissionConfig, AdmissionController};
//!
//! let controller = AdmissionController::new(AdmissionConfig::default());
//! let decision = controller.check("user:alice", "/analyze");
//! assert!(decision.allowed);
//! ```

#![warn(missing_docs)]

mod config;
mod controller;
mod error;

pub use config::{AdmissionConfig, KeyStrategy, TierConfig};
pub use controller::{AdmissionController, Decision};
pub use error::AdmissionError;
