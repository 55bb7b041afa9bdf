//! # emucheck-core
//!
//! **Is this device real hardware, or an emulator?**
//!
//! `emucheck-core` gathers a set of individually weak environment signals
//! (platform properties, sensor and app counts, hardware capabilities,
//! process control groups) and scores them into one verdict.
//!
//! ## Quick Start
//!
//! ```no_run
//! use emucheck_core::{EmulatorDetector, SystemProbe};
//!
//! let detector = EmulatorDetector::default();
//! let eval = detector.check(&SystemProbe::default()).unwrap();
//!
//! println!("{}", eval.report.render_text());
//! if eval.is_emulator {
//!     println!("running on an emulator");
//! }
//! ```
//!
//! ## Architecture
//!
//! Probe → Evaluators → Engine (short-circuit / accumulate) → Evidence report
//!
//! - A handful of property values are exact fingerprints of known emulator
//!   products. Any one of them ends the run immediately.
//! - Everything else is noisy. Missing properties, few sensors, few apps and
//!   absent capabilities each add weight to a suspicion score, and only a
//!   score above the policy threshold classifies the device as an emulator.
//!
//! Every raw value is read through the [`DeviceProbe`] trait. Signal
//! unavailability is never an error; the only failure is a missing or
//! invalid probe.

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod patterns;
pub mod policy;
pub mod probe;
pub mod report;
pub mod root;
pub mod signal;
pub mod verdict;

pub use engine::{EmulatorDetector, Evaluation, Step};
pub use error::{EmuCheckError, Result};
pub use policy::{AmbiguousWeights, ScoringPolicy};
pub use probe::{DeviceProbe, ProbeConfig, StaticProbe, SystemProbe};
pub use report::{
    CapabilityReading, CountReading, EvidenceEntry, EvidenceReport, SuspicionScore, Termination,
};
pub use root::{RootStatus, check_root};
pub use signal::{Capability, Reliability, SignalCategory, SignalInfo, SignalOrigin};
pub use verdict::{SignalOutcome, Verdict};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
