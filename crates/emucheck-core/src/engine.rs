//! Aggregation engine.
//!
//! Architecture:
//! 1. Property signals in fixed order; a conclusive marker ends the run
//! 2. Sensor and third-party app counts
//! 3. Capability checks
//! 4. Control-group readability
//! 5. Seal the report and compare the score with the threshold
//!
//! Each stage is a small step function returning a [`Step`], so the
//! short-circuit and accumulate rules can be exercised category by category.
//! The engine keeps no state between runs.

use crate::error::{EmuCheckError, Result};
use crate::evaluator::{read_cgroup_signal, read_property_signal};
use crate::policy::ScoringPolicy;
use crate::probe::DeviceProbe;
use crate::report::{
    CapabilityReading, CountReading, EvidenceReport, ReportBuilder, SuspicionScore, Termination,
};
use crate::signal::{Capability, SignalCategory};
use crate::verdict::{SignalOutcome, Verdict};

/// What a single pipeline step decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Add this weight and keep going.
    Accumulate(u32),
    /// Stop now: the device is an emulator.
    ShortCircuit,
}

/// Scoring rule for a property-backed category.
pub fn property_step(
    category: SignalCategory,
    outcome: &SignalOutcome,
    policy: &ScoringPolicy,
) -> Step {
    match outcome.verdict() {
        Verdict::ConclusiveEmulator => Step::ShortCircuit,
        Verdict::Ambiguous => Step::Accumulate(policy.ambiguous_weight(category)),
        Verdict::InconclusiveUnknown => Step::Accumulate(0),
    }
}

/// Scoring rule for the sensor count.
pub fn sensor_weight(count: u32, policy: &ScoringPolicy) -> u32 {
    if count <= policy.sensor_floor {
        policy.sensor_weight
    } else {
        0
    }
}

/// Scoring rule for the third-party app count.
pub fn user_app_weight(count: u32, policy: &ScoringPolicy) -> u32 {
    if count <= policy.user_app_floor {
        policy.user_app_weight
    } else {
        0
    }
}

/// Scoring rule for a capability query.
pub fn capability_weight(present: bool, policy: &ScoringPolicy) -> u32 {
    if present { 0 } else { policy.capability_weight }
}

/// Scoring rule for the control-group reading.
pub fn cgroup_weight(outcome: &SignalOutcome, policy: &ScoringPolicy) -> u32 {
    if outcome.is_ambiguous() {
        policy.cgroup_weight
    } else {
        0
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub is_emulator: bool,
    pub report: EvidenceReport,
}

/// Emulator detector configured with a scoring policy.
///
/// Holds no mutable state; one detector can evaluate any number of probes,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct EmulatorDetector {
    policy: ScoringPolicy,
}

impl EmulatorDetector {
    /// Create a detector after validating `policy`.
    pub fn new(policy: ScoringPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Evaluate the environment behind `context`.
    ///
    /// A missing or invalid context is the only error; it is raised before
    /// any signal is read.
    pub fn evaluate(&self, context: Option<&dyn DeviceProbe>) -> Result<Evaluation> {
        let probe = context
            .ok_or_else(|| EmuCheckError::invalid_context("no device probe supplied"))?;
        probe.validate()?;

        let report = Pipeline::new(probe, &self.policy).run();
        log::info!(
            "emulator check finished: score {} (threshold {}), emulator = {}",
            report.score(),
            report.threshold(),
            report.is_emulator()
        );
        Ok(Evaluation {
            is_emulator: report.is_emulator(),
            report,
        })
    }

    /// Shorthand for [`evaluate`](Self::evaluate) with a present context.
    pub fn check(&self, probe: &dyn DeviceProbe) -> Result<Evaluation> {
        self.evaluate(Some(probe))
    }
}

/// One run over one probe. Created fresh per evaluation.
struct Pipeline<'a> {
    probe: &'a dyn DeviceProbe,
    policy: &'a ScoringPolicy,
    score: SuspicionScore,
    report: ReportBuilder,
}

impl<'a> Pipeline<'a> {
    fn new(probe: &'a dyn DeviceProbe, policy: &'a ScoringPolicy) -> Self {
        Self {
            probe,
            policy,
            score: SuspicionScore::default(),
            report: ReportBuilder::new(),
        }
    }

    fn run(mut self) -> EvidenceReport {
        for category in SignalCategory::PROPERTIES {
            if let Step::ShortCircuit = self.property(category) {
                log::info!("{category} is a conclusive emulator fingerprint");
                return self.seal(Termination::ShortCircuited { category });
            }
        }

        self.sensors();
        self.user_apps();
        for capability in Capability::ALL {
            self.capability(capability);
        }
        self.cgroup();

        self.seal(Termination::Completed)
    }

    fn accumulate(&mut self, category: SignalCategory, weight: u32) {
        if weight > 0 {
            log::debug!("{category}: +{weight}");
        }
        self.score.add(weight);
    }

    fn property(&mut self, category: SignalCategory) -> Step {
        let outcome = match read_property_signal(self.probe, category) {
            Some(outcome) => outcome,
            None => SignalOutcome::ambiguous(),
        };
        let step = property_step(category, &outcome, self.policy);
        let weight = match step {
            Step::Accumulate(w) => w,
            Step::ShortCircuit => 0,
        };
        log::debug!(
            "{category} = {:?} ({})",
            outcome.evidence(),
            outcome.verdict()
        );
        self.accumulate(category, weight);
        self.report.record(category, outcome, weight);
        step
    }

    fn sensors(&mut self) {
        let count = self.probe.sensor_count();
        let weight = sensor_weight(count, self.policy);
        log::debug!("sensor_count = {count}");
        self.accumulate(SignalCategory::SensorCount, weight);
        self.report.record_sensors(CountReading { count, weight });
    }

    fn user_apps(&mut self) {
        let count = self.probe.user_app_count();
        let weight = user_app_weight(count, self.policy);
        log::debug!("user_app_count = {count}");
        self.accumulate(SignalCategory::UserApps, weight);
        self.report.record_user_apps(CountReading { count, weight });
    }

    fn capability(&mut self, capability: Capability) {
        let present = self.probe.has_capability(capability);
        let weight = capability_weight(present, self.policy);
        log::debug!("{capability} = {present}");
        self.accumulate(capability.category(), weight);
        self.report.record_capability(CapabilityReading {
            capability,
            present,
            reliability: capability.reliability(),
            weight,
        });
    }

    fn cgroup(&mut self) {
        let outcome = read_cgroup_signal(self.probe);
        let weight = cgroup_weight(&outcome, self.policy);
        self.accumulate(SignalCategory::Cgroup, weight);
        self.report.record(SignalCategory::Cgroup, outcome, weight);
    }

    fn seal(self, termination: Termination) -> EvidenceReport {
        let is_emulator = match termination {
            Termination::ShortCircuited { .. } => true,
            Termination::Completed => self.score.value() > self.policy.threshold,
        };
        self.report
            .finish(self.score, self.policy.threshold, termination, is_emulator)
    }
}
