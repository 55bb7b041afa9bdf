//! Evidence report for one evaluation run.
//!
//! The report is assembled incrementally by the engine and sealed exactly
//! once. After that it is read-only: it records every signal that was read,
//! the weight each one added, the final score and the decision.

use serde::{Deserialize, Serialize};

use crate::signal::{Capability, Reliability, SignalCategory};
use crate::verdict::SignalOutcome;

/// Accumulated suspicion. Only ever grows during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuspicionScore(u32);

impl SuspicionScore {
    pub fn value(self) -> u32 {
        self.0
    }

    pub(crate) fn add(&mut self, weight: u32) {
        self.0 = self.0.saturating_add(weight);
    }
}

impl std::fmt::Display for SuspicionScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an evaluation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// A conclusive marker ended the run early.
    ShortCircuited { category: SignalCategory },
    /// Every signal was read and scored.
    Completed,
}

/// One classified signal and the weight it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub category: SignalCategory,
    pub outcome: SignalOutcome,
    pub weight: u32,
}

/// A count-based signal (sensors, user apps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountReading {
    pub count: u32,
    pub weight: u32,
}

/// A capability query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityReading {
    pub capability: Capability,
    pub present: bool,
    pub reliability: Reliability,
    pub weight: u32,
}

/// Immutable record of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReport {
    entries: Vec<EvidenceEntry>,
    sensors: Option<CountReading>,
    user_apps: Option<CountReading>,
    capabilities: Vec<CapabilityReading>,
    score: SuspicionScore,
    threshold: u32,
    termination: Termination,
    is_emulator: bool,
}

impl EvidenceReport {
    /// Classified signals in evaluation order (properties, then cgroup).
    pub fn entries(&self) -> &[EvidenceEntry] {
        &self.entries
    }

    pub fn entry(&self, category: SignalCategory) -> Option<&EvidenceEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Sensor reading; `None` if the run ended before sensors were counted.
    pub fn sensors(&self) -> Option<CountReading> {
        self.sensors
    }

    pub fn user_apps(&self) -> Option<CountReading> {
        self.user_apps
    }

    pub fn capabilities(&self) -> &[CapabilityReading] {
        &self.capabilities
    }

    pub fn score(&self) -> SuspicionScore {
        self.score
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_emulator(&self) -> bool {
        self.is_emulator
    }

    /// Categories that were read, in order.
    pub fn evaluated_categories(&self) -> Vec<SignalCategory> {
        let mut out: Vec<SignalCategory> = self
            .entries
            .iter()
            .map(|e| e.category)
            .filter(|c| *c != SignalCategory::Cgroup)
            .collect();
        if self.sensors.is_some() {
            out.push(SignalCategory::SensorCount);
        }
        if self.user_apps.is_some() {
            out.push(SignalCategory::UserApps);
        }
        out.extend(self.capabilities.iter().map(|c| c.capability.category()));
        if self.entry(SignalCategory::Cgroup).is_some() {
            out.push(SignalCategory::Cgroup);
        }
        out
    }

    /// Line-oriented diagnostic listing.
    ///
    /// Low-confidence capability signals are marked so a reader does not
    /// over-weight them.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        for entry in &self.entries {
            let value = match entry.category {
                SignalCategory::Cgroup => entry.outcome.evidence().map(summarize_multiline),
                _ => entry.outcome.evidence().map(str::to_string),
            };
            lines.push(format!(
                "{} = {} [{}, +{}]",
                entry.category,
                value.as_deref().unwrap_or("null"),
                entry.outcome.verdict(),
                entry.weight
            ));
        }

        if let Some(s) = self.sensors {
            lines.push(format!("sensor_count = {} [+{}]", s.count, s.weight));
        }
        if let Some(a) = self.user_apps {
            lines.push(format!("user_app_count = {} [+{}]", a.count, a.weight));
        }
        for c in &self.capabilities {
            let note = match c.reliability {
                Reliability::Low => " (low confidence)",
                Reliability::Normal => "",
            };
            lines.push(format!(
                "{} = {} [+{}]{note}",
                c.capability, c.present, c.weight
            ));
        }

        if let Termination::ShortCircuited { category } = self.termination {
            lines.push(format!("short_circuit = {category}"));
        }
        lines.push(format!("suspect_count = {}", self.score));
        lines.push(format!("threshold = {}", self.threshold));
        lines.push(format!("is_emulator = {}", self.is_emulator));
        lines.join("\n")
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn summarize_multiline(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().to_string();
    let rest = lines.count();
    if rest == 0 {
        first
    } else {
        format!("{first} (+{rest} more lines)")
    }
}

/// Incremental report assembly. Consumed by [`ReportBuilder::finish`], so a
/// report can be sealed only once.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    entries: Vec<EvidenceEntry>,
    sensors: Option<CountReading>,
    user_apps: Option<CountReading>,
    capabilities: Vec<CapabilityReading>,
}

impl ReportBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, category: SignalCategory, outcome: SignalOutcome, weight: u32) {
        self.entries.push(EvidenceEntry {
            category,
            outcome,
            weight,
        });
    }

    pub(crate) fn record_sensors(&mut self, reading: CountReading) {
        self.sensors = Some(reading);
    }

    pub(crate) fn record_user_apps(&mut self, reading: CountReading) {
        self.user_apps = Some(reading);
    }

    pub(crate) fn record_capability(&mut self, reading: CapabilityReading) {
        self.capabilities.push(reading);
    }

    pub(crate) fn finish(
        self,
        score: SuspicionScore,
        threshold: u32,
        termination: Termination,
        is_emulator: bool,
    ) -> EvidenceReport {
        EvidenceReport {
            entries: self.entries,
            sensors: self.sensors,
            user_apps: self.user_apps,
            capabilities: self.capabilities,
            score,
            threshold,
            termination,
            is_emulator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvidenceReport {
        let mut b = ReportBuilder::new();
        b.record(SignalCategory::Hardware, SignalOutcome::unknown("qcom"), 0);
        b.record(SignalCategory::Baseband, SignalOutcome::ambiguous(), 2);
        b.record_sensors(CountReading { count: 3, weight: 1 });
        b.record_user_apps(CountReading { count: 40, weight: 0 });
        b.record_capability(CapabilityReading {
            capability: Capability::Bluetooth,
            present: false,
            reliability: Reliability::Low,
            weight: 1,
        });
        b.record(
            SignalCategory::Cgroup,
            SignalOutcome::unknown("0::/\n1:cpu:/\n2:memory:/"),
            0,
        );
        let mut score = SuspicionScore::default();
        score.add(4);
        b.finish(score, 3, Termination::Completed, true)
    }

    #[test]
    fn score_saturates() {
        let mut score = SuspicionScore::default();
        score.add(u32::MAX);
        score.add(5);
        assert_eq!(score.value(), u32::MAX);
    }

    #[test]
    fn render_marks_low_confidence_and_nulls() {
        let text = sample().render_text();
        assert!(text.contains("hardware = qcom [unknown, +0]"));
        assert!(text.contains("baseband = null [ambiguous, +2]"));
        assert!(text.contains("bluetooth = false [+1] (low confidence)"));
        assert!(text.contains("cgroup = 0::/ (+2 more lines)"));
        assert!(text.contains("suspect_count = 4"));
        assert!(text.ends_with("is_emulator = true"));
    }

    #[test]
    fn evaluated_categories_follow_pipeline_order() {
        assert_eq!(
            sample().evaluated_categories(),
            vec![
                SignalCategory::Hardware,
                SignalCategory::Baseband,
                SignalCategory::SensorCount,
                SignalCategory::UserApps,
                SignalCategory::Bluetooth,
                SignalCategory::Cgroup,
            ]
        );
    }

    #[test]
    fn short_circuit_is_rendered() {
        let mut b = ReportBuilder::new();
        b.record(SignalCategory::Hardware, SignalOutcome::conclusive("nox"), 0);
        let report = b.finish(
            SuspicionScore::default(),
            3,
            Termination::ShortCircuited {
                category: SignalCategory::Hardware,
            },
            true,
        );
        let text = report.render_text();
        assert!(text.contains("short_circuit = hardware"));
        assert!(!text.contains("sensor_count"));
    }

    #[test]
    fn report_json_round_trip() {
        let report = sample();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"kind\": \"completed\""));
        let back: EvidenceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
