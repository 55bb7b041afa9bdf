//! Scoring policy: weights, floors and the decision threshold.
//!
//! The defaults are tuned constants taken from observed emulator behavior.
//! They are configuration, not derivations, so every one of them can be
//! overridden from a JSON file:
//!
//! ```json
//! { "threshold": 4, "ambiguous_weights": { "baseband": 3 } }
//! ```
//!
//! Missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EmuCheckError, Result};
use crate::signal::{Capability, SignalCategory};

/// Weight added when a property-backed category is ambiguous (no value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguousWeights {
    pub hardware: u32,
    pub flavor: u32,
    pub model: u32,
    pub manufacturer: u32,
    pub board: u32,
    pub platform: u32,
    /// A missing baseband is far more common on emulators than on phones.
    pub baseband: u32,
}

impl Default for AmbiguousWeights {
    fn default() -> Self {
        Self {
            hardware: 1,
            flavor: 1,
            model: 1,
            manufacturer: 1,
            board: 1,
            platform: 1,
            baseband: 2,
        }
    }
}

impl AmbiguousWeights {
    /// Weight for `category`; zero for categories that are not property-backed.
    pub fn get(&self, category: SignalCategory) -> u32 {
        match category {
            SignalCategory::Hardware => self.hardware,
            SignalCategory::Flavor => self.flavor,
            SignalCategory::Model => self.model,
            SignalCategory::Manufacturer => self.manufacturer,
            SignalCategory::Board => self.board,
            SignalCategory::Platform => self.platform,
            SignalCategory::Baseband => self.baseband,
            _ => 0,
        }
    }

    fn total(&self) -> u32 {
        SignalCategory::PROPERTIES
            .iter()
            .map(|c| self.get(*c))
            .fold(0u32, u32::saturating_add)
    }
}

/// Every tunable of the aggregation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// A score strictly greater than this classifies the device as an emulator.
    pub threshold: u32,
    pub ambiguous_weights: AmbiguousWeights,
    /// Sensor counts at or below this are suspicious.
    pub sensor_floor: u32,
    pub sensor_weight: u32,
    /// Third-party app counts at or below this are suspicious.
    pub user_app_floor: u32,
    pub user_app_weight: u32,
    /// Added once per absent capability.
    pub capability_weight: u32,
    /// Added when the control-group read fails.
    pub cgroup_weight: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            threshold: 3,
            ambiguous_weights: AmbiguousWeights::default(),
            sensor_floor: 7,
            sensor_weight: 1,
            user_app_floor: 5,
            user_app_weight: 1,
            capability_weight: 1,
            cgroup_weight: 1,
        }
    }
}

impl ScoringPolicy {
    /// Load and validate a policy from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate a policy from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Ambiguous-verdict weight for a property-backed category.
    pub fn ambiguous_weight(&self, category: SignalCategory) -> u32 {
        self.ambiguous_weights.get(category)
    }

    /// Highest score any device can reach under this policy.
    pub fn max_score(&self) -> u32 {
        let capabilities = self
            .capability_weight
            .saturating_mul(Capability::ALL.len() as u32);
        [
            self.ambiguous_weights.total(),
            self.sensor_weight,
            self.user_app_weight,
            capabilities,
            self.cgroup_weight,
        ]
        .into_iter()
        .fold(0u32, u32::saturating_add)
    }

    /// Reject policies that can never classify a device as an emulator
    /// without a conclusive marker.
    pub fn validate(&self) -> Result<()> {
        let max = self.max_score();
        if max <= self.threshold {
            return Err(EmuCheckError::policy(format!(
                "threshold {} is unreachable: the maximum score is {max}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_policy() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.threshold, 3);
        assert_eq!(policy.ambiguous_weight(SignalCategory::Baseband), 2);
        assert_eq!(policy.ambiguous_weight(SignalCategory::Hardware), 1);
        assert_eq!(policy.ambiguous_weight(SignalCategory::Cgroup), 0);
        assert_eq!(policy.sensor_floor, 7);
        assert_eq!(policy.user_app_floor, 5);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn max_score_of_defaults() {
        // 6 * 1 + 2 (properties) + 1 + 1 + 4 + 1
        assert_eq!(ScoringPolicy::default().max_score(), 15);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let policy =
            ScoringPolicy::from_json(r#"{"threshold": 5, "ambiguous_weights": {"baseband": 3}}"#)
                .unwrap();
        assert_eq!(policy.threshold, 5);
        assert_eq!(policy.ambiguous_weight(SignalCategory::Baseband), 3);
        assert_eq!(policy.ambiguous_weight(SignalCategory::Model), 1);
        assert_eq!(policy.sensor_floor, 7);
    }

    #[test]
    fn unreachable_threshold_is_rejected() {
        let err = ScoringPolicy::from_json(r#"{"threshold": 15}"#).unwrap_err();
        assert!(matches!(err, EmuCheckError::Policy { .. }));
        assert!(ScoringPolicy::from_json(r#"{"threshold": 14}"#).is_ok());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ScoringPolicy::from_json("{ threshold: ").unwrap_err();
        assert!(matches!(err, EmuCheckError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sensor_floor": 4, "capability_weight": 2}}"#).unwrap();
        let policy = ScoringPolicy::from_path(file.path()).unwrap();
        assert_eq!(policy.sensor_floor, 4);
        assert_eq!(policy.capability_weight, 2);
        assert_eq!(policy.threshold, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScoringPolicy::from_path(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(matches!(err, EmuCheckError::Io(_)));
    }

    #[test]
    fn json_round_trip() {
        let policy = ScoringPolicy::default().with_threshold(6);
        let back = ScoringPolicy::from_json(&policy.to_json().unwrap()).unwrap();
        assert_eq!(back, policy);
    }
}
