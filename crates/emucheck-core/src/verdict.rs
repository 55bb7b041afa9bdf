//! Per-signal classification results.

use serde::{Deserialize, Serialize};

/// Classification of a single signal.
///
/// There is deliberately no "conclusively real" variant: the only way a
/// signal speaks for genuine hardware is by not raising suspicion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The value is a known fingerprint of an emulator product.
    ConclusiveEmulator,
    /// No value could be obtained; weak evidence of emulation.
    Ambiguous,
    /// A value was obtained and matched no marker.
    InconclusiveUnknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConclusiveEmulator => write!(f, "emulator"),
            Self::Ambiguous => write!(f, "ambiguous"),
            Self::InconclusiveUnknown => write!(f, "unknown"),
        }
    }
}

/// A verdict together with the raw value it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalOutcome {
    verdict: Verdict,
    evidence: Option<String>,
}

impl SignalOutcome {
    /// A value that matched an emulator marker.
    pub fn conclusive(evidence: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::ConclusiveEmulator,
            evidence: Some(evidence.into()),
        }
    }

    /// No value was obtainable.
    pub fn ambiguous() -> Self {
        Self {
            verdict: Verdict::Ambiguous,
            evidence: None,
        }
    }

    /// A value was read and matched nothing.
    pub fn unknown(evidence: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::InconclusiveUnknown,
            evidence: Some(evidence.into()),
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The raw value observed, if any.
    pub fn evidence(&self) -> Option<&str> {
        self.evidence.as_deref()
    }

    pub fn is_conclusive(&self) -> bool {
        self.verdict == Verdict::ConclusiveEmulator
    }

    pub fn is_ambiguous(&self) -> bool {
        self.verdict == Verdict::Ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_has_no_evidence() {
        let outcome = SignalOutcome::ambiguous();
        assert!(outcome.is_ambiguous());
        assert_eq!(outcome.evidence(), None);
    }

    #[test]
    fn conclusive_keeps_raw_value() {
        let outcome = SignalOutcome::conclusive("Nox");
        assert!(outcome.is_conclusive());
        assert_eq!(outcome.evidence(), Some("Nox"));
    }

    #[test]
    fn verdict_serializes_snake_case() {
        let json = serde_json::to_string(&Verdict::InconclusiveUnknown).unwrap();
        assert_eq!(json, "\"inconclusive_unknown\"");
    }
}
