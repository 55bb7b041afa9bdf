//! Signal evaluators.
//!
//! Pure functions from a raw, possibly missing value to a [`SignalOutcome`].
//! The `read_*` wrappers perform the single probe read each category needs.

use crate::patterns::{
    BASEBAND_MARKERS, BOARD_MARKERS, FLAVOR_MARKERS, HARDWARE_MARKERS, MANUFACTURER_MARKERS,
    MODEL_MARKERS, MarkerTable, PLATFORM_MARKERS, table_for,
};
use crate::probe::{CGROUP_COMMAND, DeviceProbe};
use crate::signal::SignalCategory;
use crate::verdict::SignalOutcome;

/// Treat unset and zero-length values as absent. Whitespace is a value.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.is_empty())
}

/// Classify a property value against a marker table.
pub fn classify(table: &MarkerTable, raw: Option<&str>) -> SignalOutcome {
    let Some(value) = present(raw) else {
        return SignalOutcome::ambiguous();
    };
    let lowered = value.to_lowercase();
    match table.find(&lowered) {
        Some(marker) => {
            log::debug!("{}: '{value}' matches emulator marker '{marker}'", table.category);
            SignalOutcome::conclusive(value)
        }
        None => SignalOutcome::unknown(value),
    }
}

pub fn evaluate_hardware(raw: Option<&str>) -> SignalOutcome {
    classify(&HARDWARE_MARKERS, raw)
}

pub fn evaluate_flavor(raw: Option<&str>) -> SignalOutcome {
    classify(&FLAVOR_MARKERS, raw)
}

pub fn evaluate_model(raw: Option<&str>) -> SignalOutcome {
    classify(&MODEL_MARKERS, raw)
}

pub fn evaluate_manufacturer(raw: Option<&str>) -> SignalOutcome {
    classify(&MANUFACTURER_MARKERS, raw)
}

pub fn evaluate_board(raw: Option<&str>) -> SignalOutcome {
    classify(&BOARD_MARKERS, raw)
}

pub fn evaluate_platform(raw: Option<&str>) -> SignalOutcome {
    classify(&PLATFORM_MARKERS, raw)
}

pub fn evaluate_baseband(raw: Option<&str>) -> SignalOutcome {
    classify(&BASEBAND_MARKERS, raw)
}

/// Control-group reading. Only whether it could be read matters; the
/// content is kept as evidence but never classified.
pub fn evaluate_cgroup(raw: Option<&str>) -> SignalOutcome {
    match raw.filter(|v| !v.trim().is_empty()) {
        Some(content) => SignalOutcome::unknown(content),
        None => SignalOutcome::ambiguous(),
    }
}

/// Dispatch to the evaluator of a property-backed category.
///
/// Returns `None` for categories that are not property-backed.
pub fn evaluate_property(category: SignalCategory, raw: Option<&str>) -> Option<SignalOutcome> {
    table_for(category).map(|table| classify(table, raw))
}

/// Read and classify one property-backed category.
pub fn read_property_signal(
    probe: &dyn DeviceProbe,
    category: SignalCategory,
) -> Option<SignalOutcome> {
    let key = category.property_key()?;
    let raw = probe.read_property(key);
    evaluate_property(category, raw.as_deref())
}

/// Read and classify the control-group category.
pub fn read_cgroup_signal(probe: &dyn DeviceProbe) -> SignalOutcome {
    evaluate_cgroup(probe.run_shell(CGROUP_COMMAND).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StaticProbe;
    use crate::verdict::Verdict;

    #[test]
    fn absent_value_is_ambiguous() {
        for category in SignalCategory::PROPERTIES {
            let outcome = evaluate_property(category, None).unwrap();
            assert_eq!(outcome.verdict(), Verdict::Ambiguous, "{category}");
            assert_eq!(outcome.evidence(), None);
        }
    }

    #[test]
    fn empty_value_is_absent() {
        assert!(evaluate_model(Some("")).is_ambiguous());
        assert_eq!(evaluate_model(Some("")).evidence(), None);
    }

    #[test]
    fn whitespace_value_is_present_but_unknown() {
        for category in SignalCategory::PROPERTIES {
            let outcome = evaluate_property(category, Some("   ")).unwrap();
            assert_eq!(outcome.verdict(), Verdict::InconclusiveUnknown, "{category}");
            assert_eq!(outcome.evidence(), Some("   "));
        }
    }

    #[test]
    fn hardware_markers_are_case_insensitive() {
        let outcome = evaluate_hardware(Some("NOX"));
        assert!(outcome.is_conclusive());
        assert_eq!(outcome.evidence(), Some("NOX"));
        assert!(evaluate_hardware(Some("Vbox86")).is_conclusive());
    }

    #[test]
    fn real_values_are_unknown() {
        assert_eq!(
            evaluate_hardware(Some("qcom")).verdict(),
            Verdict::InconclusiveUnknown
        );
        assert_eq!(
            evaluate_manufacturer(Some("samsung")).verdict(),
            Verdict::InconclusiveUnknown
        );
        assert_eq!(
            evaluate_baseband(Some("G998BXXU5CVDD")).verdict(),
            Verdict::InconclusiveUnknown
        );
    }

    #[test]
    fn per_category_markers() {
        assert!(evaluate_flavor(Some("sdk_gphone_x86_64-userdebug")).is_conclusive());
        assert!(evaluate_flavor(Some("vbox86p-userdebug")).is_conclusive());
        assert!(evaluate_model(Some("Android SDK built for x86")).is_conclusive());
        assert!(evaluate_model(Some("google_sdk")).is_conclusive());
        assert!(evaluate_manufacturer(Some("Genymotion")).is_conclusive());
        assert!(evaluate_manufacturer(Some("Netease")).is_conclusive());
        assert!(evaluate_board(Some("goldfish_x86")).is_conclusive());
        assert!(evaluate_platform(Some("android-x86")).is_conclusive());
        assert!(evaluate_baseband(Some("1.0.0.0")).is_conclusive());
    }

    #[test]
    fn cgroup_is_never_conclusive() {
        assert!(evaluate_cgroup(None).is_ambiguous());
        assert!(evaluate_cgroup(Some("")).is_ambiguous());
        assert!(evaluate_cgroup(Some(" \n")).is_ambiguous());
        let outcome = evaluate_cgroup(Some("0::/uid_10123/pid_4242"));
        assert_eq!(outcome.verdict(), Verdict::InconclusiveUnknown);
        // Emulator-looking content is still not classified.
        let outcome = evaluate_cgroup(Some("1:cpu:/vbox/goldfish"));
        assert_eq!(outcome.verdict(), Verdict::InconclusiveUnknown);
    }

    #[test]
    fn non_property_categories_have_no_evaluator() {
        assert!(evaluate_property(SignalCategory::SensorCount, Some("3")).is_none());
        assert!(read_property_signal(&StaticProbe::new(), SignalCategory::Camera).is_none());
    }

    #[test]
    fn reads_through_probe() {
        let probe = StaticProbe::new()
            .with_property("ro.product.board", "goldfish")
            .with_command_output(CGROUP_COMMAND, "0::/");
        let board = read_property_signal(&probe, SignalCategory::Board).unwrap();
        assert!(board.is_conclusive());
        let model = read_property_signal(&probe, SignalCategory::Model).unwrap();
        assert!(model.is_ambiguous());
        assert_eq!(read_cgroup_signal(&probe).evidence(), Some("0::/"));
    }
}
