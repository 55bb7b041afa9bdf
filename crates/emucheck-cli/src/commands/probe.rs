use emucheck_core::engine::{
    Step, capability_weight, cgroup_weight, property_step, sensor_weight, user_app_weight,
};
use emucheck_core::evaluator::{read_cgroup_signal, read_property_signal};
use emucheck_core::{DeviceProbe, EmulatorDetector, ScoringPolicy, SignalCategory, SignalOutcome};

pub fn run(
    category_name: &str,
    fixture: Option<&str>,
    probe_config: Option<&str>,
    policy_path: Option<&str>,
) {
    let Some(category) = super::parse_category(category_name) else {
        eprintln!("Signal '{category_name}' not found. Run 'signals' to list them.");
        std::process::exit(1);
    };

    let detector = match EmulatorDetector::new(super::load_policy(policy_path, None)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load scoring policy: {e}");
            std::process::exit(1);
        }
    };
    let probe = super::make_probe(fixture, probe_config);
    let info = category.info();
    println!("Probing: {}", info.name);
    println!("  {}", info.description);
    println!("  Source: {}", info.origin);
    println!();

    let reading = read_signal(probe.as_ref(), category, detector.policy());
    println!("  Value:     {}", reading.value);
    if let Some(verdict) = reading.verdict {
        println!("  Verdict:   {verdict}");
    }
    match reading.step {
        Step::ShortCircuit => println!("  Effect:    conclusive, stops the check"),
        Step::Accumulate(w) => println!(
            "  Effect:    +{w} suspicion (threshold {})",
            detector.policy().threshold
        ),
    }
    println!("  Reliability: {}", info.reliability);
}

/// One signal read in isolation.
struct SignalReading {
    value: String,
    verdict: Option<emucheck_core::Verdict>,
    step: Step,
}

fn read_signal(
    probe: &dyn DeviceProbe,
    category: SignalCategory,
    policy: &ScoringPolicy,
) -> SignalReading {
    if let Some(outcome) = read_property_signal(probe, category) {
        let step = property_step(category, &outcome, policy);
        return from_outcome(&outcome, step);
    }
    if let Some(capability) = category.capability() {
        let present = probe.has_capability(capability);
        return SignalReading {
            value: present.to_string(),
            verdict: None,
            step: Step::Accumulate(capability_weight(present, policy)),
        };
    }
    match category {
        SignalCategory::SensorCount => {
            let count = probe.sensor_count();
            SignalReading {
                value: count.to_string(),
                verdict: None,
                step: Step::Accumulate(sensor_weight(count, policy)),
            }
        }
        SignalCategory::UserApps => {
            let count = probe.user_app_count();
            SignalReading {
                value: count.to_string(),
                verdict: None,
                step: Step::Accumulate(user_app_weight(count, policy)),
            }
        }
        _ => {
            let outcome = read_cgroup_signal(probe);
            let step = Step::Accumulate(cgroup_weight(&outcome, policy));
            from_outcome(&outcome, step)
        }
    }
}

fn from_outcome(outcome: &SignalOutcome, step: Step) -> SignalReading {
    SignalReading {
        value: outcome.evidence().unwrap_or("(unavailable)").to_string(),
        verdict: Some(outcome.verdict()),
        step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emucheck_core::{Capability, StaticProbe, Verdict};

    #[test]
    fn test_property_signal_reading() {
        let probe = StaticProbe::new().with_property("ro.product.manufacturer", "Genymotion");
        let reading = read_signal(
            &probe,
            SignalCategory::Manufacturer,
            &ScoringPolicy::default(),
        );
        assert_eq!(reading.value, "Genymotion");
        assert_eq!(reading.verdict, Some(Verdict::ConclusiveEmulator));
        assert_eq!(reading.step, Step::ShortCircuit);
    }

    #[test]
    fn test_missing_baseband_weighs_two() {
        let reading = read_signal(
            &StaticProbe::new(),
            SignalCategory::Baseband,
            &ScoringPolicy::default(),
        );
        assert_eq!(reading.verdict, Some(Verdict::Ambiguous));
        assert_eq!(reading.step, Step::Accumulate(2));
    }

    #[test]
    fn test_count_and_capability_readings() {
        let policy = ScoringPolicy::default();
        let probe = StaticProbe::new()
            .with_sensor_count(8)
            .with_user_app_count(5)
            .with_capability(Capability::Bluetooth);

        let sensors = read_signal(&probe, SignalCategory::SensorCount, &policy);
        assert_eq!((sensors.value.as_str(), sensors.step), ("8", Step::Accumulate(0)));

        let apps = read_signal(&probe, SignalCategory::UserApps, &policy);
        assert_eq!((apps.value.as_str(), apps.step), ("5", Step::Accumulate(1)));

        let bt = read_signal(&probe, SignalCategory::Bluetooth, &policy);
        assert_eq!(bt.step, Step::Accumulate(0));
        let flash = read_signal(&probe, SignalCategory::CameraFlash, &policy);
        assert_eq!((flash.value.as_str(), flash.step), ("false", Step::Accumulate(1)));
    }

    #[test]
    fn test_unreadable_cgroup() {
        let reading = read_signal(
            &StaticProbe::new(),
            SignalCategory::Cgroup,
            &ScoringPolicy::default(),
        );
        assert_eq!(reading.value, "(unavailable)");
        assert_eq!(reading.step, Step::Accumulate(1));
    }

    #[test]
    fn test_reading_uses_given_policy() {
        let mut policy = ScoringPolicy::default();
        policy.ambiguous_weights.baseband = 4;
        policy.sensor_floor = 10;
        let detector = EmulatorDetector::new(policy).unwrap();
        let probe = StaticProbe::new().with_sensor_count(9);

        let baseband = read_signal(&probe, SignalCategory::Baseband, detector.policy());
        assert_eq!(baseband.step, Step::Accumulate(4));
        let sensors = read_signal(&probe, SignalCategory::SensorCount, detector.policy());
        assert_eq!(sensors.step, Step::Accumulate(1));
    }
}
