pub mod check;
pub mod policy;
pub mod probe;
pub mod root;
pub mod signals;

use std::path::Path;

use emucheck_core::{
    DeviceProbe, ProbeConfig, Result, ScoringPolicy, SignalCategory, StaticProbe, SystemProbe,
};

/// Exit status of `check` when the device is classified as an emulator.
pub const EMULATOR_EXIT_CODE: i32 = 2;

/// Set up `env_logger`. `RUST_LOG` wins; otherwise warnings only, or debug
/// with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Build the probe a command reads from: a recorded snapshot when `fixture`
/// is given, the live system otherwise.
pub fn try_make_probe(
    fixture: Option<&str>,
    probe_config: Option<&str>,
) -> Result<Box<dyn DeviceProbe>> {
    if let Some(path) = fixture {
        log::debug!("replaying device snapshot from {path}");
        return Ok(Box::new(StaticProbe::from_path(Path::new(path))?));
    }
    let config = match probe_config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<ProbeConfig>(&raw)?
        }
        None => ProbeConfig::default(),
    };
    Ok(Box::new(SystemProbe::new(config)))
}

/// Like [`try_make_probe`], but exits with status 1 on failure.
pub fn make_probe(fixture: Option<&str>, probe_config: Option<&str>) -> Box<dyn DeviceProbe> {
    match try_make_probe(fixture, probe_config) {
        Ok(probe) => probe,
        Err(e) => {
            eprintln!("Failed to set up probe: {e}");
            std::process::exit(1);
        }
    }
}

/// Load the scoring policy and apply a threshold override. The result is
/// validated after the override.
pub fn try_load_policy(path: Option<&str>, threshold: Option<u32>) -> Result<ScoringPolicy> {
    let mut policy = match path {
        Some(p) => ScoringPolicy::from_path(Path::new(p))?,
        None => ScoringPolicy::default(),
    };
    if let Some(t) = threshold {
        policy = policy.with_threshold(t);
    }
    policy.validate()?;
    Ok(policy)
}

/// Like [`try_load_policy`], but exits with status 1 on failure.
pub fn load_policy(path: Option<&str>, threshold: Option<u32>) -> ScoringPolicy {
    match try_load_policy(path, threshold) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Failed to load scoring policy: {e}");
            std::process::exit(1);
        }
    }
}

/// Resolve a signal name, accepting `-` for `_` and any case.
pub fn parse_category(name: &str) -> Option<SignalCategory> {
    SignalCategory::from_name(&name.trim().to_lowercase().replace('-', "_"))
}
