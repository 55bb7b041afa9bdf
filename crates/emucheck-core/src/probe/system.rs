//! SystemProbe: reads signals from the running device.
//!
//! Properties come from `getprop`, capabilities from the package manager's
//! feature list, sensors from the `sensorservice` dump. Everything shells out
//! through [`run_command`] with the configured deadline, so a wedged system
//! service degrades to "unavailable" instead of hanging the check.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::DeviceProbe;
use super::command::{program_exists, run_command, run_shell_line};
use crate::error::{EmuCheckError, Result};
use crate::signal::Capability;

/// Default per-command deadline.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 2000;

/// Sensor type string of the ambient light sensor in `dumpsys` output.
const LIGHT_SENSOR_TYPE: &str = "android.sensor.light";

/// Settings for [`SystemProbe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Deadline applied to every subprocess, in milliseconds.
    pub command_timeout_ms: u64,
    /// Shell used for free-form command lines.
    pub shell: String,
    /// Property reader.
    pub getprop: String,
    /// Package manager.
    pub pm: String,
    /// Service dumper.
    pub dumpsys: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            shell: "sh".to_string(),
            getprop: "getprop".to_string(),
            pm: "pm".to_string(),
            dumpsys: "dumpsys".to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// Probe backed by the platform's own command-line tools.
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    config: ProbeConfig,
}

impl SystemProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    fn features(&self) -> Option<String> {
        run_command(
            &self.config.pm,
            &["list", "features"],
            self.config.command_timeout(),
        )
    }

    fn sensor_dump(&self) -> Option<String> {
        run_command(
            &self.config.dumpsys,
            &["sensorservice"],
            self.config.command_timeout(),
        )
    }
}

impl DeviceProbe for SystemProbe {
    fn read_property(&self, key: &str) -> Option<String> {
        let value = run_command(&self.config.getprop, &[key], self.config.command_timeout());
        log::debug!("getprop {key} -> {value:?}");
        value
    }

    fn run_shell(&self, command: &str) -> Option<String> {
        run_shell_line(&self.config.shell, command, self.config.command_timeout())
    }

    fn has_capability(&self, capability: Capability) -> bool {
        match capability.system_feature() {
            Some(feature) => self
                .features()
                .map(|listing| has_feature(&listing, feature))
                .unwrap_or(false),
            None => self
                .sensor_dump()
                .map(|dump| {
                    parse_sensor_list(&dump)
                        .iter()
                        .any(|s| s.type_name == LIGHT_SENSOR_TYPE)
                })
                .unwrap_or(false),
        }
    }

    fn sensor_count(&self) -> u32 {
        self.sensor_dump()
            .map(|dump| parse_sensor_list(&dump).len() as u32)
            .unwrap_or(0)
    }

    fn supports_shell(&self) -> bool {
        program_exists(&self.config.shell)
    }

    fn validate(&self) -> Result<()> {
        if self.config.command_timeout_ms == 0 {
            return Err(EmuCheckError::invalid_context(
                "command timeout must be greater than zero",
            ));
        }
        let programs = [
            ("shell", &self.config.shell),
            ("getprop", &self.config.getprop),
            ("pm", &self.config.pm),
            ("dumpsys", &self.config.dumpsys),
        ];
        for (role, program) in programs {
            if program.trim().is_empty() {
                return Err(EmuCheckError::invalid_context(format!(
                    "{role} program path is empty"
                )));
            }
        }
        Ok(())
    }
}

/// Whether a `pm list features` listing advertises `feature`.
///
/// Lines look like `feature:android.hardware.camera` or, for versioned
/// features, `feature:android.hardware.vulkan.level=1`.
pub fn has_feature(listing: &str, feature: &str) -> bool {
    listing.lines().any(|line| {
        line.trim()
            .strip_prefix("feature:")
            .map(|rest| rest.split('=').next().unwrap_or(rest) == feature)
            .unwrap_or(false)
    })
}

/// One entry of the `sensorservice` sensor list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEntry {
    pub name: String,
    /// e.g. `android.sensor.accelerometer`
    pub type_name: String,
}

/// Parse the `Sensor List:` section of `dumpsys sensorservice`.
///
/// Entries look like
/// `0x00000001) BMI160 Accelerometer | Bosch | ver: 1 | type: android.sensor.accelerometer(1) | ...`.
pub fn parse_sensor_list(dump: &str) -> Vec<SensorEntry> {
    let mut sensors = Vec::new();
    let mut in_list = false;

    for line in dump.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Sensor List:") {
            in_list = true;
            continue;
        }
        if !in_list {
            continue;
        }

        let Some((handle, rest)) = trimmed.split_once(')') else {
            // First line that is not a handle entry ends the section.
            if !trimmed.is_empty() {
                break;
            }
            continue;
        };
        if !handle.starts_with("0x") {
            break;
        }

        let mut fields = rest.split('|').map(str::trim);
        let name = fields.next().unwrap_or_default().to_string();
        let type_name = fields
            .find_map(|f| f.strip_prefix("type:"))
            .map(|t| t.trim().split('(').next().unwrap_or_default().to_string())
            .unwrap_or_default();
        sensors.push(SensorEntry { name, type_name });
    }

    sensors
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSOR_DUMP: &str = "\
Captured at: 10:00:00.000
Sensor Device:
Total 3 h/w sensors, 3 running 0 disabled clients:
Sensor List:
0x00000001) BMI160 Accelerometer | Bosch | ver: 1 | type: android.sensor.accelerometer(1) | perm: n/a | flags: 0x00000000
0x00000002) TMD4903 Light | AMS | ver: 1 | type: android.sensor.light(5) | perm: n/a | flags: 0x00000002
0x00000003) BMI160 Gyroscope | Bosch | ver: 1 | type: android.sensor.gyroscope(4) | perm: n/a | flags: 0x00000000
Fusion States:
9-axis fusion disabled (0 clients), gyro-rate= 200.00Hz
";

    #[test]
    fn parses_sensor_list_section() {
        let sensors = parse_sensor_list(SENSOR_DUMP);
        assert_eq!(sensors.len(), 3);
        assert_eq!(sensors[0].name, "BMI160 Accelerometer");
        assert_eq!(sensors[1].type_name, "android.sensor.light");
    }

    #[test]
    fn sensor_list_missing_section() {
        assert!(parse_sensor_list("Sensor Device:\nnothing here").is_empty());
    }

    #[test]
    fn feature_lookup_is_exact() {
        let listing = "feature:android.hardware.camera.flash\nfeature:android.hardware.vulkan.level=1\n";
        assert!(has_feature(listing, "android.hardware.camera.flash"));
        assert!(has_feature(listing, "android.hardware.vulkan.level"));
        assert!(!has_feature(listing, "android.hardware.camera"));
        assert!(!has_feature(listing, "android.hardware.bluetooth"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let probe = SystemProbe::new(ProbeConfig {
            command_timeout_ms: 0,
            ..ProbeConfig::default()
        });
        assert!(matches!(
            probe.validate(),
            Err(EmuCheckError::InvalidContext { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_program() {
        let probe = SystemProbe::new(ProbeConfig {
            getprop: "  ".to_string(),
            ..ProbeConfig::default()
        });
        assert!(probe.validate().is_err());
        assert!(SystemProbe::default().validate().is_ok());
    }

    #[test]
    fn missing_tools_degrade_to_unavailable() {
        let probe = SystemProbe::new(ProbeConfig {
            command_timeout_ms: 200,
            getprop: "/nonexistent/getprop".to_string(),
            pm: "/nonexistent/pm".to_string(),
            dumpsys: "/nonexistent/dumpsys".to_string(),
            ..ProbeConfig::default()
        });
        assert_eq!(probe.read_property("ro.hardware"), None);
        assert!(!probe.has_capability(Capability::Camera));
        assert!(!probe.has_capability(Capability::LightSensor));
        assert_eq!(probe.sensor_count(), 0);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ProbeConfig = serde_json::from_str(r#"{"command_timeout_ms": 500}"#).unwrap();
        assert_eq!(config.command_timeout(), Duration::from_millis(500));
        assert_eq!(config.getprop, "getprop");
    }
}
