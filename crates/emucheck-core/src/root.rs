//! Root detection.
//!
//! Independent of the emulator score: a device is considered rooted when
//! `su -v` runs and prints a version.

use serde::{Deserialize, Serialize};

use crate::probe::{DeviceProbe, ROOT_COMMAND};

/// Outcome of the root check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RootStatus {
    /// `su` answered; carries its version string.
    Rooted { su_version: String },
    /// `su` is missing or printed nothing.
    NotRooted,
    /// The probe cannot run shell commands, so the check is meaningless.
    Unsupported,
}

impl RootStatus {
    pub fn is_rooted(&self) -> bool {
        matches!(self, Self::Rooted { .. })
    }
}

impl std::fmt::Display for RootStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rooted { su_version } => write!(f, "rooted (su {su_version})"),
            Self::NotRooted => write!(f, "not rooted"),
            Self::Unsupported => write!(f, "not supported"),
        }
    }
}

/// Run the root check through `probe`.
pub fn check_root(probe: &dyn DeviceProbe) -> RootStatus {
    if !probe.supports_shell() {
        log::debug!("root check skipped: probe has no shell");
        return RootStatus::Unsupported;
    }
    match probe.run_shell(ROOT_COMMAND) {
        Some(out) => {
            let su_version = out.lines().next().unwrap_or_default().trim().to_string();
            if su_version.is_empty() {
                RootStatus::NotRooted
            } else {
                log::info!("device is rooted (su {su_version})");
                RootStatus::Rooted { su_version }
            }
        }
        None => RootStatus::NotRooted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StaticProbe;

    #[test]
    fn su_version_means_rooted() {
        let probe = StaticProbe::new().with_command_output(ROOT_COMMAND, "26.1:MAGISKSU\n");
        let status = check_root(&probe);
        assert_eq!(
            status,
            RootStatus::Rooted {
                su_version: "26.1:MAGISKSU".to_string()
            }
        );
        assert!(status.is_rooted());
    }

    #[test]
    fn missing_su_is_not_rooted() {
        assert_eq!(check_root(&StaticProbe::new()), RootStatus::NotRooted);
    }

    #[test]
    fn no_shell_is_unsupported() {
        let probe = StaticProbe::new()
            .with_command_output(ROOT_COMMAND, "26.1:MAGISKSU")
            .without_shell();
        assert_eq!(check_root(&probe), RootStatus::Unsupported);
    }

    #[test]
    fn status_serializes_tagged() {
        let json = serde_json::to_string(&RootStatus::NotRooted).unwrap();
        assert_eq!(json, r#"{"status":"not_rooted"}"#);
    }
}
