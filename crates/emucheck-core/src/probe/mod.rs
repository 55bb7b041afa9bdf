//! Signal acquisition.
//!
//! The engine never talks to the platform directly. It reads every raw value
//! through a [`DeviceProbe`], so the scoring logic can run against the live
//! system ([`SystemProbe`]) or against a recorded snapshot ([`StaticProbe`]).

pub mod command;
pub mod fixture;
pub mod system;

pub use fixture::StaticProbe;
pub use system::{ProbeConfig, SystemProbe};

use crate::error::Result;
use crate::signal::Capability;

/// Shell command listing third-party packages, one `package:<name>` per line.
pub const USER_PACKAGES_COMMAND: &str = "pm list package -3";

/// Shell command dumping the control groups of the current process.
pub const CGROUP_COMMAND: &str = "cat /proc/self/cgroup";

/// Shell command printing the su version on rooted devices.
pub const ROOT_COMMAND: &str = "su -v";

/// Typed access to the raw environment signals of one device.
///
/// Implementations must never fail on missing data: an unreadable property,
/// a failed command or an unqueryable capability is reported as `None`,
/// `false` or `0`.
pub trait DeviceProbe {
    /// Read a named platform property. `None` if unset or unreadable.
    fn read_property(&self, key: &str) -> Option<String>;

    /// Run a shell command and capture stdout. `None` on failure or empty
    /// output.
    fn run_shell(&self, command: &str) -> Option<String>;

    /// Whether the device advertises `capability`. `false` if unqueryable.
    fn has_capability(&self, capability: Capability) -> bool;

    /// Number of registered sensors.
    fn sensor_count(&self) -> u32;

    /// Number of installed non-system packages.
    fn user_app_count(&self) -> u32 {
        count_user_packages(self.run_shell(USER_PACKAGES_COMMAND).as_deref())
    }

    /// Whether this probe can run shell commands at all.
    fn supports_shell(&self) -> bool {
        true
    }

    /// Check that the probe is usable as an execution context.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Count `package:` entries in a package listing.
pub fn count_user_packages(listing: Option<&str>) -> u32 {
    listing
        .map(|text| {
            text.lines()
                .filter(|line| line.trim_start().starts_with("package:"))
                .count() as u32
        })
        .unwrap_or(0)
}
