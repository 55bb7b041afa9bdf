//! StaticProbe: replays a recorded device snapshot.
//!
//! A snapshot is plain data: property values, canned command output, the set
//! of present capabilities and the sensor count. It round-trips through JSON
//! so a device can be captured once and evaluated anywhere.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DeviceProbe, USER_PACKAGES_COMMAND, count_user_packages};
use crate::error::Result;
use crate::signal::Capability;

/// In-memory probe with fixed answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticProbe {
    properties: BTreeMap<String, String>,
    commands: BTreeMap<String, String>,
    capabilities: BTreeSet<Capability>,
    sensor_count: u32,
    /// Overrides counting the package listing when set.
    user_app_count: Option<u32>,
    shell_supported: bool,
}

impl Default for StaticProbe {
    fn default() -> Self {
        Self {
            properties: BTreeMap::new(),
            commands: BTreeMap::new(),
            capabilities: BTreeSet::new(),
            sensor_count: 0,
            user_app_count: None,
            shell_supported: true,
        }
    }
}

impl StaticProbe {
    /// An empty snapshot: every read is unavailable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_command_output(
        mut self,
        command: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.commands.insert(command.into(), output.into());
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn with_all_capabilities(mut self) -> Self {
        self.capabilities.extend(Capability::ALL);
        self
    }

    pub fn with_sensor_count(mut self, count: u32) -> Self {
        self.sensor_count = count;
        self
    }

    pub fn with_user_app_count(mut self, count: u32) -> Self {
        self.user_app_count = Some(count);
        self
    }

    pub fn without_shell(mut self) -> Self {
        self.shell_supported = false;
        self
    }
}

impl DeviceProbe for StaticProbe {
    fn read_property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn run_shell(&self, command: &str) -> Option<String> {
        if !self.shell_supported {
            return None;
        }
        self.commands
            .get(command)
            .filter(|out| !out.trim().is_empty())
            .cloned()
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn sensor_count(&self) -> u32 {
        self.sensor_count
    }

    fn user_app_count(&self) -> u32 {
        match self.user_app_count {
            Some(count) => count,
            None => count_user_packages(self.run_shell(USER_PACKAGES_COMMAND).as_deref()),
        }
    }

    fn supports_shell(&self) -> bool {
        self.shell_supported
    }
}
