//! Signal categories and their static metadata.
//!
//! Every observable the engine looks at is a [`SignalCategory`]. Each one
//! carries a [`SignalInfo`] describing where the raw value comes from and how
//! far it can be trusted.

use serde::{Deserialize, Serialize};

/// One observable characteristic of the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Hardware name (`ro.hardware`).
    Hardware,
    /// Build flavor (`ro.build.flavor`).
    Flavor,
    /// Device model (`ro.product.model`).
    Model,
    /// Manufacturer (`ro.product.manufacturer`).
    Manufacturer,
    /// Board name (`ro.product.board`).
    Board,
    /// Board platform (`ro.board.platform`).
    Platform,
    /// Baseband version (`gsm.version.baseband`).
    Baseband,
    /// Number of registered sensors.
    SensorCount,
    /// Number of installed third-party packages.
    UserApps,
    /// Camera flash support.
    CameraFlash,
    /// Camera support.
    Camera,
    /// Bluetooth support.
    Bluetooth,
    /// Presence of an ambient light sensor.
    LightSensor,
    /// Control-group membership of the current process.
    Cgroup,
}

impl SignalCategory {
    /// Property-backed categories, in evaluation order.
    pub const PROPERTIES: [SignalCategory; 7] = [
        Self::Hardware,
        Self::Flavor,
        Self::Model,
        Self::Manufacturer,
        Self::Board,
        Self::Platform,
        Self::Baseband,
    ];

    /// Every category, in evaluation order.
    pub const ALL: [SignalCategory; 14] = [
        Self::Hardware,
        Self::Flavor,
        Self::Model,
        Self::Manufacturer,
        Self::Board,
        Self::Platform,
        Self::Baseband,
        Self::SensorCount,
        Self::UserApps,
        Self::CameraFlash,
        Self::Camera,
        Self::Bluetooth,
        Self::LightSensor,
        Self::Cgroup,
    ];

    /// Static metadata for this category.
    pub fn info(self) -> &'static SignalInfo {
        match self {
            Self::Hardware => &HARDWARE_INFO,
            Self::Flavor => &FLAVOR_INFO,
            Self::Model => &MODEL_INFO,
            Self::Manufacturer => &MANUFACTURER_INFO,
            Self::Board => &BOARD_INFO,
            Self::Platform => &PLATFORM_INFO,
            Self::Baseband => &BASEBAND_INFO,
            Self::SensorCount => &SENSOR_COUNT_INFO,
            Self::UserApps => &USER_APPS_INFO,
            Self::CameraFlash => &CAMERA_FLASH_INFO,
            Self::Camera => &CAMERA_INFO,
            Self::Bluetooth => &BLUETOOTH_INFO,
            Self::LightSensor => &LIGHT_SENSOR_INFO,
            Self::Cgroup => &CGROUP_INFO,
        }
    }

    /// Stable identifier (e.g. `"hardware"`).
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Property key for property-backed categories.
    pub fn property_key(self) -> Option<&'static str> {
        match self.info().origin {
            SignalOrigin::Property(key) => Some(key),
            _ => None,
        }
    }

    /// The capability queried by capability-backed categories.
    pub fn capability(self) -> Option<Capability> {
        match self.info().origin {
            SignalOrigin::Capability(c) => Some(c),
            _ => None,
        }
    }

    /// Look a category up by its identifier, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == wanted)
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hardware capability that can be queried through the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// A camera is present.
    Camera,
    /// The camera has a flash unit.
    CameraFlash,
    /// Bluetooth radio is present.
    Bluetooth,
    /// An ambient light sensor is registered.
    LightSensor,
}

impl Capability {
    /// Capabilities in evaluation order.
    pub const ALL: [Capability; 4] = [
        Self::CameraFlash,
        Self::Camera,
        Self::Bluetooth,
        Self::LightSensor,
    ];

    /// The signal category that scores this capability.
    pub fn category(self) -> SignalCategory {
        match self {
            Self::Camera => SignalCategory::Camera,
            Self::CameraFlash => SignalCategory::CameraFlash,
            Self::Bluetooth => SignalCategory::Bluetooth,
            Self::LightSensor => SignalCategory::LightSensor,
        }
    }

    /// Package-manager system feature advertising this capability, if any.
    ///
    /// The light sensor has no feature flag; it is detected from the sensor
    /// list instead.
    pub fn system_feature(self) -> Option<&'static str> {
        match self {
            Self::Camera => Some("android.hardware.camera"),
            Self::CameraFlash => Some("android.hardware.camera.flash"),
            Self::Bluetooth => Some("android.hardware.bluetooth"),
            Self::LightSensor => None,
        }
    }

    /// How far a negative answer for this capability can be trusted.
    pub fn reliability(self) -> Reliability {
        self.category().info().reliability
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.category().name())
    }
}

/// Confidence annotation carried by a signal.
///
/// Low-confidence signals still contribute to the score; the annotation only
/// affects how the evidence is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    /// Signal behaves consistently across real devices.
    Normal,
    /// Deprecated heuristic: plenty of real devices lack this feature too.
    Low,
}

impl std::fmt::Display for Reliability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Where the raw value of a signal is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOrigin {
    /// A named platform property.
    Property(&'static str),
    /// Output of a shell command.
    Shell(&'static str),
    /// A hardware capability query.
    Capability(Capability),
    /// Sensor enumeration.
    SensorList,
    /// Installed package enumeration.
    PackageList,
}

impl std::fmt::Display for SignalOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property(key) => write!(f, "property {key}"),
            Self::Shell(cmd) => write!(f, "shell `{cmd}`"),
            Self::Capability(c) => match c.system_feature() {
                Some(feature) => write!(f, "feature {feature}"),
                None => write!(f, "sensor list"),
            },
            Self::SensorList => write!(f, "sensor list"),
            Self::PackageList => write!(f, "shell `{}`", crate::probe::USER_PACKAGES_COMMAND),
        }
    }
}

/// Metadata about a signal category.
#[derive(Debug, Clone)]
pub struct SignalInfo {
    /// Unique identifier (e.g. `"baseband"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Where the raw value comes from.
    pub origin: SignalOrigin,
    /// Confidence annotation.
    pub reliability: Reliability,
}

static HARDWARE_INFO: SignalInfo = SignalInfo {
    name: "hardware",
    description: "Hardware name; several emulator products ship a fixed token",
    origin: SignalOrigin::Property("ro.hardware"),
    reliability: Reliability::Normal,
};

static FLAVOR_INFO: SignalInfo = SignalInfo {
    name: "flavor",
    description: "Build flavor; generic SDK and VirtualBox builds are recognizable",
    origin: SignalOrigin::Property("ro.build.flavor"),
    reliability: Reliability::Normal,
};

static MODEL_INFO: SignalInfo = SignalInfo {
    name: "model",
    description: "Device model; SDK images advertise virtual-device model names",
    origin: SignalOrigin::Property("ro.product.model"),
    reliability: Reliability::Normal,
};

static MANUFACTURER_INFO: SignalInfo = SignalInfo {
    name: "manufacturer",
    description: "Manufacturer; emulation vendors put their own name here",
    origin: SignalOrigin::Property("ro.product.manufacturer"),
    reliability: Reliability::Normal,
};

static BOARD_INFO: SignalInfo = SignalInfo {
    name: "board",
    description: "Board name; goldfish and generic boards only exist in emulators",
    origin: SignalOrigin::Property("ro.product.board"),
    reliability: Reliability::Normal,
};

static PLATFORM_INFO: SignalInfo = SignalInfo {
    name: "platform",
    description: "Board platform; generic platform names indicate an SDK image",
    origin: SignalOrigin::Property("ro.board.platform"),
    reliability: Reliability::Normal,
};

static BASEBAND_INFO: SignalInfo = SignalInfo {
    name: "baseband",
    description: "Baseband version; virtual radios report a placeholder or nothing",
    origin: SignalOrigin::Property("gsm.version.baseband"),
    reliability: Reliability::Normal,
};

static SENSOR_COUNT_INFO: SignalInfo = SignalInfo {
    name: "sensor_count",
    description: "Number of registered sensors; emulators expose only a handful",
    origin: SignalOrigin::SensorList,
    reliability: Reliability::Normal,
};

static USER_APPS_INFO: SignalInfo = SignalInfo {
    name: "user_apps",
    description: "Number of third-party packages; fresh emulator images have few",
    origin: SignalOrigin::PackageList,
    reliability: Reliability::Normal,
};

static CAMERA_FLASH_INFO: SignalInfo = SignalInfo {
    name: "camera_flash",
    description: "Camera flash support",
    origin: SignalOrigin::Capability(Capability::CameraFlash),
    reliability: Reliability::Low,
};

static CAMERA_INFO: SignalInfo = SignalInfo {
    name: "camera",
    description: "Camera support",
    origin: SignalOrigin::Capability(Capability::Camera),
    reliability: Reliability::Normal,
};

static BLUETOOTH_INFO: SignalInfo = SignalInfo {
    name: "bluetooth",
    description: "Bluetooth support",
    origin: SignalOrigin::Capability(Capability::Bluetooth),
    reliability: Reliability::Low,
};

static LIGHT_SENSOR_INFO: SignalInfo = SignalInfo {
    name: "light_sensor",
    description: "Ambient light sensor presence",
    origin: SignalOrigin::Capability(Capability::LightSensor),
    reliability: Reliability::Low,
};

static CGROUP_INFO: SignalInfo = SignalInfo {
    name: "cgroup",
    description: "Control-group membership of this process; only readability is scored",
    origin: SignalOrigin::Shell(crate::probe::CGROUP_COMMAND),
    reliability: Reliability::Normal,
};
