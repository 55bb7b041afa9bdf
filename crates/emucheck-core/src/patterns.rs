//! Emulator marker tables.
//!
//! One table per property-backed category. Tables are process-wide constants
//! and are matched against the lower-cased property value.

use crate::signal::SignalCategory;

/// How a table's markers are compared with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMatch {
    /// The whole value must equal a marker.
    Exact,
    /// The value must contain a marker.
    Contains,
}

/// Known emulator fingerprints for one category.
#[derive(Debug)]
pub struct MarkerTable {
    pub category: SignalCategory,
    pub kind: MarkerMatch,
    /// Lower-case markers.
    pub markers: &'static [&'static str],
}

impl MarkerTable {
    /// Return the first marker matching `lowered`, if any.
    ///
    /// `lowered` must already be lower-case.
    pub fn find(&self, lowered: &str) -> Option<&'static str> {
        self.markers.iter().copied().find(|m| match self.kind {
            MarkerMatch::Exact => lowered == *m,
            MarkerMatch::Contains => lowered.contains(m),
        })
    }
}

// Tiantian (ttvm), Nox, MuMu (cancro), Xiaoyao (intel), VirtualBox based
// players (vbox, vbox86), LDPlayer (android_x86).
pub static HARDWARE_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Hardware,
    kind: MarkerMatch::Exact,
    markers: &[
        "ttvm",
        "nox",
        "cancro",
        "intel",
        "vbox",
        "vbox86",
        "android_x86",
    ],
};

pub static FLAVOR_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Flavor,
    kind: MarkerMatch::Contains,
    markers: &["vbox", "sdk_gphone"],
};

pub static MODEL_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Model,
    kind: MarkerMatch::Contains,
    markers: &["google_sdk", "emulator", "android sdk built for x86"],
};

// netease: MuMu player.
pub static MANUFACTURER_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Manufacturer,
    kind: MarkerMatch::Contains,
    markers: &["genymotion", "netease"],
};

pub static BOARD_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Board,
    kind: MarkerMatch::Contains,
    markers: &["android", "goldfish"],
};

pub static PLATFORM_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Platform,
    kind: MarkerMatch::Contains,
    markers: &["android"],
};

// Virtual radios report this placeholder version.
pub static BASEBAND_MARKERS: MarkerTable = MarkerTable {
    category: SignalCategory::Baseband,
    kind: MarkerMatch::Contains,
    markers: &["1.0.0.0"],
};

/// Marker table for a property-backed category.
pub fn table_for(category: SignalCategory) -> Option<&'static MarkerTable> {
    match category {
        SignalCategory::Hardware => Some(&HARDWARE_MARKERS),
        SignalCategory::Flavor => Some(&FLAVOR_MARKERS),
        SignalCategory::Model => Some(&MODEL_MARKERS),
        SignalCategory::Manufacturer => Some(&MANUFACTURER_MARKERS),
        SignalCategory::Board => Some(&BOARD_MARKERS),
        SignalCategory::Platform => Some(&PLATFORM_MARKERS),
        SignalCategory::Baseband => Some(&BASEBAND_MARKERS),
        _ => None,
    }
}
