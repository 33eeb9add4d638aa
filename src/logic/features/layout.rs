//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema of both models**
//!
//! The order below is the order the scalers and classifiers were trained on.
//! Nothing at inference time can detect a silent reorder, so metadata
//! artifacts may embed `feature_names` / `layout_hash` and the loader checks
//! them against these layouts.
//!
//! ## Rules (NEVER break these):
//! 1. Add, remove or reorder a feature → increment FEATURE_VERSION
//! 2. Retrain and re-export the scaler + classifier together

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::logic::model::Domain;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Both models take 8 features
pub const FEATURE_COUNT: usize = 8;

// ============================================================================
// FEATURE LAYOUTS (Authoritative source)
// ============================================================================

pub const ATTENDANCE_LAYOUT: [&str; FEATURE_COUNT] = [
    "scheduled_time", // 0: minutes since midnight
    "arrival_time",   // 1: minutes since midnight
    "day_of_week",    // 2: 0 = Monday .. 6 = Sunday
    "is_monday",      // 3
    "is_friday",      // 4
    "weather_0",      // 5: weather one-hot
    "weather_1",      // 6
    "weather_2",      // 7
];

pub const STOCK_LAYOUT: [&str; FEATURE_COUNT] = [
    "stok_awal",      // 0: opening stock
    "masuk",          // 1: inbound
    "keluar",         // 2: outbound
    "stock_movement", // 3: inbound - outbound
    "keluar_ma3",     // 4: outbound moving average (3 periods)
    "masuk_ma3",      // 5: inbound moving average (3 periods)
    "depletion_rate", // 6: outbound / opening stock
    "bulan",          // 7: month 1-12
];

/// Layout for a domain
pub fn layout_for(domain: Domain) -> &'static [&'static str; FEATURE_COUNT] {
    match domain {
        Domain::Attendance => &ATTENDANCE_LAYOUT,
        Domain::Stock => &STOCK_LAYOUT,
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of version + ordered feature names
pub fn layout_hash(domain: Domain) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in layout_for(domain) {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Layout information for logging / shells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub domain: Domain,
    pub version: u8,
    pub hash: u32,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current(domain: Domain) -> Self {
        Self {
            domain,
            version: FEATURE_VERSION,
            hash: layout_hash(domain),
            feature_names: layout_for(domain).iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Compare a training-time feature list with the encoder layout.
///
/// Returns a human readable reason on mismatch.
pub fn check_feature_names(domain: Domain, names: &[String]) -> Result<(), String> {
    let expected = layout_for(domain);

    if names.len() != expected.len() {
        return Err(format!(
            "metadata lists {} features, encoder produces {}",
            names.len(),
            expected.len()
        ));
    }

    for (index, (actual, wanted)) in names.iter().zip(expected.iter()).enumerate() {
        if actual != wanted {
            return Err(format!(
                "feature {} is {:?} in metadata but {:?} in encoder",
                index, actual, wanted
            ));
        }
    }

    Ok(())
}

/// Compare a recorded layout hash with the encoder layout
pub fn check_layout_hash(domain: Domain, hash: u32) -> Result<(), String> {
    let current = layout_hash(domain);
    if hash != current {
        return Err(format!(
            "layout hash {:08x} does not match encoder v{} ({:08x})",
            hash, FEATURE_VERSION, current
        ));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
