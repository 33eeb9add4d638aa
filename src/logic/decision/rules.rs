//! Decision Rules & Thresholds
//!
//! Constants and configurable thresholds for both decision engines.
//! No decision logic here - only values.

use serde::{Deserialize, Serialize};

// ============================================================================
// ATTENDANCE DEFAULTS (unknown categories)
// ============================================================================

/// Weekday index used when the name is not in `day_map` (Monday)
pub const DEFAULT_DAY_INDEX: u8 = 0;

/// Weather vector used when the label is not in `weather_map` (Clear)
pub const DEFAULT_WEATHER_VECTOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Tolerance used when the label is not in `tolerances`
pub const DEFAULT_TOLERANCE_MINUTES: i32 = 1;

/// Weekday indices flagged as their own features
pub const MONDAY_INDEX: u8 = 0;
pub const FRIDAY_INDEX: u8 = 4;

// ============================================================================
// STOCK DEFAULTS
// ============================================================================

/// Above this probability = AtRisk
pub const AT_RISK_PROBABILITY: f32 = 0.7;

/// Above this probability = Stable
pub const STABLE_PROBABILITY: f32 = 0.4;

/// Fewer days of supply than this = Stable
pub const STABLE_DAYS_OF_SUPPLY: u32 = 14;

/// Depletion rate reported when there is no opening stock
pub const EMPTY_STOCK_DEPLETION_RATE: f32 = 1.0;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Stock status thresholds (overridable from stock metadata)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockThresholds {
    pub at_risk_probability: f32,
    pub stable_probability: f32,
    pub stable_days_of_supply: u32,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            at_risk_probability: AT_RISK_PROBABILITY,
            stable_probability: STABLE_PROBABILITY,
            stable_days_of_supply: STABLE_DAYS_OF_SUPPLY,
        }
    }
}

impl StockThresholds {
    pub fn validate(&self) -> Result<(), String> {
        let in_unit = |p: f32| (0.0..=1.0).contains(&p);

        if !in_unit(self.at_risk_probability) || !in_unit(self.stable_probability) {
            return Err("probability thresholds must be within [0, 1]".to_string());
        }
        if self.stable_probability > self.at_risk_probability {
            return Err(format!(
                "stable_probability ({}) exceeds at_risk_probability ({})",
                self.stable_probability, self.at_risk_probability
            ));
        }
        Ok(())
    }
}
