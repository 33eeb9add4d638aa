//! Stock Decision Engine
//!
//! Status precedence (first match wins):
//! 1. no opening stock, or probability above the at-risk threshold → AtRisk
//! 2. probability above the stable threshold, or a finite supply shorter
//!    than `stable_days_of_supply` → Stable
//! 3. otherwise → Safe

use serde::{Deserialize, Serialize, Serializer};

use super::rules::StockThresholds;
use crate::logic::error::InferenceError;
use crate::logic::features::{encode_stock, StockEncoding, StockObservation};
use crate::logic::model::StockBundle;

// ============================================================================
// TYPES
// ============================================================================

/// Stock status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    Safe,
    Stable,
    AtRisk,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Safe => "Safe",
            StockStatus::Stable => "Stable",
            StockStatus::AtRisk => "AtRisk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StockStatus::Safe => "#10b981",   // Green
            StockStatus::Stable => "#f59e0b", // Orange
            StockStatus::AtRisk => "#ef4444", // Red
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Days of supply left at the current outbound rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysUntilDepletion {
    Days(u32),
    /// Nothing goes out, the stock never runs down
    Unbounded,
}

impl DaysUntilDepletion {
    /// `ceil(opening / outbound)`, at least 1; unbounded when outbound is 0
    pub fn estimate(opening_stock: u32, outbound: u32) -> Self {
        if outbound == 0 {
            return DaysUntilDepletion::Unbounded;
        }
        DaysUntilDepletion::Days(opening_stock.div_ceil(outbound).max(1))
    }

    pub fn days(&self) -> Option<u32> {
        match self {
            DaysUntilDepletion::Days(n) => Some(*n),
            DaysUntilDepletion::Unbounded => None,
        }
    }
}

impl std::fmt::Display for DaysUntilDepletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaysUntilDepletion::Days(n) => write!(f, "{} days", n),
            DaysUntilDepletion::Unbounded => write!(f, "stable"),
        }
    }
}

/// A day count, or the string `"unbounded"`
impl Serialize for DaysUntilDepletion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaysUntilDepletion::Days(n) => serializer.serialize_u32(*n),
            DaysUntilDepletion::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// Stock result handed to the shell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrediction {
    pub item_name: String,
    pub available_stock: u32,
    /// Trimmed, capitalized
    pub unit: String,
    pub days_until_depletion: DaysUntilDepletion,
    /// Display form of `days_until_depletion`
    pub depletion_estimate: String,
    pub probability: f32,
    pub status: StockStatus,
    pub movement: i64,
    pub closing_stock: i64,
    pub depletion_rate: f32,
}

// ============================================================================
// RULES
// ============================================================================

pub fn classify_stock(
    opening_stock: u32,
    probability: f32,
    days: DaysUntilDepletion,
    thresholds: &StockThresholds,
) -> StockStatus {
    if opening_stock == 0 || probability > thresholds.at_risk_probability {
        return StockStatus::AtRisk;
    }

    let short_supply = days
        .days()
        .is_some_and(|n| n < thresholds.stable_days_of_supply);

    if probability > thresholds.stable_probability || short_supply {
        StockStatus::Stable
    } else {
        StockStatus::Safe
    }
}

/// `"  ekor "` → `"Ekor"`
pub fn normalize_unit(unit: &str) -> String {
    let mut chars = unit.trim().chars();
    match chars.next() {
        Some(first) => {
            let mut normalized: String = first.to_uppercase().collect();
            normalized.push_str(&chars.as_str().to_lowercase());
            normalized
        }
        None => String::new(),
    }
}

/// Apply the stock rules to an observation and its probability
pub fn decide_stock(
    observation: &StockObservation,
    probability: f32,
    thresholds: &StockThresholds,
) -> StockPrediction {
    let days = DaysUntilDepletion::estimate(observation.opening_stock, observation.outbound);
    let status = classify_stock(observation.opening_stock, probability, days, thresholds);

    StockPrediction {
        item_name: observation.item_name.clone(),
        available_stock: observation.opening_stock,
        unit: normalize_unit(&observation.unit),
        days_until_depletion: days,
        depletion_estimate: days.to_string(),
        probability,
        status,
        movement: observation.movement(),
        closing_stock: observation.closing_stock(),
        depletion_rate: observation.depletion_rate(),
    }
}

/// Encode → score → decide
pub fn predict_stock(
    bundle: &StockBundle,
    observation: &StockObservation,
    encoding: &StockEncoding,
) -> Result<StockPrediction, InferenceError> {
    let encoded = encode_stock(observation, encoding);
    let probability = bundle.score(&encoded.features)?;

    let prediction = decide_stock(observation, probability, &bundle.metadata.thresholds);

    log::debug!(
        "stock {:?}: days={} status={} p={:.3}",
        prediction.item_name,
        prediction.days_until_depletion,
        prediction.status,
        prediction.probability
    );

    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_estimate() {
        assert_eq!(DaysUntilDepletion::estimate(100, 5), DaysUntilDepletion::Days(20));
        assert_eq!(DaysUntilDepletion::estimate(100, 30), DaysUntilDepletion::Days(4));
        assert_eq!(DaysUntilDepletion::estimate(0, 30), DaysUntilDepletion::Days(1));
        assert_eq!(DaysUntilDepletion::estimate(100, 0), DaysUntilDepletion::Unbounded);
        assert_eq!(DaysUntilDepletion::estimate(0, 0), DaysUntilDepletion::Unbounded);
    }

    #[test]
    fn test_empty_stock_is_always_at_risk() {
        let t = StockThresholds::default();
        for p in [0.0, 0.3, 0.5, 0.9] {
            assert_eq!(
                classify_stock(0, p, DaysUntilDepletion::Unbounded, &t),
                StockStatus::AtRisk
            );
        }
    }

    #[test]
    fn test_status_precedence() {
        let t = StockThresholds::default();
        let long = DaysUntilDepletion::Days(20);
        let short = DaysUntilDepletion::Days(13);

        assert_eq!(classify_stock(100, 0.71, long, &t), StockStatus::AtRisk);
        assert_eq!(classify_stock(100, 0.7, long, &t), StockStatus::Stable);
        assert_eq!(classify_stock(100, 0.41, long, &t), StockStatus::Stable);
        assert_eq!(classify_stock(100, 0.4, long, &t), StockStatus::Safe);
        assert_eq!(classify_stock(100, 0.1, short, &t), StockStatus::Stable);
        assert_eq!(classify_stock(100, 0.1, DaysUntilDepletion::Days(14), &t), StockStatus::Safe);
        assert_eq!(classify_stock(100, 0.1, DaysUntilDepletion::Unbounded, &t), StockStatus::Safe);
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit("  ekor "), "Ekor");
        assert_eq!(normalize_unit("KG"), "Kg");
        assert_eq!(normalize_unit("sachet"), "Sachet");
        assert_eq!(normalize_unit("   "), "");
    }

    #[test]
    fn test_days_serialization() {
        assert_eq!(serde_json::to_string(&DaysUntilDepletion::Days(20)).unwrap(), "20");
        assert_eq!(
            serde_json::to_string(&DaysUntilDepletion::Unbounded).unwrap(),
            "\"unbounded\""
        );
        assert_eq!(DaysUntilDepletion::Days(20).to_string(), "20 days");
        assert_eq!(DaysUntilDepletion::Unbounded.to_string(), "stable");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StockStatus::AtRisk.to_string(), "AtRisk");
        assert_eq!(StockStatus::Safe.color(), "#10b981");
    }
}
