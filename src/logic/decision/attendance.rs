//! Attendance Decision Engine
//!
//! The verdict is a rule over the raw time difference:
//! `late = delta_minutes > tolerance(weather)`. The model probability is
//! reported alongside for display only and never changes the verdict.

use serde::{Deserialize, Serialize};

use super::rules::DEFAULT_TOLERANCE_MINUTES;
use crate::logic::error::InferenceError;
use crate::logic::features::clock::format_clock_time;
use crate::logic::features::{encode_attendance, AttendanceObservation, EncodedAttendance};
use crate::logic::model::{AttendanceBundle, AttendanceMetadata};

/// Attendance result handed to the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePrediction {
    /// Model probability in [0, 1], advisory
    pub probability: f32,
    /// Weather label the tolerance was looked up with
    pub weather: String,
    pub tolerance_minutes: i32,
    pub is_late: bool,
    pub scheduled_time_str: String,
    pub arrival_time_str: String,
    pub delta_minutes: i64,
}

impl AttendancePrediction {
    pub fn status_label(&self) -> &'static str {
        if self.is_late {
            "LATE"
        } else {
            "ON TIME"
        }
    }
}

/// Tolerance for a weather label, 1 minute when unknown
pub fn tolerance_for(metadata: &AttendanceMetadata, weather: &str) -> i32 {
    metadata
        .tolerances
        .get(weather)
        .copied()
        .unwrap_or(DEFAULT_TOLERANCE_MINUTES)
}

/// Strictly more than the tolerance; early arrival is never late
pub fn is_late(delta_minutes: i64, tolerance_minutes: i32) -> bool {
    delta_minutes > i64::from(tolerance_minutes)
}

/// Apply the tolerance rule to an encoded observation
pub fn decide_attendance(
    observation: &AttendanceObservation,
    encoded: &EncodedAttendance,
    probability: f32,
    metadata: &AttendanceMetadata,
) -> AttendancePrediction {
    let tolerance_minutes = tolerance_for(metadata, &observation.weather);
    let delta_minutes = encoded.delta_minutes();

    // Any non-empty arrival string is echoed back, even one that failed to parse
    let arrival_time_str = match observation.arrival_time.as_deref() {
        Some(raw) if !raw.is_empty() => raw.to_string(),
        _ => format_clock_time(encoded.arrival_minutes),
    };

    AttendancePrediction {
        probability,
        weather: observation.weather.clone(),
        tolerance_minutes,
        is_late: is_late(delta_minutes, tolerance_minutes),
        scheduled_time_str: observation.scheduled_time.clone(),
        arrival_time_str,
        delta_minutes,
    }
}

/// Encode → score → decide
pub fn predict_attendance(
    bundle: &AttendanceBundle,
    observation: &AttendanceObservation,
) -> Result<AttendancePrediction, InferenceError> {
    let encoded = encode_attendance(observation, &bundle.metadata);
    let probability = bundle.score(&encoded.features)?;

    let prediction = decide_attendance(observation, &encoded, probability, &bundle.metadata);

    log::debug!(
        "attendance: delta={}m tolerance={}m late={} p={:.3}",
        prediction.delta_minutes,
        prediction.tolerance_minutes,
        prediction.is_late,
        prediction.probability
    );

    Ok(prediction)
}
