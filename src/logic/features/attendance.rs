//! Attendance Feature Encoder
//!
//! Lenient by policy: unknown weekdays and weather labels fall back to the
//! defaults in `decision::rules`, a malformed arrival time means "no observed
//! arrival" (arrival = scheduled) and a malformed scheduled time is 0.

use serde::{Deserialize, Serialize};

use super::clock::parse_clock_time;
use super::Features;
use crate::logic::decision::rules::{
    DEFAULT_DAY_INDEX, DEFAULT_WEATHER_VECTOR, FRIDAY_INDEX, MONDAY_INDEX,
};
use crate::logic::model::AttendanceMetadata;

/// Raw attendance input as collected by the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceObservation {
    /// Weekday name, matched case-sensitively against `day_map`
    pub weekday: String,
    /// `HH:MM`
    pub scheduled_time: String,
    /// `HH:MM`; defaults to the scheduled time
    #[serde(default)]
    pub arrival_time: Option<String>,
    /// Weather label, matched against `weather_map` / `tolerances`
    pub weather: String,
}

impl AttendanceObservation {
    pub fn new(
        weekday: impl Into<String>,
        scheduled_time: impl Into<String>,
        weather: impl Into<String>,
    ) -> Self {
        Self {
            weekday: weekday.into(),
            scheduled_time: scheduled_time.into(),
            arrival_time: None,
            weather: weather.into(),
        }
    }

    pub fn with_arrival(mut self, arrival_time: impl Into<String>) -> Self {
        self.arrival_time = Some(arrival_time.into());
        self
    }
}

/// Encoder output plus the resolved values the decision engine needs
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAttendance {
    pub features: Features,
    pub weekday_index: u8,
    pub scheduled_minutes: i32,
    pub arrival_minutes: i32,
    /// False when the arrival time was absent or malformed
    pub arrival_observed: bool,
}

impl EncodedAttendance {
    /// Arrival minus schedule; negative for early arrival.
    ///
    /// Widened to `i64`: unchecked clock values span the whole `i32` range.
    pub fn delta_minutes(&self) -> i64 {
        i64::from(self.arrival_minutes) - i64::from(self.scheduled_minutes)
    }
}

/// Build `[scheduled, arrival, weekday, is_monday, is_friday, w0, w1, w2]`
pub fn encode_attendance(
    observation: &AttendanceObservation,
    metadata: &AttendanceMetadata,
) -> EncodedAttendance {
    let weekday_index = metadata
        .day_map
        .get(&observation.weekday)
        .copied()
        .unwrap_or(DEFAULT_DAY_INDEX);

    let scheduled_minutes = parse_clock_time(&observation.scheduled_time).unwrap_or_else(|e| {
        log::debug!("scheduled time defaults to 00:00: {}", e);
        0
    });

    let arrival = observation
        .arrival_time
        .as_deref()
        .map(parse_clock_time)
        .transpose();

    let (arrival_minutes, arrival_observed) = match arrival {
        Ok(Some(minutes)) => (minutes, true),
        Ok(None) => (scheduled_minutes, false),
        Err(e) => {
            log::debug!("arrival time replaced by scheduled time: {}", e);
            (scheduled_minutes, false)
        }
    };

    let weather = metadata
        .weather_map
        .get(&observation.weather)
        .copied()
        .unwrap_or(DEFAULT_WEATHER_VECTOR);

    let flag = |hit: bool| if hit { 1.0f32 } else { 0.0 };

    let features = [
        scheduled_minutes as f32,
        arrival_minutes as f32,
        weekday_index as f32,
        flag(weekday_index == MONDAY_INDEX),
        flag(weekday_index == FRIDAY_INDEX),
        weather[0],
        weather[1],
        weather[2],
    ];

    EncodedAttendance {
        features,
        weekday_index,
        scheduled_minutes,
        arrival_minutes,
        arrival_observed,
    }
}
