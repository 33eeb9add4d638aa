use super::*;
use crate::logic::decision::{self, DaysUntilDepletion, StockStatus};
use crate::logic::model::testing::{attendance_bundle, attendance_metadata, stock_bundle};

fn stock(opening: u32, inbound: u32, outbound: u32, month: u8) -> StockObservation {
    StockObservation {
        item_name: "Ayam Broiler".to_string(),
        opening_stock: opening,
        inbound,
        outbound,
        unit: "ekor".to_string(),
        month,
        recent_periods: Vec::new(),
    }
}

// ============================================================================
// ATTENDANCE ENCODING
// ============================================================================

#[test]
fn test_attendance_vector_order() {
    let metadata = attendance_metadata();
    let obs = AttendanceObservation::new("Friday", "08:30", "Clouds").with_arrival("08:45");

    let encoded = encode_attendance(&obs, &metadata);
    assert_eq!(
        encoded.features,
        [510.0, 525.0, 4.0, 0.0, 1.0, 0.0, 1.0, 0.0]
    );
    assert!(encoded.arrival_observed);
    assert_eq!(encoded.delta_minutes(), 15);
}

#[test]
fn test_monday_flag() {
    let metadata = attendance_metadata();
    let obs = AttendanceObservation::new("Monday", "09:00", "Rain");

    let encoded = encode_attendance(&obs, &metadata);
    assert_eq!(encoded.features[2], 0.0);
    assert_eq!(encoded.features[3], 1.0);
    assert_eq!(encoded.features[4], 0.0);
}

#[test]
fn test_unknown_labels_use_defaults() {
    let metadata = attendance_metadata();
    let obs = AttendanceObservation::new("Funday", "09:00", "Snow").with_arrival("09:00");

    let encoded = encode_attendance(&obs, &metadata);
    assert_eq!(encoded.weekday_index, 0);
    assert_eq!(&encoded.features[5..], &[1.0, 0.0, 0.0]);
}

#[test]
fn test_missing_arrival_defaults_to_schedule() {
    let metadata = attendance_metadata();
    let obs = AttendanceObservation::new("Tuesday", "07:15", "Clear");

    let encoded = encode_attendance(&obs, &metadata);
    assert_eq!(encoded.arrival_minutes, 435);
    assert!(!encoded.arrival_observed);
    assert_eq!(encoded.delta_minutes(), 0);
}

#[test]
fn test_malformed_times() {
    let metadata = attendance_metadata();

    let obs = AttendanceObservation::new("Tuesday", "09:00", "Clear").with_arrival("late");
    let encoded = encode_attendance(&obs, &metadata);
    assert_eq!(encoded.arrival_minutes, 540);
    assert!(!encoded.arrival_observed);

    let obs = AttendanceObservation::new("Tuesday", "nine", "Clear").with_arrival("00:10");
    let encoded = encode_attendance(&obs, &metadata);
    assert_eq!(encoded.scheduled_minutes, 0);
    assert_eq!(encoded.delta_minutes(), 10);
}

// ============================================================================
// ATTENDANCE PIPELINE
// ============================================================================

#[test]
fn test_late_in_rain() {
    let bundle = attendance_bundle(0.82);
    let obs = AttendanceObservation::new("Monday", "09:00", "Rain").with_arrival("09:10");

    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.delta_minutes, 10);
    assert_eq!(prediction.tolerance_minutes, 5);
    assert!(prediction.is_late);
    assert_eq!(prediction.probability, 0.82);
    assert_eq!(prediction.scheduled_time_str, "09:00");
    assert_eq!(prediction.arrival_time_str, "09:10");
}

#[test]
fn test_within_rain_tolerance() {
    let bundle = attendance_bundle(0.9);
    let obs = AttendanceObservation::new("Wednesday", "09:00", "Thunderstorm").with_arrival("09:05");

    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert!(!prediction.is_late);
}

#[test]
fn test_probability_never_overrides_verdict() {
    let bundle = attendance_bundle(0.01);
    let obs = AttendanceObservation::new("Thursday", "08:00", "Clear").with_arrival("08:02");

    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.tolerance_minutes, 1);
    assert!(prediction.is_late);
}

#[test]
fn test_unknown_weather_tolerance() {
    let bundle = attendance_bundle(0.5);
    let obs = AttendanceObservation::new("Friday", "08:00", "Fog").with_arrival("08:01");

    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.tolerance_minutes, 1);
    assert!(!prediction.is_late);
    assert_eq!(prediction.weather, "Fog");
}

#[test]
fn test_malformed_arrival_is_echoed() {
    let bundle = attendance_bundle(0.5);
    let obs = AttendanceObservation::new("Friday", "8:05", "Clear").with_arrival("soon");

    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.scheduled_time_str, "8:05");
    assert_eq!(prediction.arrival_time_str, "soon");
    assert_eq!(prediction.delta_minutes, 0);
    assert!(!prediction.is_late);
}

#[test]
fn test_missing_or_empty_arrival_is_formatted() {
    let bundle = attendance_bundle(0.5);

    let obs = AttendanceObservation::new("Friday", "8:05", "Clear");
    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.arrival_time_str, "08:05");

    let obs = AttendanceObservation::new("Friday", "8:05", "Clear").with_arrival("");
    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.arrival_time_str, "08:05");
}

#[test]
fn test_extreme_clock_values_do_not_overflow() {
    let bundle = attendance_bundle(0.5);

    let obs = AttendanceObservation::new("Monday", "-35791394:00", "Clear").with_arrival("35791394:00");
    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.delta_minutes, 4_294_967_280);
    assert!(prediction.is_late);

    let obs = AttendanceObservation::new("Monday", "35791394:00", "Clear").with_arrival("-35791394:00");
    let prediction = decision::predict_attendance(&bundle, &obs).unwrap();
    assert_eq!(prediction.delta_minutes, -4_294_967_280);
    assert!(!prediction.is_late);
}

// ============================================================================
// STOCK ENCODING
// ============================================================================

#[test]
fn test_stock_vector_order() {
    let obs = stock(100, 50, 5, 6);
    let encoded = encode_stock(&obs, &StockEncoding::default());

    assert_eq!(
        encoded.features,
        [100.0, 50.0, 5.0, 45.0, 5.0, 50.0, 0.05, 6.0]
    );
    assert_eq!(encoded.movement, 45);
}

#[test]
fn test_empty_stock_depletion_rate() {
    let encoded = encode_stock(&stock(0, 50, 30, 6), &StockEncoding::default());
    assert_eq!(encoded.depletion_rate, 1.0);
    assert_eq!(encoded.features[6], 1.0);
    assert_eq!(encoded.features[3], 20.0);
}

#[test]
fn test_negative_movement() {
    let obs = stock(10, 0, 40, 1);
    assert_eq!(obs.movement(), -40);
    assert_eq!(obs.closing_stock(), -30);
    assert_eq!(encode_stock(&obs, &StockEncoding::default()).features[3], -40.0);
}

#[test]
fn test_moving_average_mode() {
    let mut obs = stock(100, 30, 12, 3);
    obs.recent_periods = vec![
        PeriodMovement { inbound: 90, outbound: 90 },
        PeriodMovement { inbound: 0, outbound: 3 },
        PeriodMovement { inbound: 30, outbound: 6 },
    ];
    let averaged = StockEncoding {
        use_single_period_proxy: false,
    };

    // Oldest period falls outside the window
    let encoded = encode_stock(&obs, &averaged);
    assert_eq!(encoded.features[4], 7.0);
    assert_eq!(encoded.features[5], 20.0);

    obs.recent_periods.clear();
    let encoded = encode_stock(&obs, &averaged);
    assert_eq!(encoded.features[4], 12.0);
    assert_eq!(encoded.features[5], 30.0);
}

#[test]
fn test_out_of_range_month_encoded_as_given() {
    let encoded = encode_stock(&stock(10, 0, 1, 13), &StockEncoding::default());
    assert_eq!(encoded.features[7], 13.0);
}

// ============================================================================
// STOCK PIPELINE
// ============================================================================

#[test]
fn test_empty_stock_is_at_risk() {
    let bundle = stock_bundle(0.1);
    let prediction =
        decision::predict_stock(&bundle, &stock(0, 50, 30, 6), &StockEncoding::default()).unwrap();

    assert_eq!(prediction.status, StockStatus::AtRisk);
    assert_eq!(prediction.depletion_rate, 1.0);
    assert_eq!(prediction.days_until_depletion, DaysUntilDepletion::Days(1));
    assert_eq!(prediction.available_stock, 0);
}

#[test]
fn test_long_supply_is_safe() {
    let bundle = stock_bundle(0.3);
    let prediction =
        decision::predict_stock(&bundle, &stock(100, 50, 5, 6), &StockEncoding::default()).unwrap();

    assert_eq!(prediction.days_until_depletion, DaysUntilDepletion::Days(20));
    assert_eq!(prediction.depletion_estimate, "20 days");
    assert_eq!(prediction.status, StockStatus::Safe);
    assert_eq!(prediction.unit, "Ekor");
    assert_eq!(prediction.closing_stock, 145);
}

#[test]
fn test_short_supply_is_stable() {
    let bundle = stock_bundle(0.2);
    let prediction =
        decision::predict_stock(&bundle, &stock(100, 0, 30, 6), &StockEncoding::default()).unwrap();

    assert_eq!(prediction.days_until_depletion, DaysUntilDepletion::Days(4));
    assert_eq!(prediction.status, StockStatus::Stable);
}

#[test]
fn test_high_probability_is_at_risk() {
    let bundle = stock_bundle(0.95);
    let prediction =
        decision::predict_stock(&bundle, &stock(500, 0, 1, 6), &StockEncoding::default()).unwrap();

    assert_eq!(prediction.status, StockStatus::AtRisk);
}

#[test]
fn test_no_outbound_is_unbounded() {
    let bundle = stock_bundle(0.2);
    let mut obs = stock(40, 10, 0, 6);
    obs.unit = "  sachet ".to_string();

    let prediction = decision::predict_stock(&bundle, &obs, &StockEncoding::default()).unwrap();
    assert_eq!(prediction.days_until_depletion, DaysUntilDepletion::Unbounded);
    assert_eq!(prediction.depletion_estimate, "stable");
    assert_eq!(prediction.status, StockStatus::Safe);
    assert_eq!(prediction.unit, "Sachet");
}
