//! Features Module - Feature Encoding
//!
//! Pure functions from raw shell input to the fixed-order vectors the models
//! were trained on. Layouts live in `layout.rs`.

pub mod attendance;
pub mod clock;
pub mod layout;
pub mod stock;

#[cfg(test)]
mod tests;

pub use layout::{FEATURE_COUNT, FEATURE_VERSION};

/// One raw (pre-scaler) or scaled feature vector
pub type Features = [f32; FEATURE_COUNT];

// Re-export common types
pub use attendance::{encode_attendance, AttendanceObservation, EncodedAttendance};
pub use stock::{encode_stock, EncodedStock, PeriodMovement, StockEncoding, StockObservation};
