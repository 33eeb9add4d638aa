//! Decision Module - Business Rules over Model Scores
//!
//! - `rules` - thresholds, tolerances and category defaults
//! - `attendance` - tolerance rule, late / on time
//! - `stock` - Safe / Stable / AtRisk precedence

pub mod attendance;
pub mod rules;
pub mod stock;

pub use attendance::{predict_attendance, AttendancePrediction};
pub use rules::StockThresholds;
pub use stock::{predict_stock, DaysUntilDepletion, StockPrediction, StockStatus};
