//! Flowly Predict - attendance lateness and stock depletion predictions.
//!
//! ```no_run
//! use flowly_predict::{AttendanceObservation, Predictor, PredictorConfig};
//!
//! let predictor = Predictor::new(PredictorConfig::from_env());
//! let observation = AttendanceObservation::new("Monday", "09:00", "Rain").with_arrival("09:10");
//! match predictor.predict_attendance(&observation) {
//!     Ok(prediction) => println!("{} ({:.1}%)", prediction.status_label(), prediction.probability * 100.0),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod api;
pub mod constants;
pub mod logic;

pub use api::{AttendanceOptions, Predictor, WeatherOption};
pub use logic::config::PredictorConfig;
pub use logic::decision::{AttendancePrediction, DaysUntilDepletion, StockPrediction, StockStatus};
pub use logic::error::{InferenceError, LoadError, PredictError, ValidationError};
pub use logic::features::{AttendanceObservation, PeriodMovement, StockEncoding, StockObservation};
pub use logic::model::Domain;
