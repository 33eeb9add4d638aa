//! Predictor Commands
//!
//! The surface a presentation shell calls. Inputs are the scalar fields the
//! shell collected; failures come back as [`PredictError`] so the shell can
//! show "prediction unavailable".

use serde::{Deserialize, Serialize};

use crate::logic::config::PredictorConfig;
use crate::logic::decision::attendance::tolerance_for;
use crate::logic::decision::{self, AttendancePrediction, StockPrediction};
use crate::logic::error::PredictError;
use crate::logic::features::{AttendanceObservation, StockObservation};
use crate::logic::model::{BundleCache, ClassifierLoader, DomainReadiness};

/// A weather label and its lateness tolerance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherOption {
    pub label: String,
    pub tolerance_minutes: i32,
}

/// Values the shell offers in its attendance selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceOptions {
    /// Weekday names ordered by index (Monday first)
    pub weekdays: Vec<String>,
    pub weather: Vec<WeatherOption>,
}

/// Owns the bundle cache; shareable across threads
pub struct Predictor {
    config: PredictorConfig,
    bundles: BundleCache,
}

impl Predictor {
    /// Predictor over ONNX classifiers. Nothing is loaded until first use.
    pub fn new(config: PredictorConfig) -> Self {
        let bundles = BundleCache::new(&config);
        Self { config, bundles }
    }

    pub fn with_loader(config: PredictorConfig, loader: Box<dyn ClassifierLoader>) -> Self {
        let bundles = BundleCache::with_loader(&config, loader);
        Self { config, bundles }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn bundles(&self) -> &BundleCache {
        &self.bundles
    }

    /// Load both domains eagerly
    pub fn warm_up(&self) -> Vec<DomainReadiness> {
        self.bundles.warm_up()
    }

    pub fn predict_attendance(
        &self,
        observation: &AttendanceObservation,
    ) -> Result<AttendancePrediction, PredictError> {
        let result = self
            .bundles
            .attendance()
            .map_err(PredictError::from)
            .and_then(|bundle| {
                decision::predict_attendance(&bundle, observation).map_err(PredictError::from)
            });

        if let Err(e) = &result {
            log::error!("attendance {}", e);
        }
        result
    }

    pub fn predict_stock(
        &self,
        observation: &StockObservation,
    ) -> Result<StockPrediction, PredictError> {
        let result = self
            .bundles
            .stock()
            .map_err(PredictError::from)
            .and_then(|bundle| {
                decision::predict_stock(&bundle, observation, &self.config.stock_encoding)
                    .map_err(PredictError::from)
            });

        if let Err(e) = &result {
            log::error!("stock {}", e);
        }
        result
    }

    /// Weekday names and weather labels known to the attendance metadata
    pub fn attendance_options(&self) -> Result<AttendanceOptions, PredictError> {
        let bundle = self.bundles.attendance()?;
        let metadata = &bundle.metadata;

        let mut weekdays: Vec<(&String, u8)> =
            metadata.day_map.iter().map(|(name, &index)| (name, index)).collect();
        weekdays.sort_by_key(|&(name, index)| (index, name.clone()));

        let weather = metadata
            .weather_map
            .keys()
            .map(|label| WeatherOption {
                label: label.clone(),
                tolerance_minutes: tolerance_for(metadata, label),
            })
            .collect();

        Ok(AttendanceOptions {
            weekdays: weekdays.into_iter().map(|(name, _)| name.clone()).collect(),
            weather,
        })
    }
}
