//! Fitted Feature Scaler
//!
//! JSON export of the scikit-learn scaler fitted at training time.
//!
//! ```json
//! {"type": "standard", "mean": [..], "scale": [..]}
//! {"type": "min_max", "data_min": [..], "data_max": [..]}
//! ```
//!
//! The transform reproduces scikit-learn exactly (no clamping), since the
//! classifier was trained on its output.

use serde::{Deserialize, Serialize};

use crate::logic::features::{Features, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// StandardScaler: (x - mean) / scale
    Standard { mean: Vec<f32>, scale: Vec<f32> },
    /// MinMaxScaler with the default (0, 1) feature range
    MinMax { data_min: Vec<f32>, data_max: Vec<f32> },
}

impl FeatureScaler {
    /// Number of features the scaler was fitted on.
    ///
    /// `None` when the parameter vectors disagree with each other.
    pub fn dimension(&self) -> Option<usize> {
        let (a, b) = match self {
            FeatureScaler::Standard { mean, scale } => (mean.len(), scale.len()),
            FeatureScaler::MinMax { data_min, data_max } => (data_min.len(), data_max.len()),
        };
        (a == b).then_some(a)
    }

    /// Scale one feature vector
    pub fn transform(&self, features: &Features) -> Features {
        let mut scaled = [0.0f32; FEATURE_COUNT];

        match self {
            FeatureScaler::Standard { mean, scale } => {
                for i in 0..FEATURE_COUNT {
                    let mu = mean.get(i).copied().unwrap_or(0.0);
                    let sigma = non_zero(scale.get(i).copied().unwrap_or(1.0));
                    scaled[i] = (features[i] - mu) / sigma;
                }
            }
            FeatureScaler::MinMax { data_min, data_max } => {
                for i in 0..FEATURE_COUNT {
                    let min_val = data_min.get(i).copied().unwrap_or(0.0);
                    let max_val = data_max.get(i).copied().unwrap_or(1.0);
                    let range = non_zero(max_val - min_val);
                    scaled[i] = (features[i] - min_val) / range;
                }
            }
        }

        scaled
    }
}

/// scikit-learn replaces zero scale / zero range with 1
fn non_zero(value: f32) -> f32 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}
