//! Test doubles and artifact fixtures shared by the unit tests

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use super::bundle::{ArtifactInfo, ArtifactPaths, AttendanceMetadata, StockMetadata};
use super::inference::{Classifier, ClassifierLoader};
use super::scaler::FeatureScaler;
use super::{AttendanceBundle, Domain, StockBundle};
use crate::logic::error::{InferenceError, LoadError};
use crate::logic::features::layout::layout_for;
use crate::logic::features::{Features, FEATURE_COUNT};

/// Always answers the same probability, remembers what it was fed
pub(crate) struct FixedProbability {
    pub probability: f32,
    pub last_input: Mutex<Option<Features>>,
}

impl FixedProbability {
    pub fn new(probability: f32) -> Self {
        Self {
            probability,
            last_input: Mutex::new(None),
        }
    }
}

impl Classifier for FixedProbability {
    fn predict_proba(&self, features: &Features) -> Result<f32, InferenceError> {
        *self.last_input.lock() = Some(*features);
        Ok(self.probability)
    }

    fn backend(&self) -> &'static str {
        "fixed"
    }
}

/// Classifier whose runtime always fails
pub(crate) struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn predict_proba(&self, _features: &Features) -> Result<f32, InferenceError> {
        Err(InferenceError::Runtime("session poisoned".to_string()))
    }

    fn backend(&self) -> &'static str {
        "broken"
    }
}

/// Hands out [`FixedProbability`] classifiers and counts loads
pub(crate) struct CountingLoader {
    pub probability: f32,
    pub loads: Arc<AtomicUsize>,
}

impl CountingLoader {
    pub fn new(probability: f32) -> (Self, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                probability,
                loads: loads.clone(),
            },
            loads,
        )
    }
}

impl ClassifierLoader for CountingLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn Classifier>, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FixedProbability::new(self.probability)))
    }
}

/// Loads fine, then fails every inference
pub(crate) struct BrokenLoader;

impl ClassifierLoader for BrokenLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn Classifier>, LoadError> {
        Ok(Box::new(BrokenClassifier))
    }
}

pub(crate) fn identity_scaler() -> FeatureScaler {
    FeatureScaler::Standard {
        mean: vec![0.0; FEATURE_COUNT],
        scale: vec![1.0; FEATURE_COUNT],
    }
}

/// Metadata as exported by the attendance training notebook
pub(crate) fn attendance_metadata() -> AttendanceMetadata {
    let days = [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ];
    let day_map: BTreeMap<String, u8> = days
        .iter()
        .enumerate()
        .map(|(i, d)| (d.to_string(), i as u8))
        .collect();

    let weather_map: BTreeMap<String, [f32; 3]> = [
        ("Clear", [1.0, 0.0, 0.0]),
        ("Clouds", [0.0, 1.0, 0.0]),
        ("Rain", [0.0, 0.0, 1.0]),
        ("Thunderstorm", [0.0, 0.0, 1.0]),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let tolerances: BTreeMap<String, i32> = [("Clear", 1), ("Clouds", 1), ("Rain", 5), ("Thunderstorm", 5)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    AttendanceMetadata {
        day_map,
        weather_map,
        tolerances,
        artifact: ArtifactInfo::default(),
    }
}

pub(crate) fn attendance_bundle(probability: f32) -> AttendanceBundle {
    AttendanceBundle::new(
        Box::new(FixedProbability::new(probability)),
        identity_scaler(),
        attendance_metadata(),
    )
}

pub(crate) fn stock_bundle(probability: f32) -> StockBundle {
    StockBundle::new(
        Box::new(FixedProbability::new(probability)),
        identity_scaler(),
        StockMetadata::default(),
    )
}

/// Write a valid artifact set for `domain` under `root`
pub(crate) fn write_artifacts(root: &Path, domain: Domain) -> ArtifactPaths {
    let paths = ArtifactPaths::under(root, domain);
    if let Some(dir) = paths.model.parent() {
        fs::create_dir_all(dir).unwrap();
    }

    fs::write(&paths.model, b"onnx-bytes").unwrap();
    fs::write(
        &paths.scaler,
        json!({
            "type": "standard",
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT],
        })
        .to_string(),
    )
    .unwrap();

    let feature_names: Vec<&str> = layout_for(domain).to_vec();
    let metadata = match domain {
        Domain::Attendance => {
            let mut value = serde_json::to_value(attendance_metadata()).unwrap();
            value["feature_names"] = json!(feature_names);
            value
        }
        Domain::Stock => json!({ "feature_names": feature_names }),
    };
    fs::write(&paths.metadata, metadata.to_string()).unwrap();

    paths
}
