//! Model Bundle Loader
//!
//! Reads the three artifacts of a domain and validates them against the
//! encoder layout before anything is handed to inference.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::inference::{Classifier, ClassifierLoader};
use super::scaler::FeatureScaler;
use super::Domain;
use crate::constants::{METADATA_FILE, MODEL_FILE, MODEL_SUBDIR, SCALER_FILE};
use crate::logic::decision::rules::StockThresholds;
use crate::logic::error::{InferenceError, LoadError};
use crate::logic::features::layout::{self, FEATURE_COUNT};
use crate::logic::features::Features;

// ============================================================================
// ARTIFACT PATHS
// ============================================================================

/// Where the three artifacts of one domain live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub metadata: PathBuf,
}

impl ArtifactPaths {
    /// `<root>/<domain_dir>/model/{model.onnx, scaler.json, model_metadata.json}`
    pub fn under(root: &Path, domain: Domain) -> Self {
        let dir = root.join(domain.dir_name()).join(MODEL_SUBDIR);
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
            metadata: dir.join(METADATA_FILE),
        }
    }
}

// ============================================================================
// METADATA DESCRIPTORS
// ============================================================================

/// SHA-256 (hex) of the binary artifacts, recorded at export time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksums {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub scaler: Option<String>,
}

/// Keys shared by both metadata files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Training-time feature order
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// CRC32 of the training-time layout
    #[serde(default)]
    pub layout_hash: Option<u32>,
    #[serde(default)]
    pub checksums: Checksums,
}

/// A domain's metadata file
pub trait DomainMetadata: DeserializeOwned + Send + Sync + 'static {
    const DOMAIN: Domain;

    fn artifact_info(&self) -> &ArtifactInfo;

    /// Semantic checks serde can't express
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Attendance descriptor: category maps + weather tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceMetadata {
    /// Weekday name → 0 (Monday) .. 6 (Sunday)
    pub day_map: BTreeMap<String, u8>,
    /// Weather label → 3-slot one-hot
    pub weather_map: BTreeMap<String, [f32; 3]>,
    /// Weather label → minutes late before counting as late
    pub tolerances: BTreeMap<String, i32>,
    #[serde(flatten)]
    pub artifact: ArtifactInfo,
}

impl DomainMetadata for AttendanceMetadata {
    const DOMAIN: Domain = Domain::Attendance;

    fn artifact_info(&self) -> &ArtifactInfo {
        &self.artifact
    }

    fn validate(&self) -> Result<(), String> {
        if let Some((name, index)) = self.day_map.iter().find(|(_, index)| **index > 6) {
            return Err(format!("day_map[{:?}] = {} is outside 0-6", name, index));
        }
        Ok(())
    }
}

/// Stock descriptor. No category maps; thresholds are optional overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockMetadata {
    #[serde(default)]
    pub thresholds: StockThresholds,
    #[serde(flatten)]
    pub artifact: ArtifactInfo,
}

impl DomainMetadata for StockMetadata {
    const DOMAIN: Domain = Domain::Stock;

    fn artifact_info(&self) -> &ArtifactInfo {
        &self.artifact
    }

    fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()
    }
}

// ============================================================================
// MODEL BUNDLE
// ============================================================================

/// Classifier + scaler + metadata of one domain. Immutable once built.
pub struct ModelBundle<M> {
    pub classifier: Box<dyn Classifier>,
    pub scaler: FeatureScaler,
    pub metadata: M,
    pub loaded_at: DateTime<Utc>,
}

pub type AttendanceBundle = ModelBundle<AttendanceMetadata>;
pub type StockBundle = ModelBundle<StockMetadata>;

impl<M: DomainMetadata> ModelBundle<M> {
    pub fn new(classifier: Box<dyn Classifier>, scaler: FeatureScaler, metadata: M) -> Self {
        Self {
            classifier,
            scaler,
            metadata,
            loaded_at: Utc::now(),
        }
    }

    pub fn domain(&self) -> Domain {
        M::DOMAIN
    }

    /// Scale the raw vector and run the classifier
    pub fn score(&self, features: &Features) -> Result<f32, InferenceError> {
        let scaled = self.scaler.transform(features);
        self.classifier.predict_proba(&scaled)
    }

    /// Read and validate the artifacts at `paths`
    pub fn load(
        paths: &ArtifactPaths,
        loader: &dyn ClassifierLoader,
        verify_checksums: bool,
    ) -> Result<Self, LoadError> {
        let domain = M::DOMAIN;

        for path in [&paths.model, &paths.scaler, &paths.metadata] {
            if !path.exists() {
                return Err(LoadError::Missing {
                    domain,
                    path: path.clone(),
                });
            }
        }

        let metadata: M = read_json(&paths.metadata)?;
        metadata
            .validate()
            .map_err(|reason| LoadError::InvalidMetadata { domain, reason })?;

        let scaler: FeatureScaler = read_json(&paths.scaler)?;
        check_layout(domain, &scaler, metadata.artifact_info())?;

        if verify_checksums {
            let checksums = &metadata.artifact_info().checksums;
            if let Some(expected) = &checksums.model {
                verify_checksum(&paths.model, expected)?;
            }
            if let Some(expected) = &checksums.scaler {
                verify_checksum(&paths.scaler, expected)?;
            }
        }

        let classifier = loader.load(&paths.model)?;

        log::info!(
            "{} bundle loaded: model={} backend={} layout={:08x}",
            domain,
            paths.model.display(),
            classifier.backend(),
            layout::layout_hash(domain)
        );

        Ok(Self::new(classifier, scaler, metadata))
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for ModelBundle<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("backend", &self.classifier.backend())
            .field("scaler", &self.scaler)
            .field("metadata", &self.metadata)
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Scaler width, `feature_names` and `layout_hash` against the encoder
fn check_layout(domain: Domain, scaler: &FeatureScaler, info: &ArtifactInfo) -> Result<(), LoadError> {
    let mismatch = |reason: String| LoadError::LayoutMismatch { domain, reason };

    match scaler.dimension() {
        Some(FEATURE_COUNT) => {}
        Some(n) => {
            return Err(mismatch(format!(
                "scaler was fitted on {} features, encoder produces {}",
                n, FEATURE_COUNT
            )))
        }
        None => return Err(mismatch("scaler parameter vectors differ in length".to_string())),
    }

    match &info.feature_names {
        Some(names) => layout::check_feature_names(domain, names).map_err(mismatch)?,
        None => log::warn!(
            "{} metadata has no feature_names; feature order cannot be verified",
            domain
        ),
    }

    if let Some(hash) = info.layout_hash {
        layout::check_layout_hash(domain, hash).map_err(mismatch)?;
    }

    Ok(())
}

/// SHA-256 of a file, lowercase hex
pub fn file_sha256(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn verify_checksum(path: &Path, expected: &str) -> Result<(), LoadError> {
    let actual = file_sha256(path)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(LoadError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
