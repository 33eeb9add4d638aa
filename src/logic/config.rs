//! Predictor Configuration
//!
//! Loaded from environment variables (a `.env` file is read first by the
//! binary). Every value has a default in `constants`.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::logic::features::StockEncoding;
use crate::logic::model::{ArtifactPaths, Domain};

/// Predictor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Root the per-domain artifact directories hang off
    pub model_root: PathBuf,
    pub attendance: ArtifactPaths,
    pub stock: ArtifactPaths,
    pub stock_encoding: StockEncoding,
    /// Check artifact SHA-256 against metadata `checksums`
    pub verify_checksums: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::with_model_root(DEFAULT_MODEL_ROOT)
    }
}

impl PredictorConfig {
    /// Default file names under `root`
    pub fn with_model_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            model_root: root.to_path_buf(),
            attendance: ArtifactPaths::under(root, Domain::Attendance),
            stock: ArtifactPaths::under(root, Domain::Stock),
            stock_encoding: StockEncoding::default(),
            verify_checksums: true,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment configuration with the model root given explicitly.
    ///
    /// `FLOWLY_MODEL_ROOT` is ignored; per-artifact variables still apply.
    pub fn from_env_under(root: impl AsRef<Path>) -> Self {
        Self::from_lookup_under(root, |key| env::var(key).ok())
    }

    /// Build from any key → value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let root = lookup(ENV_MODEL_ROOT).unwrap_or_else(|| DEFAULT_MODEL_ROOT.to_string());
        Self::from_lookup_under(root, lookup)
    }

    /// Like [`Self::from_lookup`], with `root` in place of `FLOWLY_MODEL_ROOT`
    pub fn from_lookup_under(
        root: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut config = Self::with_model_root(root);

        let path = |key: &str, default: &mut PathBuf| {
            if let Some(value) = lookup(key) {
                *default = PathBuf::from(value);
            }
        };
        path(ENV_ATTENDANCE_MODEL, &mut config.attendance.model);
        path(ENV_ATTENDANCE_SCALER, &mut config.attendance.scaler);
        path(ENV_ATTENDANCE_METADATA, &mut config.attendance.metadata);
        path(ENV_STOCK_MODEL, &mut config.stock.model);
        path(ENV_STOCK_SCALER, &mut config.stock.scaler);
        path(ENV_STOCK_METADATA, &mut config.stock.metadata);

        config.stock_encoding.use_single_period_proxy =
            flag(lookup(ENV_STOCK_SINGLE_PERIOD_PROXY), true);
        config.verify_checksums = flag(lookup(ENV_VERIFY_CHECKSUMS), true);

        config
    }
}

/// Anything but `false` / `0` is on
fn flag(value: Option<String>, default: bool) -> bool {
    value
        .map(|s| s.trim().to_lowercase() != "false" && s.trim() != "0")
        .unwrap_or(default)
}
