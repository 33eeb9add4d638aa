//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Artifact locations follow the layout produced by the training notebooks:
//! `<root>/<domain_dir>/model/<file>`.

/// Default model root (relative to the working directory)
pub const DEFAULT_MODEL_ROOT: &str = ".";

/// Directory holding the attendance artifacts
pub const ATTENDANCE_DIR: &str = "absensi";

/// Directory holding the stock artifacts
pub const STOCK_DIR: &str = "stok";

/// Sub directory inside each domain directory
pub const MODEL_SUBDIR: &str = "model";

/// Classifier artifact (ONNX export of the trained network)
pub const MODEL_FILE: &str = "model.onnx";

/// Fitted scaler artifact
pub const SCALER_FILE: &str = "scaler.json";

/// Metadata descriptor artifact
pub const METADATA_FILE: &str = "model_metadata.json";

// ============================================
// Environment variable names
// ============================================

pub const ENV_MODEL_ROOT: &str = "FLOWLY_MODEL_ROOT";
pub const ENV_ATTENDANCE_MODEL: &str = "FLOWLY_ATTENDANCE_MODEL";
pub const ENV_ATTENDANCE_SCALER: &str = "FLOWLY_ATTENDANCE_SCALER";
pub const ENV_ATTENDANCE_METADATA: &str = "FLOWLY_ATTENDANCE_METADATA";
pub const ENV_STOCK_MODEL: &str = "FLOWLY_STOCK_MODEL";
pub const ENV_STOCK_SCALER: &str = "FLOWLY_STOCK_SCALER";
pub const ENV_STOCK_METADATA: &str = "FLOWLY_STOCK_METADATA";
pub const ENV_STOCK_SINGLE_PERIOD_PROXY: &str = "FLOWLY_STOCK_SINGLE_PERIOD_PROXY";
pub const ENV_VERIFY_CHECKSUMS: &str = "FLOWLY_VERIFY_CHECKSUMS";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Flowly Predict";
