//! Model Module - Bundles, Inference, Scaling
//!
//! A bundle is the classifier + fitted scaler + metadata triple of one
//! domain. Bundles are loaded once and shared read-only.

pub mod bundle;
pub mod cache;
pub mod inference;
pub mod scaler;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};

use crate::constants::{ATTENDANCE_DIR, STOCK_DIR};

// Re-export common types
pub use bundle::{
    ArtifactInfo, ArtifactPaths, AttendanceBundle, AttendanceMetadata, Checksums,
    DomainMetadata, ModelBundle, StockBundle, StockMetadata,
};
pub use cache::{BundleCache, DomainReadiness};
pub use inference::{Classifier, ClassifierLoader, OnnxClassifier, OnnxLoader};
pub use scaler::FeatureScaler;

/// Prediction domain. Each has its own independently trained model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Attendance,
    Stock,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Attendance, Domain::Stock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Attendance => "attendance",
            Domain::Stock => "stock",
        }
    }

    /// Directory name under the model root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Domain::Attendance => ATTENDANCE_DIR,
            Domain::Stock => STOCK_DIR,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
