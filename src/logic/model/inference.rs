//! Inference Engine - ONNX Runtime Integration
//!
//! The trained Keras networks are exported to ONNX and run with ONNX Runtime.
//! No Python runtime - a prediction is one `[1, 8]` forward pass.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::error::{InferenceError, LoadError};
use crate::logic::features::{Features, FEATURE_COUNT};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Binary classifier over one scaled feature vector.
///
/// Implementations must be safe to share across threads; bundles hand out
/// `&dyn Classifier` to concurrent requests.
pub trait Classifier: Send + Sync {
    /// Probability of the positive class, in [0, 1]
    fn predict_proba(&self, features: &Features) -> Result<f32, InferenceError>;

    /// Backend name for status reporting
    fn backend(&self) -> &'static str;
}

/// Builds classifiers from artifact paths.
///
/// The default is [`OnnxLoader`]; the seam exists so caches can be built over
/// other backends.
pub trait ClassifierLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, LoadError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX Runtime session.
///
/// `Session::run` takes `&mut self`, so the session sits behind a mutex.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn from_file(model_path: &Path) -> Result<Self, LoadError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        let model_error = |reason: String| LoadError::Model {
            path: model_path.to_path_buf(),
            reason,
        };

        let session = Session::builder()
            .map_err(|e| model_error(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| model_error(format!("failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| model_error(format!("failed to load model: {}", e)))?;

        Self::from_session(session).map_err(model_error)
    }

    fn from_session(session: Session) -> Result<Self, String> {
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| "model defines no output".to_string())?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, features: &Features) -> Result<f32, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or(InferenceError::EmptyOutput)?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Runtime(format!("extract error: {}", e)))?;

        let raw = data.first().copied().ok_or(InferenceError::EmptyOutput)?;
        sanitize_probability(raw)
    }

    fn backend(&self) -> &'static str {
        "ONNX Runtime (CPU)"
    }
}

/// Default loader: one ONNX session per artifact
#[derive(Debug, Default, Clone, Copy)]
pub struct OnnxLoader;

impl ClassifierLoader for OnnxLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, LoadError> {
        Ok(Box::new(OnnxClassifier::from_file(path)?))
    }
}

/// Reject NaN/inf, clamp rounding noise into [0, 1]
pub fn sanitize_probability(raw: f32) -> Result<f32, InferenceError> {
    if !raw.is_finite() {
        return Err(InferenceError::NonFinite(raw));
    }
    Ok(raw.clamp(0.0, 1.0))
}
