//! Logic Module - Encoders, Models & Decision Engines
//!
//! Two independent pipelines (attendance, stock), each
//! encode → score → decide:
//! - `features/` - raw input → fixed-order feature vectors
//! - `model/` - bundles (classifier + scaler + metadata), ONNX inference, cache
//! - `decision/` - tolerance and threshold rules over the model score

pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod model;
