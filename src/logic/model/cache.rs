//! Bundle Cache
//!
//! One slot per domain. The first request for a domain pays the load cost;
//! later requests get the same `Arc` back without touching storage. A failed
//! load leaves the slot empty so the next request retries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::bundle::{ArtifactPaths, AttendanceBundle, StockBundle};
use super::inference::{ClassifierLoader, OnnxLoader};
use super::Domain;
use crate::logic::config::PredictorConfig;
use crate::logic::error::LoadError;

/// Per-domain load state, for status reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainReadiness {
    pub domain: Domain,
    pub loaded: bool,
    pub loaded_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

pub struct BundleCache {
    attendance_paths: ArtifactPaths,
    stock_paths: ArtifactPaths,
    verify_checksums: bool,
    loader: Box<dyn ClassifierLoader>,
    attendance: OnceCell<Arc<AttendanceBundle>>,
    stock: OnceCell<Arc<StockBundle>>,
}

impl BundleCache {
    /// Cache over ONNX classifiers
    pub fn new(config: &PredictorConfig) -> Self {
        Self::with_loader(config, Box::new(OnnxLoader))
    }

    pub fn with_loader(config: &PredictorConfig, loader: Box<dyn ClassifierLoader>) -> Self {
        Self {
            attendance_paths: config.attendance.clone(),
            stock_paths: config.stock.clone(),
            verify_checksums: config.verify_checksums,
            loader,
            attendance: OnceCell::new(),
            stock: OnceCell::new(),
        }
    }

    pub fn attendance(&self) -> Result<Arc<AttendanceBundle>, LoadError> {
        self.attendance
            .get_or_try_init(|| {
                AttendanceBundle::load(&self.attendance_paths, self.loader.as_ref(), self.verify_checksums)
                    .map(Arc::new)
            })
            .cloned()
    }

    pub fn stock(&self) -> Result<Arc<StockBundle>, LoadError> {
        self.stock
            .get_or_try_init(|| {
                StockBundle::load(&self.stock_paths, self.loader.as_ref(), self.verify_checksums)
                    .map(Arc::new)
            })
            .cloned()
    }

    pub fn is_loaded(&self, domain: Domain) -> bool {
        match domain {
            Domain::Attendance => self.attendance.get().is_some(),
            Domain::Stock => self.stock.get().is_some(),
        }
    }

    /// Load every domain now and report how each went
    pub fn warm_up(&self) -> Vec<DomainReadiness> {
        Domain::ALL
            .iter()
            .map(|&domain| {
                let loaded = match domain {
                    Domain::Attendance => self.attendance().map(|b| b.loaded_at),
                    Domain::Stock => self.stock().map(|b| b.loaded_at),
                };

                match loaded {
                    Ok(loaded_at) => DomainReadiness {
                        domain,
                        loaded: true,
                        loaded_at: Some(loaded_at),
                        error: None,
                    },
                    Err(e) => {
                        log::warn!("{} model unavailable: {}", domain, e);
                        DomainReadiness {
                            domain,
                            loaded: false,
                            loaded_at: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}
