//! Logistic adapter: Implementation of BaselineClassifier from a JSON export.
//!
//! The training pipeline (standard scaler followed by logistic regression)
//! is exported as plain parameters:
//! `p = sigmoid(intercept + sum(coef_i * (x_i - mean_i) / scale_i))`.
//!
//! # Integrity
//!
//! When a `manifest.json` sits next to the artifact, the artifact must be
//! listed in it and its SHA-256 must match. Setting
//! `HEALTHTWIN_REQUIRE_MODEL_MANIFEST=true` makes the manifest mandatory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, FEATURE_NAMES};
use crate::ports::{BaselineClassifier, ClassifierLoader, ModelError};

/// Artifact format version understood by this loader.
pub const MODEL_FORMAT_VERSION: u32 = 1;

const MANIFEST_FILE: &str = "manifest.json";

const N_FEATURES: usize = FEATURE_NAMES.len();

/// Model parameters as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLogisticModel {
    pub version: u32,
    pub feature_names: Vec<String>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ModelManifest {
    version: u32,
    files: BTreeMap<String, String>,
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn to_fixed(name: &str, v: &[f64]) -> Result<[f64; N_FEATURES], ModelError> {
    let arr: [f64; N_FEATURES] = v.try_into().map_err(|_| {
        ModelError::Corrupt(format!(
            "{name} has {} entries, expected {N_FEATURES}",
            v.len()
        ))
    })?;
    if let Some(bad) = arr.iter().find(|x| !x.is_finite()) {
        return Err(ModelError::Corrupt(format!("{name} contains {bad}")));
    }
    Ok(arr)
}

/// Fitted logistic-regression pipeline over [`FEATURE_NAMES`].
///
/// Immutable once built; shared read-only across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    mean: [f64; N_FEATURES],
    scale: [f64; N_FEATURES],
    coefficients: [f64; N_FEATURES],
    intercept: f64,
}

impl LogisticModel {
    /// Build a model from exported parameters, checking shape and values.
    ///
    /// # Errors
    /// Returns `ModelError::Corrupt` on unsupported version, mismatched
    /// feature schema, wrong vector lengths, non-finite parameters or a
    /// zero scale.
    pub fn from_exported(model: &ExportedLogisticModel) -> Result<Self, ModelError> {
        if model.version != MODEL_FORMAT_VERSION {
            return Err(ModelError::Corrupt(format!(
                "Unsupported model version: {}",
                model.version
            )));
        }
        if model.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::Corrupt(format!(
                "feature_names {:?} do not match expected {:?}",
                model.feature_names, FEATURE_NAMES
            )));
        }

        let mean = to_fixed("scaler_mean", &model.scaler_mean)?;
        let scale = to_fixed("scaler_scale", &model.scaler_scale)?;
        let coefficients = to_fixed("coefficients", &model.coefficients)?;
        if !model.intercept.is_finite() {
            return Err(ModelError::Corrupt(format!(
                "intercept is {}",
                model.intercept
            )));
        }
        if scale.iter().any(|&s| s == 0.0) {
            return Err(ModelError::Corrupt("scaler_scale contains zero".into()));
        }

        Ok(Self {
            mean,
            scale,
            coefficients,
            intercept: model.intercept,
        })
    }

    /// Linear predictor before the sigmoid.
    #[must_use]
    pub fn logit(&self, features: &FeatureVector) -> f64 {
        features
            .to_array()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, ((x, (m, s)), c)| acc + c * (x - m) / s)
    }
}

impl BaselineClassifier for LogisticModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let z = self.logit(features);
        let probability = 1.0 / (1.0 + (-z).exp());

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::Inference(format!(
                "classifier produced invalid probability {probability} (logit {z})"
            )));
        }
        Ok(probability)
    }
}

/// Loads a [`LogisticModel`] from a JSON artifact on disk.
#[derive(Debug, Clone)]
pub struct JsonModelLoader {
    path: PathBuf,
    require_manifest: bool,
}

impl JsonModelLoader {
    /// Create a loader for the artifact at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            require_manifest: false,
        }
    }

    /// Refuse to load when no manifest binds the artifact.
    #[must_use]
    pub fn require_manifest(mut self, require: bool) -> Self {
        self.require_manifest = require;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the artifact bytes against a sibling `manifest.json`.
    fn verify_manifest(&self, artifact: &[u8]) -> Result<(), ModelError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let manifest_path = dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            if self.require_manifest {
                return Err(ModelError::Integrity(format!(
                    "{MANIFEST_FILE} required but not found in {dir:?}"
                )));
            }
            tracing::warn!(
                "No {MANIFEST_FILE} next to {:?}; loading model without integrity check",
                self.path
            );
            return Ok(());
        }

        let content = fs::read(&manifest_path).map_err(|e| {
            ModelError::Integrity(format!("Failed to read {manifest_path:?}: {e}"))
        })?;
        let manifest: ModelManifest = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Integrity(format!("Invalid {MANIFEST_FILE} format: {e}")))?;
        if manifest.version != 1 {
            return Err(ModelError::Integrity(format!(
                "Unsupported manifest version: {}",
                manifest.version
            )));
        }

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelError::Integrity(format!("Invalid model path {:?}", self.path)))?;
        let expected = manifest.files.get(file_name).ok_or_else(|| {
            ModelError::Integrity(format!("{file_name} is not listed in {MANIFEST_FILE}"))
        })?;

        if !constant_time_eq_str(&sha256_hex(artifact), expected) {
            return Err(ModelError::Integrity(format!(
                "File hash mismatch for {file_name}"
            )));
        }

        tracing::debug!("Model artifact hash verified against {:?}", manifest_path);
        Ok(())
    }
}

impl ClassifierLoader for JsonModelLoader {
    type Classifier = LogisticModel;

    fn load(&self) -> Result<LogisticModel, ModelError> {
        if !self.path.is_file() {
            return Err(ModelError::NotFound(format!("{:?}", self.path)));
        }

        let bytes = fs::read(&self.path)
            .map_err(|e| ModelError::NotFound(format!("{:?}: {e}", self.path)))?;
        self.verify_manifest(&bytes)?;

        let exported: ExportedLogisticModel =
            serde_json::from_slice(&bytes).map_err(|e| ModelError::Corrupt(e.to_string()))?;
        let model = LogisticModel::from_exported(&exported)?;

        tracing::info!(
            "Loaded model from {:?} (version={}, n_features={})",
            self.path,
            exported.version,
            exported.feature_names.len()
        );

        Ok(model)
    }
}
