//! Linear model loaded from a JSON artifact.
//!
//! ```json
//! {
//!   "features": ["CUSTOMER_SENIORITY", "SEX"],
//!   "coefficients": [0.12, -0.4],
//!   "intercept": -1.5,
//!   "link": "logistic",
//!   "threshold": 0.5,
//!   "impute": {"PREMIUM": 0.0}
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Model;
use crate::batch::TabularBatch;
use crate::error::{CoreError, ModelError};

/// Function applied to the linear score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

/// Weighted sum of named features plus intercept, optionally passed through
/// a logistic link and a decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    link: Link,
    /// When set, predictions are class labels: `1.0` at or above, `0.0` below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,
    /// Values substituted for missing cells, per feature.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    impute: IndexMap<String, f64>,
}

impl LinearModel {
    pub fn new(
        features: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
        link: Link,
    ) -> Result<Self, CoreError> {
        let model = Self {
            features,
            coefficients,
            intercept,
            link,
            threshold: None,
            impute: IndexMap::new(),
        };
        model.check()?;
        Ok(model)
    }

    /// Turn scores into 0/1 labels at `threshold`.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, CoreError> {
        self.threshold = Some(threshold);
        self.check()?;
        Ok(self)
    }

    /// Substitute `value` for missing cells of `feature`.
    pub fn with_imputation(mut self, feature: impl Into<String>, value: f64) -> Result<Self, CoreError> {
        self.impute.insert(feature.into(), value);
        self.check()?;
        Ok(self)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let model: Self = serde_json::from_str(json)?;
        model.check()?;
        Ok(model)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn link(&self) -> Link {
        self.link
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.features.is_empty() {
            return Err(CoreError::Artifact("model has no features".into()));
        }
        if self.features.len() != self.coefficients.len() {
            return Err(CoreError::Artifact(format!(
                "{} features but {} coefficients",
                self.features.len(),
                self.coefficients.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.features.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(CoreError::Artifact(format!("duplicate feature {dup}")));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(CoreError::Artifact("coefficients must be finite".into()));
        }
        if let Some(t) = self.threshold {
            let valid = match self.link {
                Link::Logistic => t > 0.0 && t < 1.0,
                Link::Identity => t.is_finite(),
            };
            if !valid {
                return Err(CoreError::Artifact(format!("invalid threshold {t}")));
            }
        }
        if let Some((feature, _)) = self.impute.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CoreError::Artifact(format!(
                "imputation for {feature} must be finite"
            )));
        }
        Ok(())
    }

    fn output(&self, score: f64) -> f64 {
        let value = match self.link {
            Link::Identity => score,
            Link::Logistic => 1.0 / (1.0 + (-score).exp()),
        };
        match self.threshold {
            Some(t) if value >= t => 1.0,
            Some(_) => 0.0,
            None => value,
        }
    }
}

impl Model for LinearModel {
    fn predict(&self, batch: &TabularBatch) -> Result<Vec<f64>, ModelError> {
        let columns = self
            .features
            .iter()
            .map(|f| {
                batch
                    .column(f)
                    .ok_or_else(|| ModelError::MissingFeature(f.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        (0..batch.len())
            .map(|row| {
                let mut score = self.intercept;
                for ((feature, coef), column) in
                    self.features.iter().zip(&self.coefficients).zip(&columns)
                {
                    let x = match column[row] {
                        Some(v) => v,
                        None => *self.impute.get(feature).ok_or_else(|| {
                            ModelError::MissingValue {
                                feature: feature.clone(),
                                row,
                            }
                        })?,
                    };
                    score += coef * x;
                }
                if !score.is_finite() {
                    return Err(ModelError::Rejected(format!(
                        "non-finite score for row {row}"
                    )));
                }
                Ok(self.output(score))
            })
            .collect()
    }
}
