//! Progress prediction model
//!
//! The projector talks to a model through [`ProgressModel`]. Training happens
//! elsewhere; [`FittedRegression`] loads the fitted parameters of a standard
//! scaler followed by one linear regressor per target.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FEATURE_COUNT: usize = 16;

/// Feature order expected by every model
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "height",
    "current_weight",
    "current_bmi",
    "current_energy",
    "activity_level",
    "avg_daily_calories",
    "avg_daily_protein",
    "avg_daily_carbs",
    "avg_daily_fat",
    "avg_daily_fiber",
    "total_exercise_duration",
    "avg_calories_burned",
    "exercise_frequency",
    "caloric_balance",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.0[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub weight: f64,
    pub bmi: f64,
    pub energy: f64,
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Non-finite {0}")]
    NonFinite(&'static str),

    #[error("Model is not trained")]
    Untrained,
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model: {0}")]
    Invalid(#[from] PredictionError),
}

/// Read-only prediction capability
pub trait ProgressModel: Send + Sync {
    fn is_trained(&self) -> bool;

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError>;

    fn describe(&self) -> String {
        if self.is_trained() {
            "trained".to_string()
        } else {
            "not trained".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, PredictionError> {
        check_len(self.mean.len(), x.len())?;
        check_len(self.scale.len(), x.len())?;
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            // zero-variance features are only centred
            .map(|(v, (m, s))| if *s == 0.0 { v - m } else { (v - m) / s })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    fn predict(&self, x: &[f64]) -> Result<f64, PredictionError> {
        check_len(self.coefficients.len(), x.len())?;
        Ok(self.intercept + self.coefficients.iter().zip(x).map(|(c, v)| c * v).sum::<f64>())
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), PredictionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PredictionError::DimensionMismatch { expected, actual })
    }
}

/// Scaler plus weight/BMI/energy regressors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedRegression {
    pub scaler: StandardScaler,
    pub weight: LinearRegressor,
    pub bmi: LinearRegressor,
    pub energy: LinearRegressor,
}

impl FittedRegression {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| ModelLoadError::Io {
            path: path_str.clone(),
            source,
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|source| ModelLoadError::Json {
            path: path_str,
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Every parameter vector must match the feature count and be finite
    pub fn validate(&self) -> Result<(), PredictionError> {
        let vectors = [
            &self.scaler.mean,
            &self.scaler.scale,
            &self.weight.coefficients,
            &self.bmi.coefficients,
            &self.energy.coefficients,
        ];
        for v in vectors {
            check_len(FEATURE_COUNT, v.len())?;
            if v.iter().any(|x| !x.is_finite()) {
                return Err(PredictionError::NonFinite("model parameter"));
            }
        }
        let intercepts = [self.weight.intercept, self.bmi.intercept, self.energy.intercept];
        if intercepts.iter().any(|x| !x.is_finite()) {
            return Err(PredictionError::NonFinite("model intercept"));
        }
        Ok(())
    }
}

impl ProgressModel for FittedRegression {
    fn is_trained(&self) -> bool {
        true
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        if features.0.iter().any(|v| !v.is_finite()) {
            return Err(PredictionError::NonFinite("input feature"));
        }

        let scaled = self.scaler.transform(&features.0)?;
        let prediction = Prediction {
            weight: self.weight.predict(&scaled)?,
            bmi: self.bmi.predict(&scaled)?,
            energy: self.energy.predict(&scaled)?,
        };

        if [prediction.weight, prediction.bmi, prediction.energy]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(PredictionError::NonFinite("prediction"));
        }
        Ok(prediction)
    }

    fn describe(&self) -> String {
        "trained: standard scaler + linear regression (weight, bmi, energy)".to_string()
    }
}

/// Load the fitted model when a path is configured. A file that cannot be
/// loaded leaves the projector on its untrained strategy.
pub fn load_model(path: Option<&Path>) -> Option<Arc<dyn ProgressModel>> {
    let path = path?;
    match FittedRegression::from_json_file(path) {
        Ok(model) => {
            tracing::info!("Loaded progress model from {}", path.display());
            let model: Arc<dyn ProgressModel> = Arc::new(model);
            Some(model)
        }
        Err(e) => {
            tracing::warn!("{}; using default predictions", e);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Predicts weight = current_weight - 0.5, bmi = current_bmi, energy = current_energy + 1
    pub(crate) fn identity_like_model() -> FittedRegression {
        let unit = |index: usize, intercept: f64| {
            let mut coefficients = vec![0.0; FEATURE_COUNT];
            coefficients[index] = 1.0;
            LinearRegressor { coefficients, intercept }
        };
        FittedRegression {
            scaler: StandardScaler {
                mean: vec![0.0; FEATURE_COUNT],
                scale: vec![1.0; FEATURE_COUNT],
            },
            weight: unit(3, -0.5),
            bmi: unit(4, 0.0),
            energy: unit(5, 1.0),
        }
    }

    fn features() -> FeatureVector {
        let mut f = [0.0; FEATURE_COUNT];
        f[3] = 80.0;
        f[4] = 26.1;
        f[5] = 5.0;
        FeatureVector(f)
    }

    #[test]
    fn test_predict_applies_scaler_and_coefficients() {
        let mut model = identity_like_model();
        model.scaler.mean[3] = 70.0;
        model.scaler.scale[3] = 10.0;

        let p = model.predict(&features()).unwrap();
        // (80 - 70) / 10 - 0.5
        assert!((p.weight - 0.5).abs() < 0.001);
        assert!((p.bmi - 26.1).abs() < 0.001);
        assert!((p.energy - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_scale_only_centres() {
        let mut model = identity_like_model();
        model.scaler.scale[3] = 0.0;
        let p = model.predict(&features()).unwrap();
        assert!((p.weight - 79.5).abs() < 0.001);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut model = identity_like_model();
        model.bmi.coefficients.pop();
        assert!(matches!(
            model.predict(&features()),
            Err(PredictionError::DimensionMismatch { expected: 15, actual: 16 })
        ));
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let model = identity_like_model();
        let mut f = features();
        f.0[0] = f64::NAN;
        assert!(matches!(model.predict(&f), Err(PredictionError::NonFinite(_))));
    }

    #[test]
    fn test_feature_lookup_by_name() {
        assert_eq!(features().get("current_weight"), Some(80.0));
        assert_eq!(features().get("shoe_size"), None);
    }

    #[test]
    fn test_load_model_missing_file_is_untrained() {
        assert!(load_model(None).is_none());
        assert!(load_model(Some(Path::new("/nonexistent/model.json"))).is_none());
    }

    #[test]
    fn test_model_json_round_trip_validates() {
        let json = serde_json::to_string(&identity_like_model()).unwrap();
        let back: FittedRegression = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
    }
}
