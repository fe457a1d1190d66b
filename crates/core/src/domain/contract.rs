use crate::domain::features::FeatureVector;
use crate::domain::pricing::{floor_and_round, PricingMethod, PricingResult};
use crate::error::PricingError;
use serde::{Deserialize, Serialize};

/// Confidence assumed when the service omits it; the lower bound the model reports.
pub const DEFAULT_ML_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub recommended_price: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub factors: Option<Vec<String>>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPredictRequest<'a> {
    pub products: &'a [FeatureVector],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionResponse {
    pub predictions: Vec<PredictionResponse>,
    #[serde(default)]
    pub total_processed: Option<usize>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default)]
    pub preprocessor_loaded: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub model_loaded: bool,
    #[serde(default)]
    pub preprocessor_loaded: bool,
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub total_features: usize,
}

impl PredictionResponse {
    pub fn validate_and_into_result(
        self,
        features: &FeatureVector,
    ) -> Result<PricingResult, PricingError> {
        if !self.recommended_price.is_finite() || self.recommended_price < 0.0 {
            return Err(PricingError::unavailable(
                "contract",
                format!(
                    "recommended_price must be a non-negative number (got {})",
                    self.recommended_price
                ),
            ));
        }

        let confidence = match self.confidence {
            Some(c) if (0.0..=1.0).contains(&c) => c,
            Some(c) => {
                return Err(PricingError::unavailable(
                    "contract",
                    format!("confidence must be between 0 and 1 (got {c})"),
                ))
            }
            None => DEFAULT_ML_CONFIDENCE,
        };

        let factors = self
            .factors
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        Ok(PricingResult {
            recommended_price: floor_and_round(self.recommended_price, features.current_price),
            confidence,
            factors,
            method: PricingMethod::MlPrediction,
        })
    }
}

impl BatchPredictionResponse {
    pub fn validate_and_into_results(
        self,
        features: &[FeatureVector],
    ) -> Result<Vec<PricingResult>, PricingError> {
        if self.predictions.len() != features.len() {
            return Err(PricingError::unavailable(
                "contract",
                format!(
                    "batch response must contain exactly {} predictions (got {})",
                    features.len(),
                    self.predictions.len()
                ),
            ));
        }

        if let Some(total) = self.total_processed {
            if total != features.len() {
                return Err(PricingError::unavailable(
                    "contract",
                    format!(
                        "batch total_processed mismatch: expected {}, got {total}",
                        features.len()
                    ),
                ));
            }
        }

        self.predictions
            .into_iter()
            .zip(features)
            .map(|(p, f)| p.validate_and_into_result(f))
            .collect()
    }
}
