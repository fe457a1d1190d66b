pub mod assembler;
pub mod fallback;
pub mod ml;
pub mod selector;

use crate::config::PricingConfig;
use crate::domain::contract::{HealthStatus, ModelInfo};
use crate::domain::features::FeatureVector;
use crate::domain::pricing::PricingResult;
use crate::error::PricingError;
use ml::HttpPricingService;
use selector::PricingSelector;

/// The learned pricing strategy, as seen by the selector.
#[async_trait::async_trait]
pub trait PricePredictor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn predict(&self, features: &FeatureVector) -> Result<PricingResult, PricingError>;

    async fn predict_batch(
        &self,
        features: &[FeatureVector],
    ) -> Result<Vec<PricingResult>, PricingError>;

    async fn health(&self) -> Result<HealthStatus, PricingError>;

    async fn model_info(&self) -> Result<ModelInfo, PricingError>;
}

pub async fn predict_price(
    features: &FeatureVector,
    config: &PricingConfig,
) -> Result<PricingResult, PricingError> {
    match HttpPricingService::from_config(config) {
        Ok(service) => {
            PricingSelector::new(service, config.clone())
                .predict_price(features)
                .await
        }
        Err(err) => selector::recover(features, err, config.fallback_enabled),
    }
}

pub async fn batch_predict_prices(
    features: &[FeatureVector],
    config: &PricingConfig,
) -> Vec<PricingResult> {
    match HttpPricingService::from_config(config) {
        Ok(service) => {
            PricingSelector::new(service, config.clone())
                .batch_predict_prices(features)
                .await
        }
        Err(err) => features
            .iter()
            .map(|f| {
                selector::recover(f, err.clone(), config.fallback_enabled)
                    .unwrap_or_else(|_| PricingResult::degraded(f.current_price))
            })
            .collect(),
    }
}
