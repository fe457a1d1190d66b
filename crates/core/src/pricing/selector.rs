use crate::config::PricingConfig;
use crate::domain::features::FeatureVector;
use crate::domain::pricing::PricingResult;
use crate::error::PricingError;
use crate::pricing::{fallback, PricePredictor};
use futures_util::future::join_all;
use std::future::Future;
use std::time::Duration;

/// Chooses between the learned strategy and the local rules.
pub struct PricingSelector<P> {
    predictor: P,
    config: PricingConfig,
}

impl<P: PricePredictor> PricingSelector<P> {
    pub fn new(predictor: P, config: PricingConfig) -> Self {
        Self { predictor, config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub async fn predict_price(
        &self,
        features: &FeatureVector,
    ) -> Result<PricingResult, PricingError> {
        match bounded(self.config.timeout, self.predictor.predict(features)).await {
            Ok(result) => {
                tracing::debug!(
                    predictor = self.predictor.name(),
                    recommended_price = result.recommended_price,
                    "priced with learned strategy"
                );
                Ok(result)
            }
            Err(err) => recover(features, err, self.config.fallback_enabled),
        }
    }

    /// Always returns one result per input, in input order.
    pub async fn batch_predict_prices(&self, features: &[FeatureVector]) -> Vec<PricingResult> {
        if features.is_empty() {
            return Vec::new();
        }

        match bounded(self.config.timeout, self.predictor.predict_batch(features)).await {
            Ok(results) => {
                tracing::debug!(
                    predictor = self.predictor.name(),
                    batch_size = features.len(),
                    "batch priced with learned strategy"
                );
                return results;
            }
            Err(err) => {
                tracing::warn!(
                    batch_size = features.len(),
                    error = %err,
                    "batch prediction failed; pricing items individually"
                );
            }
        }

        let results = join_all(features.iter().map(|f| self.predict_price(f))).await;

        results
            .into_iter()
            .zip(features)
            .enumerate()
            .map(|(index, (res, f))| match res {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!(index, error = %err, "item could not be priced; keeping current price");
                    PricingResult::degraded(f.current_price)
                }
            })
            .collect()
    }
}

async fn bounded<T, F>(timeout: Duration, fut: F) -> Result<T, PricingError>
where
    F: Future<Output = Result<T, PricingError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res,
        Err(_) => Err(PricingError::unavailable(
            "timeout",
            format!("no response within {}ms", timeout.as_millis()),
        )),
    }
}

/// Turns a learned-strategy failure into the fallback result, or surfaces it.
pub(crate) fn recover(
    features: &FeatureVector,
    err: PricingError,
    fallback_enabled: bool,
) -> Result<PricingResult, PricingError> {
    if !err.is_service_unavailable() {
        return Err(err);
    }

    if fallback_enabled {
        tracing::info!(error = %err, "learned strategy unavailable; using fallback rules");
        Ok(fallback::recommend(features))
    } else {
        tracing::warn!(error = %err, "learned strategy unavailable and fallback disabled");
        Err(PricingError::PredictionUnavailable(err.to_string()))
    }
}
