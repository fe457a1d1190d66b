use crate::config::{PricingConfig, ServicePaths};
use crate::domain::contract::{
    BatchPredictRequest, BatchPredictionResponse, HealthStatus, ModelInfo, PredictionResponse,
};
use crate::domain::features::FeatureVector;
use crate::domain::pricing::PricingResult;
use crate::error::PricingError;
use crate::pricing::PricePredictor;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the external model-serving endpoint.
#[derive(Debug, Clone)]
pub struct HttpPricingService {
    http: reqwest::Client,
    base_url: String,
    paths: ServicePaths,
}

impl HttpPricingService {
    pub fn from_config(config: &PricingConfig) -> Result<Self, PricingError> {
        let base_url = config.service_endpoint.trim();
        if base_url.is_empty() {
            return Err(PricingError::unavailable(
                "request",
                "prediction service endpoint is not configured",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PricingError::unavailable("request", format!("failed to build http client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            paths: config.paths.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, PricingError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let res = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(request_error)?;

        decode(res).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PricingError> {
        let res = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(request_error)?;

        decode(res).await
    }
}

#[async_trait::async_trait]
impl PricePredictor for HttpPricingService {
    fn name(&self) -> &'static str {
        "ml_service_http"
    }

    async fn predict(&self, features: &FeatureVector) -> Result<PricingResult, PricingError> {
        let res: PredictionResponse = self.post_json(&self.paths.predict, features).await?;
        res.validate_and_into_result(features)
    }

    async fn predict_batch(
        &self,
        features: &[FeatureVector],
    ) -> Result<Vec<PricingResult>, PricingError> {
        let req = BatchPredictRequest { products: features };
        let res: BatchPredictionResponse = self.post_json(&self.paths.batch, &req).await?;
        res.validate_and_into_results(features)
    }

    async fn health(&self) -> Result<HealthStatus, PricingError> {
        let res = self
            .http
            .get(self.url(&self.paths.health))
            .send()
            .await
            .map_err(request_error)?;

        let status = res.status();
        if !status.is_success() {
            return Err(PricingError::unavailable("http", format!("status={status}")));
        }

        // Any 2xx counts as reachable; the body is informational.
        let text = res.text().await.unwrap_or_default();
        Ok(serde_json::from_str::<HealthStatus>(&text).unwrap_or_default())
    }

    async fn model_info(&self) -> Result<ModelInfo, PricingError> {
        self.get_json(&self.paths.model_info).await
    }
}

fn request_error(err: reqwest::Error) -> PricingError {
    if err.is_timeout() {
        PricingError::unavailable("timeout", err.to_string())
    } else {
        PricingError::unavailable("request", err.to_string())
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, PricingError> {
    let status = res.status();
    let text = res.text().await.map_err(request_error)?;

    if !status.is_success() {
        return Err(PricingError::unavailable(
            "http",
            format!("status={status} body={text}"),
        ));
    }

    serde_json::from_str::<T>(&text).map_err(|e| {
        PricingError::unavailable("decode", format!("invalid response JSON ({e}): {text}"))
    })
}
