pub mod domain;
pub mod error;
pub mod pricing;
pub mod time;

pub use error::PricingError;
pub use pricing::{batch_predict_prices, predict_price};

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub ml_service_url: Option<String>,
        pub ml_service_timeout_ms: u64,
        pub fallback_enabled: bool,
        pub ml_predict_path: Option<String>,
        pub ml_batch_path: Option<String>,
        pub ml_health_path: Option<String>,
        pub ml_model_info_path: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let ml_service_timeout_ms = match non_empty_var("ML_SERVICE_TIMEOUT_MS") {
                Some(s) => s
                    .parse::<u64>()
                    .with_context(|| format!("ML_SERVICE_TIMEOUT_MS is not a number: {s}"))?,
                None => DEFAULT_TIMEOUT_MS,
            };

            let fallback_enabled = match non_empty_var("PRICING_FALLBACK_ENABLED") {
                Some(s) => parse_flag(&s)
                    .with_context(|| format!("PRICING_FALLBACK_ENABLED is not a boolean: {s}"))?,
                None => true,
            };

            Ok(Self {
                ml_service_url: non_empty_var("ML_SERVICE_URL"),
                ml_service_timeout_ms,
                fallback_enabled,
                ml_predict_path: non_empty_var("ML_PREDICT_PATH"),
                ml_batch_path: non_empty_var("ML_BATCH_PATH"),
                ml_health_path: non_empty_var("ML_HEALTH_PATH"),
                ml_model_info_path: non_empty_var("ML_MODEL_INFO_PATH"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_ml_service_url(&self) -> anyhow::Result<&str> {
            self.ml_service_url
                .as_deref()
                .context("ML_SERVICE_URL is required")
        }
    }

    /// Read-only configuration handed to the strategy selector.
    #[derive(Debug, Clone)]
    pub struct PricingConfig {
        pub service_endpoint: String,
        pub timeout: Duration,
        pub fallback_enabled: bool,
        pub paths: ServicePaths,
    }

    impl PricingConfig {
        pub fn new(service_endpoint: impl Into<String>) -> Self {
            Self {
                service_endpoint: service_endpoint.into(),
                timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
                fallback_enabled: true,
                paths: ServicePaths::default(),
            }
        }

        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        pub fn with_fallback(mut self, enabled: bool) -> Self {
            self.fallback_enabled = enabled;
            self
        }

        pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
            let endpoint = settings.require_ml_service_url()?;
            let mut paths = ServicePaths::default();
            if let Some(p) = &settings.ml_predict_path {
                paths.predict = p.clone();
            }
            if let Some(p) = &settings.ml_batch_path {
                paths.batch = p.clone();
            }
            if let Some(p) = &settings.ml_health_path {
                paths.health = p.clone();
            }
            if let Some(p) = &settings.ml_model_info_path {
                paths.model_info = p.clone();
            }

            Ok(Self {
                service_endpoint: endpoint.to_string(),
                timeout: Duration::from_millis(settings.ml_service_timeout_ms),
                fallback_enabled: settings.fallback_enabled,
                paths,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ServicePaths {
        pub predict: String,
        pub batch: String,
        pub health: String,
        pub model_info: String,
    }

    impl Default for ServicePaths {
        fn default() -> Self {
            Self {
                predict: "/predict-price".to_string(),
                batch: "/batch-predict".to_string(),
                health: "/health".to_string(),
                model_info: "/model-info".to_string(),
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn parse_flag(s: &str) -> Option<bool> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

}
