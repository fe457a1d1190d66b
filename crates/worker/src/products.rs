use anyhow::Context;
use chrono::{DateTime, TimeZone};
use freshmark_core::config::PricingConfig;
use freshmark_core::domain::pricing::PricingResult;
use freshmark_core::domain::product::ProductRecord;
use freshmark_core::pricing::{assembler, fallback};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PricedProduct {
    pub id: Option<String>,
    pub name: String,
    pub result: Option<PricingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn load(path: &Path) -> anyhow::Result<Vec<ProductRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str::<Vec<ProductRecord>>(&text)
        .with_context(|| format!("{} is not a JSON array of product records", path.display()))
}

/// Prices `records` as of `now`. Without a config only the pricing rules are used.
pub async fn price_all<Tz: TimeZone>(
    records: Vec<ProductRecord>,
    now: &DateTime<Tz>,
    config: Option<&PricingConfig>,
) -> Vec<PricedProduct> {
    let mut out = Vec::with_capacity(records.len());
    let mut features = Vec::new();
    let mut slots = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match assembler::assemble(&record, now) {
            Ok(f) => {
                features.push(f);
                slots.push(index);
            }
            Err(err) => {
                tracing::warn!(product = %record.name, error = %err, "skipping product");
                out.push(PricedProduct {
                    id: record.id,
                    name: record.name,
                    result: None,
                    error: Some(err.to_string()),
                });
                continue;
            }
        }
        out.push(PricedProduct {
            id: record.id,
            name: record.name,
            result: None,
            error: None,
        });
    }

    let results = match config {
        Some(config) => freshmark_core::batch_predict_prices(&features, config).await,
        None => features.iter().map(fallback::recommend).collect(),
    };

    for (index, result) in slots.into_iter().zip(results) {
        out[index].result = Some(result);
    }

    tracing::info!(
        total = out.len(),
        priced = out.iter().filter(|p| p.result.is_some()).count(),
        "priced products"
    );
    out
}
