use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted product shape as exported by the inventory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "currentPrice")]
    pub current_price: Option<f64>,
    #[serde(default, alias = "stockLevel")]
    pub stock_level: Option<i64>,
    #[serde(default, alias = "demandScore")]
    pub demand_score: Option<f64>,
    #[serde(default, alias = "historicalSales")]
    pub historical_sales: Option<f64>,
    #[serde(default, alias = "expiryDate")]
    pub expiry_date: Option<DateTime<Utc>>,
}
