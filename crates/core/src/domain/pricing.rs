use serde::{Deserialize, Serialize};

/// Fraction of the current price below which no recommendation may go.
pub const PRICE_FLOOR_RATIO: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMethod {
    MlPrediction,
    FallbackRules,
    /// Neither strategy produced a price; the current price is echoed back.
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub recommended_price: f64,
    pub confidence: f64,
    pub factors: Vec<String>,
    pub method: PricingMethod,
}

impl PricingResult {
    pub fn degraded(current_price: f64) -> Self {
        Self {
            recommended_price: round_cents(current_price),
            confidence: 0.0,
            factors: vec!["prediction_unavailable".to_string()],
            method: PricingMethod::Degraded,
        }
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Float noise tolerated when comparing a rounded price against the floor.
pub const FLOOR_TOLERANCE: f64 = 1e-9;

/// Applies the 10% floor and rounds to cents.
///
/// Only when rounding drops a genuine sub-cent fraction below the floor is the
/// result bumped to the next cent; noise such as `3.0 * 0.1` does not count.
pub fn floor_and_round(price: f64, current_price: f64) -> f64 {
    let floor = current_price * PRICE_FLOOR_RATIO;
    let rounded = round_cents(price.max(floor));
    if rounded < floor - FLOOR_TOLERANCE {
        (floor * 100.0 - 1e-6).ceil() / 100.0
    } else {
        rounded
    }
}
