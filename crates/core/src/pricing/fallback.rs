//! Rule-based pricing. Pure and always available.

use crate::domain::features::{Category, FeatureInput, FeatureVector};
use crate::domain::pricing::{floor_and_round, PricingMethod, PricingResult};
use crate::error::PricingError;

pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Expiry tiers by ascending `days_to_expiry` threshold; the first match wins.
const EXPIRY_TIERS: [(i64, f64, &str); 4] = [
    (0, 0.1, "expired_product"),
    (1, 0.3, "critical_expiry"),
    (3, 0.6, "approaching_expiry"),
    (7, 0.8, "week_to_expiry"),
];

const LOW_DEMAND_BELOW: f64 = 0.2;
const HIGH_DEMAND_ABOVE: f64 = 0.8;
const HIGH_STOCK_ABOVE: u32 = 100;
const LOW_STOCK_BELOW: u32 = 10;

pub fn category_multiplier(category: Category) -> f64 {
    match category {
        Category::Dairy => 0.95,
        Category::Meat => 1.0,
        Category::Vegetables => 0.9,
        Category::Fruits => 0.9,
        Category::Bakery => 0.85,
        Category::Seafood => 1.05,
        Category::Other => 1.0,
    }
}

pub fn recommend(features: &FeatureVector) -> PricingResult {
    let mut price = features.current_price;
    let mut factors = Vec::with_capacity(4);

    if let Some((_, multiplier, tag)) = EXPIRY_TIERS
        .iter()
        .find(|(max_days, _, _)| features.days_to_expiry <= *max_days)
    {
        price *= multiplier;
        factors.push((*tag).to_string());
    }

    if features.demand_score < LOW_DEMAND_BELOW {
        price *= 0.85;
        factors.push("low_demand".to_string());
    } else if features.demand_score > HIGH_DEMAND_ABOVE {
        price *= 1.1;
        factors.push("high_demand".to_string());
    }

    if features.stock_level > HIGH_STOCK_ABOVE {
        price *= 0.9;
        factors.push("high_stock".to_string());
    } else if features.stock_level < LOW_STOCK_BELOW {
        price *= 1.05;
        factors.push("low_stock".to_string());
    }

    price *= category_multiplier(features.category);
    factors.push(format!("category_{}", features.category));

    PricingResult {
        recommended_price: floor_and_round(price, features.current_price),
        confidence: FALLBACK_CONFIDENCE,
        factors,
        method: PricingMethod::FallbackRules,
    }
}

pub fn recommend_from_input(input: FeatureInput) -> Result<PricingResult, PricingError> {
    let features = FeatureVector::try_from(input)?;
    Ok(recommend(&features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::DayOfWeek;
    use crate::domain::pricing::round_cents;
    use proptest::prelude::*;
    use serde_json::json;

    fn vector(
        current_price: f64,
        days_to_expiry: i64,
        demand_score: f64,
        stock_level: u32,
        category: Category,
    ) -> FeatureVector {
        FeatureVector {
            current_price,
            days_to_expiry,
            stock_level,
            demand_score,
            category,
            historical_sales: 0.0,
            day_of_week: DayOfWeek::Monday,
        }
    }

    #[test]
    fn expired_meat_drops_to_ten_percent() {
        let r = recommend(&vector(100.0, 0, 0.5, 50, Category::Meat));
        assert_eq!(r.recommended_price, 10.0);
        assert_eq!(r.confidence, 0.7);
        assert_eq!(r.method, PricingMethod::FallbackRules);
        assert_eq!(r.factors, vec!["expired_product", "category_meat"]);
    }

    #[test]
    fn adjustments_compound_in_order() {
        let r = recommend(&vector(100.0, 5, 0.1, 150, Category::Dairy));
        assert_eq!(r.recommended_price, 58.14);
        assert_eq!(
            r.factors,
            vec!["week_to_expiry", "low_demand", "high_stock", "category_dairy"]
        );
    }

    #[test]
    fn expired_products_land_exactly_on_floor() {
        let meat = recommend(&vector(3.0, 0, 0.5, 50, Category::Meat));
        assert_eq!(meat.recommended_price, 0.3);

        // 3.00 * 0.1 * 0.95 falls under the floor and is lifted back to it.
        let dairy = recommend(&vector(3.0, 0, 0.5, 50, Category::Dairy));
        assert_eq!(dairy.recommended_price, 0.3);

        let bakery = recommend(&vector(7.0, -1, 0.1, 150, Category::Bakery));
        assert_eq!(bakery.recommended_price, 0.7);
    }

    #[test]
    fn fresh_scarce_seafood_gets_premium() {
        let r = recommend(&vector(40.0, 30, 0.9, 5, Category::Seafood));
        // 40 * 1.1 * 1.05 * 1.05
        assert_eq!(r.recommended_price, 48.51);
        assert_eq!(r.factors, vec!["high_demand", "low_stock", "category_seafood"]);
    }

    #[test]
    fn expiry_tiers_are_mutually_exclusive() {
        let cases = [
            (-3, 10.0, "expired_product"),
            (1, 30.0, "critical_expiry"),
            (2, 60.0, "approaching_expiry"),
            (3, 60.0, "approaching_expiry"),
            (7, 80.0, "week_to_expiry"),
        ];
        for (days, expected, tag) in cases {
            let r = recommend(&vector(100.0, days, 0.5, 50, Category::Other));
            assert_eq!(r.recommended_price, expected, "days={days}");
            assert_eq!(r.factors[0], tag);
            assert_eq!(r.factors.len(), 2);
        }

        let r = recommend(&vector(100.0, 8, 0.5, 50, Category::Other));
        assert_eq!(r.recommended_price, 100.0);
        assert_eq!(r.factors, vec!["category_other"]);
    }

    #[test]
    fn boundary_demand_and_stock_are_neutral() {
        let r = recommend(&vector(50.0, 10, 0.2, 10, Category::Meat));
        assert_eq!(r.recommended_price, 50.0);
        let r = recommend(&vector(50.0, 10, 0.8, 100, Category::Meat));
        assert_eq!(r.recommended_price, 50.0);
    }

    #[test]
    fn every_category_has_a_tag() {
        for category in Category::ALL {
            let r = recommend(&vector(10.0, 30, 0.5, 50, category));
            assert_eq!(r.factors, vec![format!("category_{category}")]);
        }
    }

    #[test]
    fn input_missing_price_is_reported() {
        let input: FeatureInput = serde_json::from_value(json!({
            "days_to_expiry": 2,
            "stock_level": 10,
            "demand_score": 0.3,
            "category": "bakery",
        }))
        .unwrap();

        let err = recommend_from_input(input).unwrap_err();
        assert!(matches!(err, PricingError::MissingField("current_price")));
    }

    #[test]
    fn input_with_unknown_category_is_neutral() {
        let input: FeatureInput = serde_json::from_value(json!({
            "current_price": 8.0,
            "days_to_expiry": 20,
            "stock_level": 40,
            "demand_score": 0.5,
            "category": "frozen",
        }))
        .unwrap();

        let r = recommend_from_input(input).unwrap();
        assert_eq!(r.recommended_price, 8.0);
        assert_eq!(r.factors, vec!["category_other"]);
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    /// Straight-line restatement of the pricing steps, before floor and rounding.
    fn running_price(v: &FeatureVector) -> f64 {
        let mut price = v.current_price;
        price *= if v.days_to_expiry <= 0 {
            0.1
        } else if v.days_to_expiry <= 1 {
            0.3
        } else if v.days_to_expiry <= 3 {
            0.6
        } else if v.days_to_expiry <= 7 {
            0.8
        } else {
            1.0
        };
        if v.demand_score < 0.2 {
            price *= 0.85;
        } else if v.demand_score > 0.8 {
            price *= 1.1;
        }
        if v.stock_level > 100 {
            price *= 0.9;
        } else if v.stock_level < 10 {
            price *= 1.05;
        }
        price * category_multiplier(v.category)
    }

    proptest! {
        #[test]
        fn floor_and_cents_hold(
            current_price in 0.0f64..10_000.0,
            days_to_expiry in -30i64..60,
            demand_score in 0.0f64..=1.0,
            stock_level in 0u32..500,
            category in arb_category(),
        ) {
            let r = recommend(&vector(current_price, days_to_expiry, demand_score, stock_level, category));
            prop_assert!(r.recommended_price >= 0.1 * current_price - 1e-9);
            let cents = r.recommended_price * 100.0;
            prop_assert!((cents - cents.round()).abs() < 1e-6);
        }

        #[test]
        fn matches_floor_then_round(
            cents in 1u32..1_000_000,
            days_to_expiry in -30i64..60,
            demand_score in 0.0f64..=1.0,
            stock_level in 0u32..500,
            category in arb_category(),
        ) {
            let current_price = f64::from(cents) / 100.0;
            let v = vector(current_price, days_to_expiry, demand_score, stock_level, category);
            let floor = 0.1 * current_price;
            let plain = round_cents(running_price(&v).max(floor));
            // Rounding may only be lifted by one cent, and only off a real sub-cent floor.
            let expected = if plain < floor - 1e-9 { plain + 0.01 } else { plain };

            let r = recommend(&v);
            prop_assert!(
                (r.recommended_price - expected).abs() < 1e-9,
                "got {} expected {} for {:?}", r.recommended_price, expected, v
            );
        }
    }
}
