use crate::domain::features::{FeatureInput, FeatureVector};
use crate::domain::product::ProductRecord;
use crate::error::PricingError;
use crate::time::expiry;
use chrono::{DateTime, Local, TimeZone};

/// Projects a stored product onto the pricing features as of `now`.
pub fn assemble<Tz: TimeZone>(
    record: &ProductRecord,
    now: &DateTime<Tz>,
) -> Result<FeatureVector, PricingError> {
    let expiry_date = record
        .expiry_date
        .ok_or(PricingError::MissingField("expiry_date"))?;

    let input = FeatureInput {
        current_price: record.current_price,
        days_to_expiry: Some(expiry::days_to_expiry(expiry_date, now)),
        stock_level: record.stock_level,
        demand_score: record.demand_score,
        category: record.category.clone(),
        historical_sales: record.historical_sales,
        day_of_week: None,
    };

    let mut features = FeatureVector::try_from(input)?;
    features.day_of_week = expiry::day_of_week(now);
    Ok(features)
}

pub fn assemble_now(record: &ProductRecord) -> Result<FeatureVector, PricingError> {
    assemble(record, &Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{Category, DayOfWeek};
    use chrono::Utc;

    fn record() -> ProductRecord {
        ProductRecord {
            id: Some("p-1".to_string()),
            name: "Sourdough loaf".to_string(),
            category: Some("Bakery".to_string()),
            current_price: Some(6.0),
            stock_level: Some(12),
            demand_score: Some(0.45),
            historical_sales: None,
            expiry_date: Some(Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap()),
        }
    }

    #[test]
    fn assembles_features_from_record() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let v = assemble(&record(), &now).unwrap();
        assert_eq!(v.current_price, 6.0);
        assert_eq!(v.days_to_expiry, 2);
        assert_eq!(v.stock_level, 12);
        assert_eq!(v.category, Category::Bakery);
        assert_eq!(v.historical_sales, 0.0);
        assert_eq!(v.day_of_week, DayOfWeek::Saturday);
    }

    #[test]
    fn expired_record_yields_negative_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 22, 9, 0, 0).unwrap();
        let v = assemble(&record(), &now).unwrap();
        assert_eq!(v.days_to_expiry, -3);
        assert_eq!(v.day_of_week, DayOfWeek::Thursday);
    }

    #[test]
    fn missing_expiry_is_reported() {
        let mut r = record();
        r.expiry_date = None;
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let err = assemble(&r, &now).unwrap_err();
        assert!(matches!(err, PricingError::MissingField("expiry_date")));
    }

    #[test]
    fn missing_demand_is_reported() {
        let mut r = record();
        r.demand_score = None;
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let err = assemble(&r, &now).unwrap_err();
        assert!(matches!(err, PricingError::MissingField("demand_score")));
    }
}
