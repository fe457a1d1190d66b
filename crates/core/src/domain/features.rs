use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dairy,
    Meat,
    Vegetables,
    Fruits,
    Bakery,
    Seafood,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Dairy,
        Category::Meat,
        Category::Vegetables,
        Category::Fruits,
        Category::Bakery,
        Category::Seafood,
        Category::Other,
    ];

    /// Case-insensitive; anything unrecognised is `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dairy" => Category::Dairy,
            "meat" => Category::Meat,
            "vegetables" => Category::Vegetables,
            "fruits" => Category::Fruits,
            "bakery" => Category::Bakery,
            "seafood" => Category::Seafood,
            _ => Category::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Bakery => "bakery",
            Category::Seafood => "seafood",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse_lenient(&s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Some(DayOfWeek::Monday),
            "tuesday" => Some(DayOfWeek::Tuesday),
            "wednesday" => Some(DayOfWeek::Wednesday),
            "thursday" => Some(DayOfWeek::Thursday),
            "friday" => Some(DayOfWeek::Friday),
            "saturday" => Some(DayOfWeek::Saturday),
            "sunday" => Some(DayOfWeek::Sunday),
            _ => None,
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Pricing-decision input. Serialises to the prediction service request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub current_price: f64,
    pub days_to_expiry: i64,
    pub stock_level: u32,
    pub demand_score: f64,
    pub category: Category,
    pub historical_sales: f64,
    pub day_of_week: DayOfWeek,
}

/// Boundary shape for callers that may omit fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureInput {
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub days_to_expiry: Option<i64>,
    #[serde(default)]
    pub stock_level: Option<i64>,
    #[serde(default)]
    pub demand_score: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub historical_sales: Option<f64>,
    #[serde(default)]
    pub day_of_week: Option<String>,
}

impl TryFrom<FeatureInput> for FeatureVector {
    type Error = PricingError;

    fn try_from(input: FeatureInput) -> Result<Self, Self::Error> {
        let current_price = input
            .current_price
            .ok_or(PricingError::MissingField("current_price"))?;
        let days_to_expiry = input
            .days_to_expiry
            .ok_or(PricingError::MissingField("days_to_expiry"))?;
        let stock_level = input
            .stock_level
            .ok_or(PricingError::MissingField("stock_level"))?;
        let demand_score = input
            .demand_score
            .ok_or(PricingError::MissingField("demand_score"))?;

        if !current_price.is_finite() || current_price < 0.0 {
            return Err(PricingError::invalid(
                "current_price",
                format!("must be a non-negative number (got {current_price})"),
            ));
        }
        if !(0.0..=1.0).contains(&demand_score) {
            return Err(PricingError::invalid(
                "demand_score",
                format!("must be between 0 and 1 (got {demand_score})"),
            ));
        }
        let stock_level = u32::try_from(stock_level).map_err(|_| {
            PricingError::invalid(
                "stock_level",
                format!("must be a non-negative integer (got {stock_level})"),
            )
        })?;

        let historical_sales = input.historical_sales.unwrap_or(0.0);
        if !historical_sales.is_finite() || historical_sales < 0.0 {
            return Err(PricingError::invalid(
                "historical_sales",
                format!("must be a non-negative number (got {historical_sales})"),
            ));
        }

        let day_of_week = match input.day_of_week.as_deref() {
            None => DayOfWeek::default(),
            Some(s) => DayOfWeek::parse(s)
                .ok_or_else(|| PricingError::invalid("day_of_week", format!("unknown day: {s}")))?,
        };

        let category = input
            .category
            .as_deref()
            .map(Category::parse_lenient)
            .unwrap_or(Category::Other);

        Ok(FeatureVector {
            current_price,
            days_to_expiry,
            stock_level,
            demand_score,
            category,
            historical_sales,
            day_of_week,
        })
    }
}
