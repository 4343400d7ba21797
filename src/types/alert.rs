use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comparison direction of a price alert. Serialized as the literal operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlertOperator {
    #[default]
    #[serde(rename = "<=")]
    AtOrBelow,
    #[serde(rename = ">=")]
    AtOrAbove,
}

impl AlertOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertOperator::AtOrBelow => "<=",
            AlertOperator::AtOrAbove => ">=",
        }
    }

    /// Strict parse: only the two literals are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "<=" => Some(AlertOperator::AtOrBelow),
            ">=" => Some(AlertOperator::AtOrAbove),
            _ => None,
        }
    }

    /// Creation-time parse: anything unrecognised becomes `<=`.
    pub fn coerce(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub symbol: String,
    pub asset_type: String,
    pub alert_price: f64,
    pub operator: AlertOperator,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_notified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /priceAlerts`. `operator` is free text until coerced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAlertRequest {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub alert_price: f64,
    #[serde(default)]
    pub operator: String,
}

/// Body of `PUT /priceAlerts/{symbol}/{asset_type}`; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAlertRequest {
    pub alert_price: Option<f64>,
    pub operator: Option<String>,
    pub is_active: Option<bool>,
}

/// A validated alert definition, ready to upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub symbol: String,
    pub asset_type: String,
    pub alert_price: f64,
    pub operator: AlertOperator,
}

/// Result of evaluating one stored alert against an observed price.
#[derive(Debug, Clone, Serialize)]
pub struct AlertCheck {
    pub alert: PriceAlert,
    pub observed_price: f64,
    pub fires: bool,
}
