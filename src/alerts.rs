//! Price alert evaluation and mutation rules.
//!
//! The evaluator is stateless per call. Writing `last_notified_at` (and
//! clearing it to re-arm an alert) belongs to the external dispatcher.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::types::alert::{
    AlertCheck, AlertOperator, CreateAlertRequest, NewAlert, PriceAlert, UpdateAlertRequest,
};

/// True when the alert is active and `observed_price` is on the triggering
/// side of the threshold (inclusive).
pub fn should_fire(alert: &PriceAlert, observed_price: f64) -> bool {
    if !alert.is_active {
        return false;
    }
    match alert.operator {
        AlertOperator::AtOrBelow => observed_price <= alert.alert_price,
        AlertOperator::AtOrAbove => observed_price >= alert.alert_price,
    }
}

pub fn check(alert: PriceAlert, observed_price: f64) -> AlertCheck {
    let fires = should_fire(&alert, observed_price);
    AlertCheck {
        alert,
        observed_price,
        fires,
    }
}

/// Validate a create request. Symbol, asset type and a positive price are
/// required; an unknown operator is coerced to `<=`.
pub fn validate_new_alert(req: CreateAlertRequest) -> Result<NewAlert, AppError> {
    if req.symbol.is_empty() || req.asset_type.is_empty() || !(req.alert_price > 0.0) {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    let operator = AlertOperator::coerce(&req.operator);
    if operator.as_str() != req.operator {
        tracing::debug!(
            symbol = %req.symbol,
            given = %req.operator,
            "alert operator coerced to <="
        );
    }
    Ok(NewAlert {
        symbol: req.symbol,
        asset_type: req.asset_type,
        alert_price: req.alert_price,
        operator,
    })
}

/// Fields of a partial update that survived validation. `updated_at` is
/// refreshed whether or not any of them is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlertPatch {
    pub alert_price: Option<f64>,
    pub operator: Option<AlertOperator>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedField {
    AlertPrice,
    Operator,
}

impl AlertPatch {
    /// Lenient: a non-positive price or an unknown operator is dropped, not
    /// rejected. Dropped fields are returned so callers can report them.
    pub fn from_request(req: &UpdateAlertRequest) -> (Self, Vec<SkippedField>) {
        let mut skipped = Vec::new();

        let alert_price = match req.alert_price {
            Some(p) if p > 0.0 => Some(p),
            Some(_) => {
                skipped.push(SkippedField::AlertPrice);
                None
            }
            None => None,
        };

        let operator = match req.operator.as_deref() {
            None | Some("") => None,
            Some(op) => match AlertOperator::parse(op) {
                Some(parsed) => Some(parsed),
                None => {
                    skipped.push(SkippedField::Operator);
                    None
                }
            },
        };

        let patch = Self {
            alert_price,
            operator,
            is_active: req.is_active,
        };
        (patch, skipped)
    }

    pub fn is_empty(&self) -> bool {
        self.alert_price.is_none() && self.operator.is_none() && self.is_active.is_none()
    }

    pub fn apply(&self, alert: &mut PriceAlert, now: DateTime<Utc>) {
        if let Some(price) = self.alert_price {
            alert.alert_price = price;
        }
        if let Some(op) = self.operator {
            alert.operator = op;
        }
        if let Some(active) = self.is_active {
            alert.is_active = active;
        }
        alert.updated_at = now;
    }
}

/// Plan an update and log whatever was skipped.
pub fn plan_update(symbol: &str, asset_type: &str, req: &UpdateAlertRequest) -> AlertPatch {
    let (patch, skipped) = AlertPatch::from_request(req);
    for field in skipped {
        tracing::warn!(symbol, asset_type, ?field, "ignoring invalid alert update field");
    }
    patch
}

/// Create-or-reactivate: overwrite price and operator, force active, refresh
/// `updated_at`. `created_at` and `last_notified_at` survive.
pub fn upsert_into(existing: Option<&PriceAlert>, new: &NewAlert, now: DateTime<Utc>) -> PriceAlert {
    match existing {
        Some(prev) => PriceAlert {
            alert_price: new.alert_price,
            operator: new.operator,
            is_active: true,
            updated_at: now,
            ..prev.clone()
        },
        None => PriceAlert {
            symbol: new.symbol.clone(),
            asset_type: new.asset_type.clone(),
            alert_price: new.alert_price,
            operator: new.operator,
            is_active: true,
            last_notified_at: None,
            created_at: now,
            updated_at: now,
        },
    }
}
