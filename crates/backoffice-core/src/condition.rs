//! Pricing conditions and receipts.
//!
//! A condition is the pricing/quantity policy a credit grant was purchased
//! under. Monetary values are integer cents to avoid floating point drift;
//! VAT rates are whole percent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ConditionId, GroupRef, ReportTypeId, RequesterId, TransactionId};

/// A pricing/quantity policy, e.g. `SE_VHR_SINGLE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Catalogue key.
    pub id: ConditionId,

    /// Requester (country) reference, if relevant.
    pub requester: Option<RequesterId>,

    /// Quantity limit, if relevant.
    pub qty_limit: Option<i64>,

    /// Expiration in days, if relevant.
    pub expiration_days: Option<i64>,

    /// Condition-specific threshold activating an account lock.
    pub lock_threshold: Option<i64>,

    /// Gross price in cents, if relevant.
    pub price_cents: Option<i64>,

    /// Net price in cents, if relevant.
    pub net_price_cents: Option<i64>,

    /// VAT rate in whole percent, if relevant.
    pub vat_rate_percent: Option<i64>,

    /// VAT value in cents, if relevant.
    pub vat_value_cents: Option<i64>,

    /// ISO currency code, if relevant.
    pub currency: Option<String>,
}

impl Condition {
    /// Create a condition carrying only a gross price.
    #[must_use]
    pub fn priced(id: ConditionId, price_cents: i64, currency: impl Into<String>) -> Self {
        Self {
            id,
            requester: None,
            qty_limit: None,
            expiration_days: None,
            lock_threshold: None,
            price_cents: Some(price_cents),
            net_price_cents: None,
            vat_rate_percent: None,
            vat_value_cents: None,
            currency: Some(currency.into()),
        }
    }

    /// Fill in the tax-related fields from the gross price.
    ///
    /// Applied once before persisting a condition that carries a gross price
    /// but no net price, VAT rate or VAT value. Swedish conditions (`SE`
    /// prefix) use a 25% rate, all others 19%. The net price is the gross
    /// price with VAT backed out, rounded to whole cents; the VAT value is
    /// the remainder, so the three fields always add up.
    pub fn derive_tax(&mut self) {
        let Some(price) = self.price_cents else {
            return;
        };
        if self.net_price_cents.is_some()
            || self.vat_rate_percent.is_some()
            || self.vat_value_cents.is_some()
        {
            return;
        }

        let rate: i64 = if self.id.as_str().starts_with("SE") {
            25
        } else {
            19
        };
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let net = (100.0 * price as f64 / (100 + rate) as f64).round() as i64;

        self.net_price_cents = Some(net);
        self.vat_rate_percent = Some(rate);
        self.vat_value_cents = Some(price - net);
    }
}

/// An issued receipt, freezing the purchase conditions of a transaction.
///
/// Receipts share the grouping-reference identity space: the receipt id is
/// expected to be an existing [`GroupRef`]. There is no storage constraint
/// tying the two together; the engine enforces it when issuing receipts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Receipt identifier (a grouping reference).
    pub id: GroupRef,

    /// The transaction the receipt was issued for.
    pub transaction: TransactionId,

    /// Gross price in cents.
    pub price_cents: i64,

    /// Net price in cents.
    pub net_price_cents: i64,

    /// VAT rate in whole percent.
    pub vat_rate_percent: i64,

    /// VAT value in cents.
    pub vat_value_cents: i64,

    /// ISO currency code.
    pub currency: String,
}

/// A report type catalogue entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportType {
    /// Catalogue key, e.g. `VHR_SE_SV_HTML`.
    pub id: ReportTypeId,
    /// Expiration in days, if relevant.
    pub expiration_days: Option<i64>,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
}
