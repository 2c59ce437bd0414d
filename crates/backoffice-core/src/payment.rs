//! Frontend payment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PaymentId;

/// A payment item imported from the web shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentItem {
    /// Payment item identifier (`cpid`). Sequence-assigned, so descending
    /// order is newest-first.
    pub cpid: PaymentId,

    /// Payment-provider order id.
    pub coid: String,

    /// Customer e-mail address.
    pub mail: String,

    /// Paid amount in cents.
    pub amount_cents: i64,

    /// Purchased package name.
    pub package: String,

    /// Single-character payment status code.
    pub status: char,

    /// Payment timestamp.
    pub timestamp: DateTime<Utc>,

    /// Vehicle identifier the payment relates to, if any.
    pub vin: Option<String>,

    /// Report reference the payment relates to, if any.
    pub report_ref: Option<String>,
}
