//! Viatel premium-rate-SMS code redemption records.
//!
//! Codes are generated in batches, each batch carrying a validity window and
//! the pricing condition a redeemed code grants. A separate used-code marker
//! keeps redemption one-shot. The call log stores what the premium-rate
//! provider's HTTP notification listener received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BatchId, ConditionId, RedemptionCode};

/// Inactivity bits carried by a [`ViatelBatch`].
pub mod inactive_bits {
    /// Batch generated for testing only.
    pub const TEST: u32 = 1;
    /// Batch was cancelled.
    pub const CANCELLED: u32 = 2;
}

/// A code generation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViatelBatch {
    /// Generation batch reference (primary key).
    pub batch: BatchId,

    /// Codes are valid from this instant, if set.
    pub valid_from: Option<DateTime<Utc>>,

    /// Codes are valid until this instant, if set.
    pub valid_to: Option<DateTime<Utc>>,

    /// Bit-encoded inactivity flags, see [`inactive_bits`].
    pub inactive: u32,

    /// Condition granted by redeeming a code of this batch.
    pub condition: Option<ConditionId>,

    /// Premium rate number the codes are sold through.
    pub prn: Option<String>,

    /// Free-form comment.
    pub comment: Option<String>,
}

impl ViatelBatch {
    /// Create an active batch granting `condition`.
    #[must_use]
    pub fn new(batch: BatchId, condition: ConditionId) -> Self {
        Self {
            batch,
            valid_from: None,
            valid_to: None,
            inactive: 0,
            condition: Some(condition),
            prn: None,
            comment: None,
        }
    }

    /// Whether codes of this batch may be redeemed at `now`.
    ///
    /// A batch is redeemable when none of its inactivity bits are set and
    /// `now` falls inside its validity window (open bounds are unbounded).
    #[must_use]
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.inactive == 0
            && self.valid_from.map_or(true, |from| now >= from)
            && self.valid_to.map_or(true, |to| now <= to)
    }
}

/// A generated redemption code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViatelCode {
    /// The code (primary key).
    pub code: RedemptionCode,
    /// The batch the code was generated in.
    pub batch: BatchId,
}

/// A premium-rate call notification, as received from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViatelLog {
    /// Row identifier.
    pub id: i64,

    /// Called premium rate number.
    pub prn: String,

    /// Caller input, normally the redemption code.
    pub input: Option<String>,

    /// Caller number, if disclosed.
    pub caller: Option<String>,

    /// Call finish timestamp.
    pub time: DateTime<Utc>,

    /// Call cost in cents.
    pub rate_cents: i64,

    /// ISO currency code.
    pub currency: String,

    /// `PPC` (price per call) or `PPM` (price per minute).
    pub ratetype: String,

    /// Call duration in seconds.
    pub duration_seconds: i64,

    /// Message repetition counter (0 = said once).
    pub repeats: i64,

    /// Whether the caller number was protected.
    pub protected: bool,

    /// Log creation timestamp.
    pub created: DateTime<Utc>,
}
