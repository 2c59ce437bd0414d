//! Transactions: credit grants, report pulls and everything between.
//!
//! The transaction kind is a raw numeric code owned by the frontend; this
//! layer only reserves two regions of it: `1xx` codes are credit grants and
//! `200` is a report pull. Anything else passes through untouched and is
//! ignored by the aggregator.

use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, ConditionId, GroupRef, ReportId, RequesterId, TransactionId};

/// Kind codes reserved for credit grants (upper bound exclusive).
pub const CREDIT_GRANT_KINDS: Range<i32> = 100..199;

/// Kind code of a report pull.
pub const REPORT_PULL_KIND: i32 = 200;

/// A transaction record.
///
/// Related transactions are grouped by a shared [`GroupRef`] rather than by
/// a direct foreign key: a credit grant and the pulls spent against it all
/// carry the same grouping reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Row identifier. Sequence-assigned, so descending order is
    /// newest-first.
    pub id: TransactionId,

    /// Grouping reference correlating related transactions.
    pub group_ref: GroupRef,

    /// The company's account.
    pub account: AccountId,

    /// The employee's account (B2B only).
    pub sub_account: Option<AccountId>,

    /// Raw transaction kind code.
    pub kind: i32,

    /// Requester (website) reference.
    pub requester: Option<RequesterId>,

    /// Pricing condition the transaction was made under.
    pub condition: Option<ConditionId>,

    /// Report related directly to the transaction, if any.
    pub report: Option<ReportId>,

    /// External transaction reference.
    pub ext_t_ref: Option<String>,

    /// Quantity, if relevant (granted credits for a credit grant).
    pub qty: Option<i64>,

    /// Expiration date, if any.
    pub expires_on: Option<DateTime<Utc>>,

    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

impl Transaction {
    /// Create a credit grant of `qty` credits under `condition`.
    #[must_use]
    pub fn credit_grant(
        id: TransactionId,
        group_ref: GroupRef,
        account: AccountId,
        kind: i32,
        condition: ConditionId,
        qty: i64,
    ) -> Self {
        debug_assert!(CREDIT_GRANT_KINDS.contains(&kind));
        Self {
            id,
            group_ref,
            account,
            sub_account: None,
            kind,
            requester: None,
            condition: Some(condition),
            report: None,
            ext_t_ref: None,
            qty: Some(qty),
            expires_on: None,
            created: Utc::now(),
        }
    }

    /// Create a report pull consuming one credit from the grant sharing
    /// `group_ref`.
    #[must_use]
    pub fn report_pull(
        id: TransactionId,
        group_ref: GroupRef,
        account: AccountId,
        report: Option<ReportId>,
    ) -> Self {
        Self {
            id,
            group_ref,
            account,
            sub_account: None,
            kind: REPORT_PULL_KIND,
            requester: None,
            condition: None,
            report,
            ext_t_ref: None,
            qty: None,
            expires_on: None,
            created: Utc::now(),
        }
    }

    /// Whether this transaction grants credits.
    #[must_use]
    pub fn is_credit_grant(&self) -> bool {
        CREDIT_GRANT_KINDS.contains(&self.kind)
    }

    /// Whether this transaction consumes a credit to pull a report.
    #[must_use]
    pub const fn is_report_pull(&self) -> bool {
        self.kind == REPORT_PULL_KIND
    }
}

/// Remaining balance of a credit grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingCredits {
    /// Granted quantity minus pulls sharing the grouping reference. May go
    /// negative if more pulls were recorded than credits granted.
    Count(i64),
    /// Balance not tracked by count: the grant's condition is unlimited.
    Unlimited,
}
