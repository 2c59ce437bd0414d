//! Report records, live and archived.
//!
//! A report is the artifact produced when a credit is consumed. Live reports
//! sit in the primary table; a retention policy external to this layer moves
//! them to the parallel archival entity, recording the maintenance batch that
//! did so and linking them back to their pull transactions through a join
//! table (see the store's `transaction_reports` operations).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, BatchId, ReportId, ReportToken, ReportTypeId};

/// A live report record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Row identifier.
    pub id: ReportId,

    /// Owning account.
    pub account: AccountId,

    /// Report type.
    pub report_type: ReportTypeId,

    /// Report reference, usually a VIN.
    pub report_ref: String,

    /// The original user query.
    pub query: String,

    /// Expiration date, if any.
    pub expires_on: Option<DateTime<Utc>>,

    /// Creation timestamp.
    pub created: DateTime<Utc>,

    /// Parent report for linked reports (like US links).
    pub parent: Option<ReportId>,

    /// Token backing external report-view URLs.
    pub token: Option<ReportToken>,
}

impl Report {
    /// Create a report for an account, with the reference doubling as the
    /// query.
    #[must_use]
    pub fn new(
        id: ReportId,
        account: AccountId,
        report_type: ReportTypeId,
        report_ref: impl Into<String>,
    ) -> Self {
        let report_ref = report_ref.into();
        Self {
            id,
            account,
            report_type,
            query: report_ref.clone(),
            report_ref,
            expires_on: None,
            created: Utc::now(),
            parent: None,
            token: None,
        }
    }
}

/// An archived report record.
///
/// Same payload as [`Report`] plus the maintenance batch that archived it.
/// Archived rows keep the row identifier they had while live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedReport {
    /// Row identifier (carried over from the live row).
    pub id: ReportId,

    /// Owning account.
    pub account: AccountId,

    /// Report type.
    pub report_type: ReportTypeId,

    /// Report reference, usually a VIN.
    pub report_ref: String,

    /// The original user query.
    pub query: String,

    /// Expiration date, if any.
    pub expires_on: Option<DateTime<Utc>>,

    /// Creation timestamp of the live row.
    pub created: DateTime<Utc>,

    /// Parent report for linked reports.
    pub parent: Option<ReportId>,

    /// Token backing external report-view URLs.
    pub token: Option<ReportToken>,

    /// The maintenance batch that archived the report.
    pub batch: BatchId,
}

impl ArchivedReport {
    /// Archive a live report under a maintenance batch.
    #[must_use]
    pub fn from_live(report: Report, batch: BatchId) -> Self {
        Self {
            id: report.id,
            account: report.account,
            report_type: report.report_type,
            report_ref: report.report_ref,
            query: report.query,
            expires_on: report.expires_on,
            created: report.created,
            parent: report.parent,
            token: report.token,
            batch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_query_defaults_to_reference() {
        let report = Report::new(
            ReportId::new(10),
            AccountId::new(1),
            ReportTypeId::new("VHR_SE_SV_HTML"),
            "YV1MS384X42123456",
        );
        assert_eq!(report.query, "YV1MS384X42123456");
        assert!(report.token.is_none());
    }

    #[test]
    fn archival_keeps_identity() {
        let report = Report::new(
            ReportId::new(10),
            AccountId::new(1),
            ReportTypeId::new("VHR_SE_SV_HTML"),
            "YV1MS384X42123456",
        );
        let archived = ArchivedReport::from_live(report, BatchId::new(3));
        assert_eq!(archived.id, ReportId::new(10));
        assert_eq!(archived.batch, BatchId::new(3));
    }
}
