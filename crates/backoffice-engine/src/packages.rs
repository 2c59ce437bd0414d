//! Credit/package aggregation.
//!
//! A customer's packages are their credit grants, enriched with the reports
//! pulled against each grant and the remaining balance. Grants and pulls are
//! correlated by their shared grouping reference, not by a foreign key, so
//! the aggregation partitions the account's transactions and joins the two
//! sides in memory.

use std::collections::HashMap;

use serde::Serialize;

use backoffice_core::{
    ArchivedReport, ConditionId, GroupRef, RemainingCredits, Report, ReportId, ReportToken,
    ReportTypeId, Transaction,
};
use backoffice_store::Store;

use crate::error::Result;
use crate::links::LinkGenerator;

/// A resolved report, live or archived, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    /// Report row identifier.
    pub id: ReportId,
    /// Report type.
    pub report_type: ReportTypeId,
    /// Report reference, usually a VIN.
    pub report_ref: String,
    /// The original user query.
    pub query: String,
    /// True for live reports, false for archived ones.
    pub active: bool,
    /// Token backing external report-view URLs.
    pub token: Option<ReportToken>,
    /// Presentation URL, if the link generator produced one.
    pub link: Option<String>,
}

impl ReportView {
    /// The fixed placeholder callers render for a report that cannot be
    /// resolved: sentinel identity, "Unknown" attributes, inactive, no link.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            id: ReportId::missing(),
            report_type: ReportTypeId::new("Unknown"),
            report_ref: "Unknown".into(),
            query: "Unknown".into(),
            active: false,
            token: None,
            link: None,
        }
    }

    fn from_live(report: Report, links: &dyn LinkGenerator) -> Self {
        let mut view = Self {
            id: report.id,
            report_type: report.report_type,
            report_ref: report.report_ref,
            query: report.query,
            active: true,
            token: report.token,
            link: None,
        };
        view.link = links.presentation_link(&view);
        view
    }

    fn from_archived(report: ArchivedReport, links: &dyn LinkGenerator) -> Self {
        let mut view = Self {
            id: report.id,
            report_type: report.report_type,
            report_ref: report.report_ref,
            query: report.query,
            active: false,
            token: report.token,
            link: None,
        };
        view.link = links.presentation_link(&view);
        view
    }
}

/// A credit grant enriched with its resolved reports and remaining balance.
#[derive(Debug, Clone, Serialize)]
pub struct PackageView {
    /// The credit-grant transaction.
    pub grant: Transaction,
    /// Reports pulled against the grant, by report id descending.
    pub reports: Vec<ReportView>,
    /// Remaining balance of the grant.
    pub remaining: RemainingCredits,
}

/// Compute the packages of the customer with frontend user id `uid`.
///
/// Transactions of the customer's account are walked newest-first and
/// classified: `1xx` kinds are credit grants, `200` is a report pull,
/// anything else is ignored. Every pull counts against its grouping
/// reference; whether it also surfaces a report depends on resolution:
///
/// - a live report resolves to an active view,
/// - otherwise, with `show_archived`, the archived reports linked through
///   the join table resolve to inactive views,
/// - otherwise the pull stays counted but invisible.
///
/// A customer with no matching account (or no transactions) yields an empty
/// sequence, not an error.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub fn compute_packages(
    store: &dyn Store,
    links: &dyn LinkGenerator,
    uid: i64,
    show_archived: bool,
) -> Result<Vec<PackageView>> {
    let Some(account) = store.find_account_by_ext_user(uid)? else {
        return Ok(Vec::new());
    };

    let mut grants: Vec<Transaction> = Vec::new();
    let mut reports: HashMap<GroupRef, Vec<ReportView>> = HashMap::new();
    let mut pulled: HashMap<GroupRef, i64> = HashMap::new();

    for tx in store.list_transactions_by_account(account.id)? {
        if tx.is_credit_grant() {
            grants.push(tx);
        } else if tx.is_report_pull() {
            *pulled.entry(tx.group_ref.clone()).or_insert(0) += 1;

            let live = match tx.report {
                Some(id) => store.get_report(id)?,
                None => None,
            };
            if let Some(report) = live {
                reports
                    .entry(tx.group_ref.clone())
                    .or_default()
                    .push(ReportView::from_live(report, links));
            } else if show_archived {
                for archived in store.archived_reports_for_transaction(tx.id)? {
                    reports
                        .entry(tx.group_ref.clone())
                        .or_default()
                        .push(ReportView::from_archived(archived, links));
                }
            }
            // A pull resolving to nothing still counts against the balance.
        }
    }

    let mut packages = Vec::with_capacity(grants.len());
    for grant in grants {
        let mut grant_reports = reports.get(&grant.group_ref).cloned().unwrap_or_default();
        grant_reports.sort_by(|a, b| b.id.cmp(&a.id));

        let consumed = pulled.get(&grant.group_ref).copied().unwrap_or(0);
        let remaining = if grant.condition.as_ref().is_some_and(ConditionId::is_unlimited) {
            RemainingCredits::Unlimited
        } else {
            RemainingCredits::Count(grant.qty.unwrap_or(0) - consumed)
        };

        packages.push(PackageView {
            grant,
            reports: grant_reports,
            remaining,
        });
    }

    tracing::debug!(
        uid,
        account = %account.id,
        packages = packages.len(),
        "aggregated customer packages"
    );
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_view_serializes_for_the_frontend() {
        let json = serde_json::to_value(ReportView::unknown()).unwrap();
        assert_eq!(json["report_ref"], "Unknown");
        assert_eq!(json["active"], false);
        assert!(json["link"].is_null());
    }

    #[test]
    fn unknown_report_placeholder_is_inert() {
        let view = ReportView::unknown();
        assert_eq!(view.id.as_i64(), -1);
        assert_eq!(view.report_ref, "Unknown");
        assert_eq!(view.query, "Unknown");
        assert!(!view.active);
        assert!(view.link.is_none());
        assert!(view.token.is_none());
    }
}
