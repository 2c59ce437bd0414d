//! Aggregation tests: grants, pulls, archival gating and balances.

mod common;

use backoffice_core::{
    ArchivedReport, BatchId, RemainingCredits, Report, ReportId, ReportToken, ReportTypeId,
};
use backoffice_engine::{compute_packages, VtsLinkGenerator};
use backoffice_store::Store;

use common::{frontend_account, grant, open_store, pull};

fn links() -> VtsLinkGenerator {
    VtsLinkGenerator::new("http://viewer.test")
}

fn live_report(store: &dyn Store, account: backoffice_core::AccountId, id: i64, vin: &str) -> Report {
    let report = Report::new(
        ReportId::new(id),
        account,
        ReportTypeId::new("VHR_SE_SV_HTML"),
        vin,
    );
    store.insert_report(&report).unwrap();
    report
}

#[test]
fn grant_with_pulls_yields_reports_and_balance() {
    let (_dir, store) = open_store();
    let account = frontend_account(&store, 7);

    grant(&store, account, "ABCD1234", "SE_VHR_5PACK", 5);
    let first = live_report(&store, account, 7, "YV1MS384X42000001");
    let second = live_report(&store, account, 10, "YV1MS384X42000002");
    pull(&store, account, "ABCD1234", Some(first.id));
    pull(&store, account, "ABCD1234", Some(second.id));
    // A pull whose report is gone counts against the balance but shows
    // nothing without the archive flag.
    pull(&store, account, "ABCD1234", None);

    let packages = compute_packages(&store, &links(), 7, false).unwrap();
    assert_eq!(packages.len(), 1);

    let package = &packages[0];
    assert_eq!(package.grant.qty, Some(5));
    assert_eq!(package.remaining, RemainingCredits::Count(2));

    let ids: Vec<i64> = package.reports.iter().map(|r| r.id.as_i64()).collect();
    assert_eq!(ids, vec![10, 7]);
    assert!(package.reports.iter().all(|r| r.active));
}

#[test]
fn customer_without_account_has_no_packages() {
    let (_dir, store) = open_store();
    let packages = compute_packages(&store, &links(), 9999, true).unwrap();
    assert!(packages.is_empty());
}

#[test]
fn unlimited_condition_never_counts_down() {
    let (_dir, store) = open_store();
    let account = frontend_account(&store, 3);

    grant(&store, account, "FLATRATE", "SE_VHR_UNLIMITED", 1);
    pull(&store, account, "FLATRATE", None);
    pull(&store, account, "FLATRATE", None);
    pull(&store, account, "FLATRATE", None);

    let packages = compute_packages(&store, &links(), 3, false).unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].remaining, RemainingCredits::Unlimited);
}

#[test]
fn archived_reports_surface_only_with_flag() {
    let (_dir, store) = open_store();
    let account = frontend_account(&store, 5);

    grant(&store, account, "GHJK3467", "SE_VHR_SINGLE", 1);
    // The live row was archived: the pull points nowhere, the join table
    // points at the archived copy.
    let report = Report::new(
        ReportId::new(31),
        account,
        ReportTypeId::new("VHR_SE_SV_HTML"),
        "WVWZZZ1JZ3W000001",
    );
    let archived = ArchivedReport::from_live(report, BatchId::new(2));
    store.put_archived_report(&archived).unwrap();
    let tx = pull(&store, account, "GHJK3467", None);
    store
        .link_transaction_report(tx, archived.id, archived.batch)
        .unwrap();

    let hidden = compute_packages(&store, &links(), 5, false).unwrap();
    assert!(hidden[0].reports.is_empty());
    assert_eq!(hidden[0].remaining, RemainingCredits::Count(0));

    let shown = compute_packages(&store, &links(), 5, true).unwrap();
    assert_eq!(shown[0].reports.len(), 1);
    assert!(!shown[0].reports[0].active);
    assert_eq!(shown[0].reports[0].id.as_i64(), 31);
    // Balance is identical either way.
    assert_eq!(shown[0].remaining, RemainingCredits::Count(0));
}

#[test]
fn overdrawn_grant_goes_negative() {
    let (_dir, store) = open_store();
    let account = frontend_account(&store, 11);

    grant(&store, account, "WXYT9463", "SE_VHR_SINGLE", 1);
    pull(&store, account, "WXYT9463", None);
    pull(&store, account, "WXYT9463", None);

    let packages = compute_packages(&store, &links(), 11, false).unwrap();
    assert_eq!(packages[0].remaining, RemainingCredits::Count(-1));
}

#[test]
fn grants_are_listed_newest_first() {
    let (_dir, store) = open_store();
    let account = frontend_account(&store, 8);

    let older = grant(&store, account, "AAAA3333", "SE_VHR_SINGLE", 1);
    let newer = grant(&store, account, "CCCC4444", "SE_VHR_SINGLE", 1);

    let packages = compute_packages(&store, &links(), 8, false).unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].grant.id, newer);
    assert_eq!(packages[1].grant.id, older);
}

#[test]
fn tokenized_report_gets_a_presentation_link() {
    let (_dir, store) = open_store();
    let account = frontend_account(&store, 6);

    grant(&store, account, "DDDD6666", "SE_VHR_SINGLE", 1);
    let mut report = Report::new(
        ReportId::new(50),
        account,
        ReportTypeId::new("VHR_SE_SV_HTML"),
        "JH4KA7650MC000001",
    );
    report.token = Some(ReportToken::new("0123456789abcdef0123456789abcdef"));
    store.insert_report(&report).unwrap();
    pull(&store, account, "DDDD6666", Some(report.id));

    let packages = compute_packages(&store, &links(), 6, false).unwrap();
    assert_eq!(
        packages[0].reports[0].link.as_deref(),
        Some("http://viewer.test/report/0123456789abcdef0123456789abcdef")
    );
}
