//! Shared helpers for engine integration tests.

use tempfile::TempDir;

use backoffice_core::{
    Account, AccountId, ConditionId, GroupRef, ReportId, Transaction, TransactionId,
};
use backoffice_store::{schema::seq, RocksStore, Store};

/// Open a store backed by a temporary directory.
///
/// The directory guard must stay alive for as long as the store is used.
pub fn open_store() -> (TempDir, RocksStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = RocksStore::open(dir.path()).expect("open store");
    (dir, store)
}

/// Create an account mapped to a frontend user id.
pub fn frontend_account(store: &dyn Store, uid: i64) -> AccountId {
    let id = AccountId::new(store.next_row_id(seq::ACCOUNTS).unwrap());
    store
        .put_account(&Account::for_frontend_user(id, uid))
        .unwrap();
    id
}

/// Record a credit grant of `qty` credits and return its transaction id.
pub fn grant(
    store: &dyn Store,
    account: AccountId,
    group_ref: &str,
    condition: &str,
    qty: i64,
) -> TransactionId {
    let id = TransactionId::new(store.next_row_id(seq::TRANSACTIONS).unwrap());
    store
        .put_transaction(&Transaction::credit_grant(
            id,
            GroupRef::new(group_ref),
            account,
            100,
            ConditionId::new(condition),
            qty,
        ))
        .unwrap();
    id
}

/// Record a report pull and return its transaction id.
pub fn pull(
    store: &dyn Store,
    account: AccountId,
    group_ref: &str,
    report: Option<ReportId>,
) -> TransactionId {
    let id = TransactionId::new(store.next_row_id(seq::TRANSACTIONS).unwrap());
    store
        .put_transaction(&Transaction::report_pull(
            id,
            GroupRef::new(group_ref),
            account,
            report,
        ))
        .unwrap();
    id
}
