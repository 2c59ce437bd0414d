//! `RocksDB` storage layer for the vehicle-report backoffice.
//!
//! This crate provides persistent storage for accounts, logins, transactions,
//! reports (live and archived), receipts, payments and the Viatel redemption
//! subsystem, using `RocksDB` with column families for indexing.
//!
//! # Uniqueness
//!
//! Generated identifiers (grouping references, report tokens, redemption
//! codes) and natural keys (login e-mail, report business identity) are
//! inserted with `insert_*` operations that fail with
//! [`StoreError::DuplicateKey`] when the row already exists. That is the only
//! retryable storage condition; see [`StoreError::is_uniqueness_violation`].
//!
//! # Example
//!
//! ```no_run
//! use backoffice_store::{RocksStore, Store};
//! use backoffice_core::{Account, AccountId};
//!
//! let store = RocksStore::open("/tmp/backoffice-db").unwrap();
//!
//! let id = AccountId::new(store.next_row_id(backoffice_store::schema::seq::ACCOUNTS).unwrap());
//! let account = Account::for_frontend_user(id, 42);
//! store.put_account(&account).unwrap();
//!
//! let found = store.find_account_by_ext_user(42).unwrap();
//! assert!(found.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use chrono::{DateTime, Utc};

use backoffice_core::{
    Account, AccountId, ArchivedReport, BatchId, FrontendUser, GroupRef, Login, PaymentItem,
    Receipt, RedemptionCode, Report, ReportId, ReportToken, ReportType, ReportTypeId, Requester,
    RequesterId, Transaction, TransactionId, ViatelBatch, ViatelCode, ViatelLog,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations. All operations are synchronous: the data layer runs
/// within one logical request with no internal parallelism.
pub trait Store: Send + Sync {
    // =========================================================================
    // Sequences
    // =========================================================================

    /// Allocate the next row id of a named sequence (see [`schema::seq`]).
    ///
    /// Ids are monotonically increasing starting at 1, so descending id
    /// order is a proxy for recency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn next_row_id(&self, sequence: &str) -> Result<i64>;

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Insert or update an account record, maintaining the frontend-user
    /// index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_account(&self, account: &Account) -> Result<()>;

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, id: AccountId) -> Result<Option<Account>>;

    /// Find the account mapped to a frontend user id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_account_by_ext_user(&self, ext_usr_ref: i64) -> Result<Option<Account>>;

    // =========================================================================
    // Logins and customers
    // =========================================================================

    /// Insert a login.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the e-mail is already taken.
    fn insert_login(&self, login: &Login) -> Result<()>;

    /// Get a login by e-mail address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_login(&self, email: &str) -> Result<Option<Login>>;

    /// Whether a login exists for the e-mail address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn login_exists(&self, email: &str) -> Result<bool>;

    /// Insert or update a frontend customer row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_frontend_user(&self, user: &FrontendUser) -> Result<()>;

    /// Get a frontend customer row by e-mail address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_frontend_user_by_mail(&self, mail: &str) -> Result<Option<FrontendUser>>;

    // =========================================================================
    // Generated identifiers
    // =========================================================================

    /// Insert a new grouping reference.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the reference already exists.
    fn insert_group_ref(&self, group_ref: &GroupRef, created: DateTime<Utc>) -> Result<()>;

    /// Insert or update a grouping reference (pre-assigned identity path).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_group_ref(&self, group_ref: &GroupRef, created: DateTime<Utc>) -> Result<()>;

    /// Whether a grouping reference exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn group_ref_exists(&self, group_ref: &GroupRef) -> Result<bool>;

    /// Insert a new report token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the token already exists.
    fn insert_token(&self, token: &ReportToken) -> Result<()>;

    /// Insert or update a report token (pre-assigned identity path).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_token(&self, token: &ReportToken) -> Result<()>;

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Insert or update a transaction, maintaining the account index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Get a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>>;

    /// List all transactions of an account, newest first (by id descending).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_transactions_by_account(&self, account: AccountId) -> Result<Vec<Transaction>>;

    // =========================================================================
    // Reports
    // =========================================================================

    /// Insert a live report, maintaining the business-identity uniqueness
    /// index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if a report with the same
    /// `(account, report_type, report_ref)` identity already exists.
    fn insert_report(&self, report: &Report) -> Result<()>;

    /// Get a live report by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_report(&self, id: ReportId) -> Result<Option<Report>>;

    /// Insert or update an archived report.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_archived_report(&self, report: &ArchivedReport) -> Result<()>;

    /// Get an archived report by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_archived_report(&self, id: ReportId) -> Result<Option<ArchivedReport>>;

    /// Link a pull transaction to an archived report (join table row).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn link_transaction_report(
        &self,
        transaction: TransactionId,
        report: ReportId,
        batch: BatchId,
    ) -> Result<()>;

    /// List the archived reports linked to a pull transaction, by report id
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn archived_reports_for_transaction(
        &self,
        transaction: TransactionId,
    ) -> Result<Vec<ArchivedReport>>;

    // =========================================================================
    // Catalogues
    // =========================================================================

    /// Insert or update a report type catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_report_type(&self, report_type: &ReportType) -> Result<()>;

    /// Get a report type catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_report_type(&self, id: &ReportTypeId) -> Result<Option<ReportType>>;

    /// Insert or update a requester catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_requester(&self, requester: &Requester) -> Result<()>;

    /// Get a requester catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_requester(&self, id: RequesterId) -> Result<Option<Requester>>;

    // =========================================================================
    // Receipts
    // =========================================================================

    /// Insert a receipt.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if a receipt with the same
    /// grouping reference already exists.
    fn insert_receipt(&self, receipt: &Receipt) -> Result<()>;

    /// Get a receipt by its grouping reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_receipt(&self, id: &GroupRef) -> Result<Option<Receipt>>;

    // =========================================================================
    // Payments
    // =========================================================================

    /// Insert or update a payment item, maintaining the mail index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_payment(&self, payment: &PaymentItem) -> Result<()>;

    /// List all payments of a customer mail, newest first (by `cpid`
    /// descending).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_payments_by_mail(&self, mail: &str) -> Result<Vec<PaymentItem>>;

    // =========================================================================
    // Viatel
    // =========================================================================

    /// Insert or update a Viatel generation batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_viatel_batch(&self, batch: &ViatelBatch) -> Result<()>;

    /// Get a Viatel batch by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_viatel_batch(&self, id: BatchId) -> Result<Option<ViatelBatch>>;

    /// Insert a new Viatel code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the code already exists.
    fn insert_viatel_code(&self, code: &ViatelCode) -> Result<()>;

    /// Insert or update a Viatel code (pre-assigned identity path).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_viatel_code(&self, code: &ViatelCode) -> Result<()>;

    /// Get a Viatel code row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_viatel_code(&self, code: &RedemptionCode) -> Result<Option<ViatelCode>>;

    /// Mark a code as used.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the code was already used, so
    /// redemption stays one-shot.
    fn mark_code_used(&self, code: &RedemptionCode, used_up: DateTime<Utc>) -> Result<()>;

    /// When a code was used, if it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn code_used_at(&self, code: &RedemptionCode) -> Result<Option<DateTime<Utc>>>;

    /// Append a premium-rate call notification row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_viatel_log(&self, log: &ViatelLog) -> Result<()>;
}
