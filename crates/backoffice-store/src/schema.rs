//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Account records, keyed by `be64(account_id)`.
    pub const ACCOUNTS: &str = "accounts";

    /// Index: account id by frontend user id, keyed by `be64(ext_usr_ref)`.
    pub const ACCOUNTS_BY_EXT_USER: &str = "accounts_by_ext_user";

    /// Logins, keyed by e-mail address. Primary-key uniqueness is enforced
    /// on insert.
    pub const LOGINS: &str = "logins";

    /// Frontend customer rows, keyed by e-mail address.
    pub const FRONTEND_USERS: &str = "frontend_users";

    /// Grouping references, keyed by the reference itself. Value is the
    /// creation timestamp. Primary-key uniqueness is enforced on insert.
    pub const GROUP_REFS: &str = "group_refs";

    /// Report tokens, keyed by the token itself. Value is empty (presence
    /// only). Primary-key uniqueness is enforced on insert.
    pub const TOKENS: &str = "tokens";

    /// Transactions, keyed by `be64(transaction_id)`.
    pub const TRANSACTIONS: &str = "transactions";

    /// Index: transactions by account, keyed by
    /// `be64(account_id) || be64(transaction_id)`. Value is empty.
    pub const TRANSACTIONS_BY_ACCOUNT: &str = "transactions_by_account";

    /// Live reports, keyed by `be64(report_id)`.
    pub const REPORTS: &str = "reports";

    /// Uniqueness index over `(account, report_type, report_ref)` so the
    /// same report is never pulled twice. Value is `be64(report_id)`.
    pub const REPORTS_BY_IDENTITY: &str = "reports_by_identity";

    /// Archived reports, keyed by `be64(report_id)`.
    pub const ARCHIVED_REPORTS: &str = "archived_reports";

    /// Join table linking pull transactions to archived reports, keyed by
    /// `be64(transaction_id) || be64(report_id)`. Value is the archiving
    /// `be64(batch_id)`.
    pub const TRANSACTION_REPORTS: &str = "transaction_reports";

    /// Report type catalogue, keyed by the type id string.
    pub const REPORT_TYPES: &str = "report_types";

    /// Requester catalogue, keyed by `be64(requester_id)`.
    pub const REQUESTERS: &str = "requesters";

    /// Receipts, keyed by their grouping reference. Primary-key uniqueness
    /// is enforced on insert.
    pub const RECEIPTS: &str = "receipts";

    /// Payment items, keyed by `be64(cpid)`.
    pub const PAYMENTS: &str = "payments";

    /// Index: payments by customer mail, keyed by
    /// `mail || 0x00 || be64(cpid)`. Value is empty.
    pub const PAYMENTS_BY_MAIL: &str = "payments_by_mail";

    /// Viatel generation batches, keyed by `be64(batch_id)`.
    pub const VIATEL_BATCHES: &str = "viatel_batches";

    /// Viatel codes, keyed by the code itself. Primary-key uniqueness is
    /// enforced on insert.
    pub const VIATEL_CODES: &str = "viatel_codes";

    /// Used Viatel codes, keyed by the code. Value is the redemption
    /// timestamp.
    pub const VIATEL_USED_CODES: &str = "viatel_used_codes";

    /// Premium-rate call notifications, keyed by `be64(log_id)`.
    pub const VIATEL_LOGS: &str = "viatel_logs";

    /// Row-id sequences, keyed by sequence name. Value is the last assigned
    /// `be64` id.
    pub const SEQUENCES: &str = "sequences";
}

/// Row-id sequence names, one per sequence-keyed entity.
pub mod seq {
    /// Account row ids.
    pub const ACCOUNTS: &str = "accounts";
    /// Transaction row ids.
    pub const TRANSACTIONS: &str = "transactions";
    /// Report row ids.
    pub const REPORTS: &str = "reports";
    /// Maintenance/generation batch ids.
    pub const BATCHES: &str = "batches";
    /// Requester row ids.
    pub const REQUESTERS: &str = "requesters";
    /// Viatel call log ids.
    pub const VIATEL_LOGS: &str = "viatel_logs";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::ACCOUNTS_BY_EXT_USER,
        cf::LOGINS,
        cf::FRONTEND_USERS,
        cf::GROUP_REFS,
        cf::TOKENS,
        cf::TRANSACTIONS,
        cf::TRANSACTIONS_BY_ACCOUNT,
        cf::REPORTS,
        cf::REPORTS_BY_IDENTITY,
        cf::ARCHIVED_REPORTS,
        cf::TRANSACTION_REPORTS,
        cf::REPORT_TYPES,
        cf::REQUESTERS,
        cf::RECEIPTS,
        cf::PAYMENTS,
        cf::PAYMENTS_BY_MAIL,
        cf::VIATEL_BATCHES,
        cf::VIATEL_CODES,
        cf::VIATEL_USED_CODES,
        cf::VIATEL_LOGS,
        cf::SEQUENCES,
    ]
}
