//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use backoffice_core::{
    Account, AccountId, ArchivedReport, BatchId, FrontendUser, GroupRef, Login, PaymentItem,
    Receipt, RedemptionCode, Report, ReportId, ReportToken, ReportType, ReportTypeId, Requester,
    RequesterId, Transaction, TransactionId, ViatelBatch, ViatelCode, ViatelLog,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes the read-modify-write in [`Store::next_row_id`]: without
    /// it, two threads sharing the store could both read the same counter
    /// and hand out one row id twice.
    seq_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(path = %path.as_ref().display(), "opened backoffice database");
        Ok(Self {
            db: Arc::new(db),
            seq_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read and decode one row.
    fn get_decoded<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Encode and write one row.
    fn put_encoded<T: serde::Serialize>(
        &self,
        cf_name: &str,
        key: impl AsRef<[u8]>,
        value: &T,
    ) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let value = Self::serialize(value)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Whether a key exists in a column family.
    fn exists(&self, cf_name: &str, key: impl AsRef<[u8]>) -> Result<bool> {
        let cf = self.cf(cf_name)?;
        Ok(self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some())
    }

    /// Insert a row only if its key is free, reporting a uniqueness
    /// violation otherwise.
    fn insert_unique(
        &self,
        cf_name: &str,
        key: impl AsRef<[u8]>,
        value: &[u8],
        describe: impl FnOnce() -> String,
    ) -> Result<()> {
        if self.exists(cf_name, key.as_ref())? {
            return Err(StoreError::DuplicateKey(describe()));
        }
        let cf = self.cf(cf_name)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Collect all index keys under `prefix` in key order.
    fn index_keys_with_prefix(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        let cf = self.cf(cf_name)?;
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix, Direction::Forward));

        let mut all_keys = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(prefix) {
                break;
            }
            all_keys.push(key.to_vec());
        }
        Ok(all_keys)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Sequences
    // =========================================================================

    fn next_row_id(&self, sequence: &str) -> Result<i64> {
        let _guard = self.seq_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let cf = self.cf(cf::SEQUENCES)?;
        let last = self
            .db
            .get_cf(&cf, sequence)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| {
                let mut bytes = [0u8; 8];
                if data.len() != 8 {
                    return Err(StoreError::Serialization(format!(
                        "sequence {sequence} has a malformed counter"
                    )));
                }
                bytes.copy_from_slice(&data);
                Ok(i64::from_be_bytes(bytes))
            })
            .transpose()?
            .unwrap_or(0);

        let next = last + 1;
        self.db
            .put_cf(&cf, sequence, next.to_be_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(next)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    fn put_account(&self, account: &Account) -> Result<()> {
        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let value = Self::serialize(account)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_accounts, keys::account_key(account.id), &value);
        if let Some(ext) = account.ext_usr_ref {
            let cf_index = self.cf(cf::ACCOUNTS_BY_EXT_USER)?;
            batch.put_cf(&cf_index, keys::ext_user_key(ext), account.id.to_be_bytes());
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        self.get_decoded(cf::ACCOUNTS, keys::account_key(id))
    }

    fn find_account_by_ext_user(&self, ext_usr_ref: i64) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS_BY_EXT_USER)?;
        let Some(data) = self
            .db
            .get_cf(&cf, keys::ext_user_key(ext_usr_ref))
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        if data.len() != 8 {
            return Err(StoreError::Serialization(
                "malformed frontend-user index entry".into(),
            ));
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&data);
        self.get_account(AccountId::from_be_bytes(bytes))
    }

    // =========================================================================
    // Logins and customers
    // =========================================================================

    fn insert_login(&self, login: &Login) -> Result<()> {
        let value = Self::serialize(login)?;
        self.insert_unique(cf::LOGINS, login.login.as_bytes(), &value, || {
            format!("login {}", login.login)
        })
    }

    fn get_login(&self, email: &str) -> Result<Option<Login>> {
        self.get_decoded(cf::LOGINS, email.as_bytes())
    }

    fn login_exists(&self, email: &str) -> Result<bool> {
        self.exists(cf::LOGINS, email.as_bytes())
    }

    fn put_frontend_user(&self, user: &FrontendUser) -> Result<()> {
        self.put_encoded(cf::FRONTEND_USERS, user.mail.as_bytes(), user)
    }

    fn get_frontend_user_by_mail(&self, mail: &str) -> Result<Option<FrontendUser>> {
        self.get_decoded(cf::FRONTEND_USERS, mail.as_bytes())
    }

    // =========================================================================
    // Generated identifiers
    // =========================================================================

    fn insert_group_ref(&self, group_ref: &GroupRef, created: DateTime<Utc>) -> Result<()> {
        let value = Self::serialize(&created)?;
        self.insert_unique(cf::GROUP_REFS, group_ref, &value, || {
            format!("group ref {group_ref}")
        })
    }

    fn put_group_ref(&self, group_ref: &GroupRef, created: DateTime<Utc>) -> Result<()> {
        self.put_encoded(cf::GROUP_REFS, group_ref, &created)
    }

    fn group_ref_exists(&self, group_ref: &GroupRef) -> Result<bool> {
        self.exists(cf::GROUP_REFS, group_ref)
    }

    fn insert_token(&self, token: &ReportToken) -> Result<()> {
        self.insert_unique(cf::TOKENS, token, &[], || format!("token {token}"))
    }

    fn put_token(&self, token: &ReportToken) -> Result<()> {
        let cf = self.cf(cf::TOKENS)?;
        self.db
            .put_cf(&cf, token, [])
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    fn put_transaction(&self, transaction: &Transaction) -> Result<()> {
        let cf_tx = self.cf(cf::TRANSACTIONS)?;
        let cf_by_account = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;

        let value = Self::serialize(transaction)?;
        let index_key = keys::account_transaction_key(transaction.account, transaction.id);

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_tx, keys::transaction_key(transaction.id), &value);
        batch.put_cf(&cf_by_account, index_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>> {
        self.get_decoded(cf::TRANSACTIONS, keys::transaction_key(id))
    }

    fn list_transactions_by_account(&self, account: AccountId) -> Result<Vec<Transaction>> {
        let prefix = keys::account_transactions_prefix(account);
        let mut index_keys =
            self.index_keys_with_prefix(cf::TRANSACTIONS_BY_ACCOUNT, &prefix)?;

        // Row ids are monotonic, so reversing the key order gives
        // newest-first.
        index_keys.reverse();

        let mut transactions = Vec::with_capacity(index_keys.len());
        for key in index_keys {
            let id = keys::extract_transaction_id_from_account_key(&key);
            if let Some(tx) = self.get_transaction(id)? {
                transactions.push(tx);
            }
        }
        Ok(transactions)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    fn insert_report(&self, report: &Report) -> Result<()> {
        let identity_key =
            keys::report_identity_key(report.account, &report.report_type, &report.report_ref);
        if self.exists(cf::REPORTS_BY_IDENTITY, &identity_key)? {
            return Err(StoreError::DuplicateKey(format!(
                "report {}/{}/{}",
                report.account, report.report_type, report.report_ref
            )));
        }

        let cf_reports = self.cf(cf::REPORTS)?;
        let cf_identity = self.cf(cf::REPORTS_BY_IDENTITY)?;
        let value = Self::serialize(report)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_reports, keys::report_key(report.id), &value);
        batch.put_cf(&cf_identity, identity_key, report.id.to_be_bytes());

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_report(&self, id: ReportId) -> Result<Option<Report>> {
        self.get_decoded(cf::REPORTS, keys::report_key(id))
    }

    fn put_archived_report(&self, report: &ArchivedReport) -> Result<()> {
        self.put_encoded(cf::ARCHIVED_REPORTS, keys::report_key(report.id), report)
    }

    fn get_archived_report(&self, id: ReportId) -> Result<Option<ArchivedReport>> {
        self.get_decoded(cf::ARCHIVED_REPORTS, keys::report_key(id))
    }

    fn link_transaction_report(
        &self,
        transaction: TransactionId,
        report: ReportId,
        batch: BatchId,
    ) -> Result<()> {
        let cf = self.cf(cf::TRANSACTION_REPORTS)?;
        self.db
            .put_cf(
                &cf,
                keys::transaction_report_key(transaction, report),
                batch.to_be_bytes(),
            )
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn archived_reports_for_transaction(
        &self,
        transaction: TransactionId,
    ) -> Result<Vec<ArchivedReport>> {
        let prefix = keys::transaction_reports_prefix(transaction);
        let join_keys = self.index_keys_with_prefix(cf::TRANSACTION_REPORTS, &prefix)?;

        let mut reports = Vec::with_capacity(join_keys.len());
        for key in join_keys {
            let id = keys::extract_report_id_from_join_key(&key);
            if let Some(report) = self.get_archived_report(id)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    // =========================================================================
    // Catalogues
    // =========================================================================

    fn put_report_type(&self, report_type: &ReportType) -> Result<()> {
        self.put_encoded(cf::REPORT_TYPES, &report_type.id, report_type)
    }

    fn get_report_type(&self, id: &ReportTypeId) -> Result<Option<ReportType>> {
        self.get_decoded(cf::REPORT_TYPES, id)
    }

    fn put_requester(&self, requester: &Requester) -> Result<()> {
        self.put_encoded(cf::REQUESTERS, keys::requester_key(requester.id), requester)
    }

    fn get_requester(&self, id: RequesterId) -> Result<Option<Requester>> {
        self.get_decoded(cf::REQUESTERS, keys::requester_key(id))
    }

    // =========================================================================
    // Receipts
    // =========================================================================

    fn insert_receipt(&self, receipt: &Receipt) -> Result<()> {
        let value = Self::serialize(receipt)?;
        self.insert_unique(cf::RECEIPTS, &receipt.id, &value, || {
            format!("receipt {}", receipt.id)
        })
    }

    fn get_receipt(&self, id: &GroupRef) -> Result<Option<Receipt>> {
        self.get_decoded(cf::RECEIPTS, id)
    }

    // =========================================================================
    // Payments
    // =========================================================================

    fn put_payment(&self, payment: &PaymentItem) -> Result<()> {
        let cf_payments = self.cf(cf::PAYMENTS)?;
        let cf_by_mail = self.cf(cf::PAYMENTS_BY_MAIL)?;

        let value = Self::serialize(payment)?;
        let index_key = keys::mail_payment_key(&payment.mail, payment.cpid);

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_payments, keys::payment_key(payment.cpid), &value);
        batch.put_cf(&cf_by_mail, index_key, []);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn list_payments_by_mail(&self, mail: &str) -> Result<Vec<PaymentItem>> {
        let prefix = keys::mail_payments_prefix(mail);
        let mut index_keys = self.index_keys_with_prefix(cf::PAYMENTS_BY_MAIL, &prefix)?;
        index_keys.reverse(); // newest first

        let mut payments = Vec::with_capacity(index_keys.len());
        for key in index_keys {
            let id = keys::extract_payment_id_from_mail_key(&key);
            if let Some(payment) = self.get_decoded(cf::PAYMENTS, keys::payment_key(id))? {
                payments.push(payment);
            }
        }
        Ok(payments)
    }

    // =========================================================================
    // Viatel
    // =========================================================================

    fn put_viatel_batch(&self, batch: &ViatelBatch) -> Result<()> {
        self.put_encoded(cf::VIATEL_BATCHES, keys::batch_key(batch.batch), batch)
    }

    fn get_viatel_batch(&self, id: BatchId) -> Result<Option<ViatelBatch>> {
        self.get_decoded(cf::VIATEL_BATCHES, keys::batch_key(id))
    }

    fn insert_viatel_code(&self, code: &ViatelCode) -> Result<()> {
        let value = Self::serialize(code)?;
        self.insert_unique(cf::VIATEL_CODES, &code.code, &value, || {
            format!("viatel code {}", code.code)
        })
    }

    fn put_viatel_code(&self, code: &ViatelCode) -> Result<()> {
        self.put_encoded(cf::VIATEL_CODES, &code.code, code)
    }

    fn get_viatel_code(&self, code: &RedemptionCode) -> Result<Option<ViatelCode>> {
        self.get_decoded(cf::VIATEL_CODES, code)
    }

    fn mark_code_used(&self, code: &RedemptionCode, used_up: DateTime<Utc>) -> Result<()> {
        let value = Self::serialize(&used_up)?;
        self.insert_unique(cf::VIATEL_USED_CODES, code, &value, || {
            format!("used viatel code {code}")
        })
    }

    fn code_used_at(&self, code: &RedemptionCode) -> Result<Option<DateTime<Utc>>> {
        self.get_decoded(cf::VIATEL_USED_CODES, code)
    }

    fn put_viatel_log(&self, log: &ViatelLog) -> Result<()> {
        self.put_encoded(cf::VIATEL_LOGS, log.id.to_be_bytes(), log)
    }
}
