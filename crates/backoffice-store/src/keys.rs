//! Key encoding utilities for `RocksDB`.
//!
//! Row ids are encoded big-endian so lexicographic key order matches numeric
//! order; index keys append the row id to the owner key, which makes reverse
//! iteration over an owner prefix yield rows newest-first.

use backoffice_core::{
    AccountId, BatchId, PaymentId, ReportId, ReportTypeId, RequesterId, TransactionId,
};

/// Create an account key from an account id.
#[must_use]
pub fn account_key(account: AccountId) -> [u8; 8] {
    account.to_be_bytes()
}

/// Create an index key from a frontend user id.
#[must_use]
pub fn ext_user_key(ext_usr_ref: i64) -> [u8; 8] {
    ext_usr_ref.to_be_bytes()
}

/// Create a transaction key from a transaction id.
#[must_use]
pub fn transaction_key(transaction: TransactionId) -> [u8; 8] {
    transaction.to_be_bytes()
}

/// Create an account-transaction index key.
///
/// Format: `be64(account_id) || be64(transaction_id)`.
#[must_use]
pub fn account_transaction_key(account: AccountId, transaction: TransactionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&account.to_be_bytes());
    key.extend_from_slice(&transaction.to_be_bytes());
    key
}

/// Create a prefix for iterating all transactions of an account.
#[must_use]
pub fn account_transactions_prefix(account: AccountId) -> [u8; 8] {
    account.to_be_bytes()
}

/// Extract the transaction id from an account-transaction index key.
///
/// # Panics
///
/// Panics if the key is not at least 16 bytes.
#[must_use]
pub fn extract_transaction_id_from_account_key(key: &[u8]) -> TransactionId {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[8..16]);
    TransactionId::from_be_bytes(bytes)
}

/// Create a report key from a report id.
#[must_use]
pub fn report_key(report: ReportId) -> [u8; 8] {
    report.to_be_bytes()
}

/// Create the uniqueness-index key for a report's business identity.
///
/// Format: `be64(account_id) || report_type || 0x00 || report_ref`. The
/// type/ref separator keeps distinct identities from colliding since report
/// type ids never contain NUL.
#[must_use]
pub fn report_identity_key(
    account: AccountId,
    report_type: &ReportTypeId,
    report_ref: &str,
) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + report_type.as_str().len() + 1 + report_ref.len());
    key.extend_from_slice(&account.to_be_bytes());
    key.extend_from_slice(report_type.as_str().as_bytes());
    key.push(0);
    key.extend_from_slice(report_ref.as_bytes());
    key
}

/// Create a transaction-report join key.
///
/// Format: `be64(transaction_id) || be64(report_id)`.
#[must_use]
pub fn transaction_report_key(transaction: TransactionId, report: ReportId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&transaction.to_be_bytes());
    key.extend_from_slice(&report.to_be_bytes());
    key
}

/// Create a prefix for iterating all archived reports linked to a pull
/// transaction.
#[must_use]
pub fn transaction_reports_prefix(transaction: TransactionId) -> [u8; 8] {
    transaction.to_be_bytes()
}

/// Extract the report id from a transaction-report join key.
///
/// # Panics
///
/// Panics if the key is not at least 16 bytes.
#[must_use]
pub fn extract_report_id_from_join_key(key: &[u8]) -> ReportId {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[8..16]);
    ReportId::from_be_bytes(bytes)
}

/// Create a payment key from a payment id.
#[must_use]
pub fn payment_key(payment: PaymentId) -> [u8; 8] {
    payment.to_be_bytes()
}

/// Create a mail-payment index key.
///
/// Format: `mail || 0x00 || be64(cpid)`.
#[must_use]
pub fn mail_payment_key(mail: &str, payment: PaymentId) -> Vec<u8> {
    let mut key = Vec::with_capacity(mail.len() + 1 + 8);
    key.extend_from_slice(mail.as_bytes());
    key.push(0);
    key.extend_from_slice(&payment.to_be_bytes());
    key
}

/// Create a prefix for iterating all payments of a customer mail.
#[must_use]
pub fn mail_payments_prefix(mail: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(mail.len() + 1);
    key.extend_from_slice(mail.as_bytes());
    key.push(0);
    key
}

/// Extract the payment id from a mail-payment index key.
///
/// # Panics
///
/// Panics if the key is shorter than 8 bytes.
#[must_use]
pub fn extract_payment_id_from_mail_key(key: &[u8]) -> PaymentId {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[key.len() - 8..]);
    PaymentId::from_be_bytes(bytes)
}

/// Create a batch key from a batch id.
#[must_use]
pub fn batch_key(batch: BatchId) -> [u8; 8] {
    batch.to_be_bytes()
}

/// Create a requester key from a requester id.
#[must_use]
pub fn requester_key(requester: RequesterId) -> [u8; 8] {
    requester.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_transaction_key_format() {
        let account = AccountId::new(3);
        let transaction = TransactionId::new(77);
        let key = account_transaction_key(account, transaction);

        assert_eq!(key.len(), 16);
        assert_eq!(&key[..8], &account.to_be_bytes());
        assert_eq!(&key[8..], &transaction.to_be_bytes());
        assert_eq!(extract_transaction_id_from_account_key(&key), transaction);
    }

    #[test]
    fn account_transaction_keys_sort_by_transaction_id() {
        let account = AccountId::new(3);
        let older = account_transaction_key(account, TransactionId::new(10));
        let newer = account_transaction_key(account, TransactionId::new(200));
        assert!(older < newer);
    }

    #[test]
    fn report_identity_key_separates_type_and_ref() {
        let a = report_identity_key(AccountId::new(1), &ReportTypeId::new("VHR_SE"), "SV_X");
        let b = report_identity_key(AccountId::new(1), &ReportTypeId::new("VHR_SE_SV"), "X");
        assert_ne!(a, b);
    }

    #[test]
    fn join_key_roundtrip() {
        let key = transaction_report_key(TransactionId::new(5), ReportId::new(42));
        assert_eq!(extract_report_id_from_join_key(&key), ReportId::new(42));
    }

    #[test]
    fn mail_payment_key_roundtrip() {
        let key = mail_payment_key("buyer@example.com", PaymentId::new(9));
        assert!(key.starts_with(&mail_payments_prefix("buyer@example.com")));
        assert_eq!(extract_payment_id_from_mail_key(&key), PaymentId::new(9));
    }
}
