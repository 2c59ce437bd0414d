//! Core types and business rules for the vehicle-report backoffice.
//!
//! This crate provides the foundational types used throughout the backoffice
//! data layer:
//!
//! - **Identifiers**: sequence-assigned row ids (`AccountId`,
//!   `TransactionId`, ...) and string ids (`GroupRef`, `ConditionId`, ...)
//! - **Accounts**: `Account`, `Login`, `Requester`
//! - **Commerce**: `Condition` (pricing policies), `Transaction`, `Receipt`
//! - **Reports**: `Report` and its archival twin `ArchivedReport`
//! - **Payments**: `PaymentItem` imported from the web shop
//! - **Viatel**: premium-rate-SMS redemption batches, codes and call logs
//! - **Codes**: alphabets and sampling for generated identifiers
//!
//! # Money
//!
//! Monetary values are integer cents (`i64`); VAT rates are whole percent.
//! No floating point crosses a persistence boundary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod codes;
pub mod condition;
pub mod error;
pub mod ids;
pub mod payment;
pub mod report;
pub mod transaction;
pub mod viatel;

pub use account::{rights, validate_email, Account, FrontendUser, Login, Requester};
pub use codes::{Alphabet, CodeSpec, REPORT_TOKEN, TRANSACTION_REFERENCE, VIATEL_CODE};
pub use condition::{Condition, Receipt, ReportType};
pub use error::{BackofficeError, Result};
pub use ids::{
    AccountId, BatchId, ConditionId, GroupRef, PaymentId, RedemptionCode, ReportId, ReportToken,
    ReportTypeId, RequesterId, TransactionId,
};
pub use payment::PaymentItem;
pub use report::{ArchivedReport, Report};
pub use transaction::{
    RemainingCredits, Transaction, CREDIT_GRANT_KINDS, REPORT_PULL_KIND,
};
pub use viatel::{inactive_bits, ViatelBatch, ViatelCode, ViatelLog};
