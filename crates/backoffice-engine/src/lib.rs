//! Business operations of the report sales backoffice.
//!
//! This crate ties the domain types and the store together:
//!
//! - **Identity generation**: transaction references, report tokens and
//!   redemption codes, retried against the store's uniqueness authority
//! - **Customers**: lookup by mail with a missing-customer placeholder,
//!   memoized package and payment views
//! - **Packages**: credit grants joined with the reports pulled against them
//!   and the remaining balance per grant
//! - **Viatel**: premium-rate code batches, one-shot redemption and call-log
//!   ingestion
//!
//! [`Backoffice`] is the shared entry point; the free functions underneath
//! take `&dyn Store` so tests can drive them against a temporary store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod customer;
pub mod error;
pub mod generator;
pub mod links;
pub mod logging;
pub mod packages;
pub mod state;
pub mod viatel;

pub use config::BackofficeConfig;
pub use customer::{create_login, customer_by_mail, validate_new_email, Customer};
pub use error::{EngineError, Result};
pub use generator::{create_report_token, create_transaction_reference, create_viatel_code};
pub use links::{LinkGenerator, VtsLinkGenerator};
pub use packages::{compute_packages, PackageView, ReportView};
pub use state::Backoffice;
pub use viatel::{create_code_batch, record_call_log, redeem_code};
