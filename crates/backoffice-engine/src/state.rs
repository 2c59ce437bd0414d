//! Shared engine state.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use backoffice_core::{
    GroupRef, Login, RedemptionCode, ReportToken, ViatelBatch, ViatelLog,
};
use backoffice_store::{RocksStore, Store};

use crate::config::BackofficeConfig;
use crate::customer::{self, Customer};
use crate::error::Result;
use crate::generator;
use crate::links::{LinkGenerator, VtsLinkGenerator};
use crate::viatel;

/// Shared handle over the store and the link generator.
///
/// Cloning is cheap; all clones share the same store.
#[derive(Clone)]
pub struct Backoffice {
    store: Arc<RocksStore>,
    links: Arc<VtsLinkGenerator>,
    config: Arc<BackofficeConfig>,
}

impl Backoffice {
    /// Open the store at the configured data directory and build the shared
    /// state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: BackofficeConfig) -> Result<Self> {
        let store = RocksStore::open(&config.data_dir)?;
        let links = VtsLinkGenerator::new(&config.vts_base_url);
        Ok(Self {
            store: Arc::new(store),
            links: Arc::new(links),
            config: Arc::new(config),
        })
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// The report link generator.
    #[must_use]
    pub fn links(&self) -> &dyn LinkGenerator {
        self.links.as_ref()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &BackofficeConfig {
        &self.config
    }

    /// Look up a customer by mail, falling back to the missing placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails.
    pub fn customer_by_mail(&self, mail: &str) -> Result<Customer> {
        customer::customer_by_mail(self.store(), mail)
    }

    /// Check that `mail` may become a new frontend customer address.
    ///
    /// # Errors
    ///
    /// Returns a validation failure for taken or malformed addresses.
    pub fn validate_new_email(&self, mail: &str) -> Result<()> {
        customer::validate_new_email(self.store(), mail)
    }

    /// Create a B2B login after validating its e-mail address.
    ///
    /// # Errors
    ///
    /// Returns a validation failure for a malformed or already-taken address.
    pub fn create_login(&self, login: &Login) -> Result<()> {
        customer::create_login(self.store(), login)
    }

    /// Reserve a fresh transaction reference, or persist a preset one.
    ///
    /// # Errors
    ///
    /// Returns `IdentitySpaceExhausted` when every attempt collides.
    pub fn create_transaction_reference(&self, preset: Option<GroupRef>) -> Result<GroupRef> {
        generator::create_transaction_reference(self.store(), preset)
    }

    /// Reserve a fresh report token, or persist a preset one.
    ///
    /// # Errors
    ///
    /// Returns `IdentitySpaceExhausted` when every attempt collides.
    pub fn create_report_token(&self, preset: Option<ReportToken>) -> Result<ReportToken> {
        generator::create_report_token(self.store(), preset)
    }

    /// Persist a generation batch and generate `count` fresh codes in it.
    ///
    /// # Errors
    ///
    /// Returns `IdentitySpaceExhausted` when the code space runs out of
    /// attempts.
    pub fn create_code_batch(
        &self,
        batch: &ViatelBatch,
        count: usize,
    ) -> Result<Vec<RedemptionCode>> {
        viatel::create_code_batch(self.store(), batch, count)
    }

    /// Redeem a code at `now`, returning the batch it grants.
    ///
    /// # Errors
    ///
    /// Unknown, already-used and out-of-window codes are validation failures.
    pub fn redeem_code(&self, code: &RedemptionCode, now: DateTime<Utc>) -> Result<ViatelBatch> {
        viatel::redeem_code(self.store(), code, now)
    }

    /// Record a premium-rate call notification.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails.
    pub fn record_call_log(&self, log: ViatelLog) -> Result<ViatelLog> {
        viatel::record_call_log(self.store(), log)
    }
}
