//! Customer lookup, request-scoped memoization and new-login validation.

use serde::Serialize;

use backoffice_core::{validate_email, FrontendUser, Login, PaymentItem};
use backoffice_store::Store;

use crate::error::{EngineError, Result};
use crate::links::LinkGenerator;
use crate::packages::{compute_packages, PackageView};

/// Sentinel frontend user id of a missing customer.
const MISSING_UID: i64 = -1;

/// A customer as seen by one request, with the aggregation results memoized
/// for the lifetime of the value.
///
/// A missing customer is a distinct, inert variant carrying the queried mail
/// and a sentinel identity, so callers render not-found customers uniformly
/// without branching.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// Frontend user id; `-1` for a missing customer.
    pub uid: i64,
    /// Customer e-mail address.
    pub mail: String,
    /// Creation time as a unix timestamp; `0` for a missing customer.
    pub created: i64,

    #[serde(skip)]
    packages: Option<Vec<PackageView>>,
    #[serde(skip)]
    payments: Option<Vec<PaymentItem>>,
}

impl Customer {
    /// Wrap a known frontend user row.
    #[must_use]
    pub fn known(user: FrontendUser) -> Self {
        Self {
            uid: user.uid,
            mail: user.mail,
            created: user.created,
            packages: None,
            payments: None,
        }
    }

    /// The placeholder for a customer that does not exist.
    #[must_use]
    pub fn missing(mail: impl Into<String>) -> Self {
        Self {
            uid: MISSING_UID,
            mail: mail.into(),
            created: 0,
            packages: None,
            payments: None,
        }
    }

    /// Whether this is the missing-customer placeholder.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.uid == MISSING_UID
    }

    /// The customer's packages, computed once per value.
    ///
    /// The first call aggregates (with the given `show_archived` setting)
    /// and caches; later calls return the cached sequence regardless of the
    /// flag. Values live for one request, so the cache is never stale.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails.
    pub fn packages(
        &mut self,
        store: &dyn Store,
        links: &dyn LinkGenerator,
        show_archived: bool,
    ) -> Result<&[PackageView]> {
        if self.packages.is_none() {
            self.packages = Some(compute_packages(store, links, self.uid, show_archived)?);
        }
        Ok(self.packages.as_deref().unwrap_or_default())
    }

    /// The customer's payment records, newest first, computed once per
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails.
    pub fn payments(&mut self, store: &dyn Store) -> Result<&[PaymentItem]> {
        if self.payments.is_none() {
            self.payments = Some(store.list_payments_by_mail(&self.mail)?);
        }
        Ok(self.payments.as_deref().unwrap_or_default())
    }
}

/// Look up a customer by mail, falling back to the missing placeholder.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub fn customer_by_mail(store: &dyn Store, mail: &str) -> Result<Customer> {
    Ok(store
        .get_frontend_user_by_mail(mail)?
        .map_or_else(|| Customer::missing(mail), Customer::known))
}

/// Check that `mail` may become a new frontend customer address.
///
/// An address already taken by a B2B login is rejected, as is a malformed
/// one.
///
/// # Errors
///
/// Returns a validation failure for taken or malformed addresses; storage
/// failures propagate.
pub fn validate_new_email(store: &dyn Store, mail: &str) -> Result<()> {
    if store.login_exists(mail)? {
        return Err(EngineError::validation(format!(
            "{mail} already exists as a B2B user"
        )));
    }
    validate_email(mail)?;
    Ok(())
}

/// Create a B2B login after validating its e-mail address.
///
/// # Errors
///
/// Returns a validation failure for a malformed or already-taken address;
/// storage failures propagate.
pub fn create_login(store: &dyn Store, login: &Login) -> Result<()> {
    validate_email(&login.login)?;
    match store.insert_login(login) {
        Err(e) if e.is_uniqueness_violation() => Err(EngineError::validation(format!(
            "{} already exists as a B2B user",
            login.login
        ))),
        other => Ok(other?),
    }
}
