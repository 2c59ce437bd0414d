//! Accounts, logins and requesters.
//!
//! Accounts unify external identities: a backoffice account either maps a
//! CRM organization/user reference or a frontend user id (or both, for
//! migrated accounts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BackofficeError, Result};
use crate::ids::{AccountId, RequesterId};

/// A unified account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Row identifier.
    pub id: AccountId,

    /// CRM organization reference.
    pub org_ref: Option<String>,

    /// CRM user reference.
    pub usr_ref: Option<String>,

    /// Frontend (web shop) user id for migrated B2C accounts.
    pub ext_usr_ref: Option<i64>,

    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

impl Account {
    /// Create an account mapping a frontend user id.
    #[must_use]
    pub fn for_frontend_user(id: AccountId, ext_usr_ref: i64) -> Self {
        Self {
            id,
            org_ref: None,
            usr_ref: None,
            ext_usr_ref: Some(ext_usr_ref),
            created: Utc::now(),
        }
    }

    /// Create an account mapping a CRM organization.
    #[must_use]
    pub fn for_organization(id: AccountId, org_ref: impl Into<String>) -> Self {
        Self {
            id,
            org_ref: Some(org_ref.into()),
            usr_ref: None,
            ext_usr_ref: None,
            created: Utc::now(),
        }
    }

    /// Check the account's business rule: either a CRM organization reference
    /// or a frontend user reference must be provided.
    ///
    /// # Errors
    ///
    /// Returns [`BackofficeError::Validation`] if both references are absent.
    pub fn validate(&self) -> Result<()> {
        if self.org_ref.is_none() && self.ext_usr_ref.is_none() {
            return Err(BackofficeError::Validation(
                "account requires an org_ref or an ext_usr_ref".into(),
            ));
        }
        Ok(())
    }
}

/// Access rights bits carried by a [`Login`].
pub mod rights {
    /// May use the website.
    pub const WEBSITE_ACCESS: u32 = 1;
    /// May use the mobile applications.
    pub const MOBILE_ACCESS: u32 = 2;
}

/// A B2B login, keyed by e-mail address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    /// Login e-mail address (primary key).
    pub login: String,

    /// The company's account.
    pub account: AccountId,

    /// The employee's account, if any.
    pub sub_account: Option<AccountId>,

    /// Role code, defined by the frontend.
    pub role: i32,

    /// Bit-encoded access rights, see [`rights`].
    pub rights: u32,

    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

impl Login {
    /// Create a login for a company account with no extra rights.
    #[must_use]
    pub fn new(login: impl Into<String>, account: AccountId) -> Self {
        Self {
            login: login.into(),
            account,
            sub_account: None,
            role: 0,
            rights: 0,
            created: Utc::now(),
        }
    }

    /// Whether the login carries the given rights bit(s).
    #[must_use]
    pub const fn has_rights(&self, bits: u32) -> bool {
        self.rights & bits == bits
    }
}

/// A web-shop customer row, as imported from the frontend user table.
///
/// Customers are correlated with backoffice [`Account`]s through
/// `Account::ext_usr_ref`; a customer without a matching account simply has
/// no packages yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendUser {
    /// Frontend user id.
    pub uid: i64,
    /// Customer e-mail address.
    pub mail: String,
    /// Creation time as a unix timestamp, frontend convention.
    pub created: i64,
}

/// A requester/originator identifying the direct or indirect service caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    /// Row identifier.
    pub id: RequesterId,
    /// Description.
    pub desc: String,
    /// Legal entity country ISO code.
    pub legal_entity: String,
}

/// Check that `addr` is a plausibly well-formed e-mail address.
///
/// This is the minimal shape check applied before accepting a new frontend
/// e-mail: non-empty local part, exactly one `@`, and a domain containing a
/// dot. Full RFC validation is the mail system's problem.
///
/// # Errors
///
/// Returns [`BackofficeError::Validation`] for malformed addresses.
pub fn validate_email(addr: &str) -> Result<()> {
    let malformed = || BackofficeError::Validation(format!("malformed e-mail address: {addr}"));

    let (local, domain) = addr.split_once('@').ok_or_else(malformed)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || addr.contains(char::is_whitespace)
    {
        return Err(malformed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_requires_a_reference() {
        let mut account = Account::for_frontend_user(AccountId::new(1), 42);
        assert!(account.validate().is_ok());

        account.ext_usr_ref = None;
        assert!(account.validate().is_err());

        account.org_ref = Some("0015000000".into());
        assert!(account.validate().is_ok());
    }

    #[test]
    fn login_rights_bits() {
        let mut login = Login::new("buyer@example.com", AccountId::new(1));
        assert!(!login.has_rights(rights::WEBSITE_ACCESS));

        login.rights = rights::WEBSITE_ACCESS | rights::MOBILE_ACCESS;
        assert!(login.has_rights(rights::WEBSITE_ACCESS));
        assert!(login.has_rights(rights::MOBILE_ACCESS));
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.se").is_ok());

        for bad in [
            "",
            "no-at-sign",
            "@example.com",
            "user@",
            "user@nodot",
            "user@@example.com",
            "user@.com",
            "user@example.",
            "user name@example.com",
        ] {
            assert!(validate_email(bad).is_err(), "accepted: {bad:?}");
        }
    }
}
