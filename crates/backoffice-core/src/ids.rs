//! Identifier types for the backoffice.
//!
//! Two families of identifiers exist:
//!
//! - **Row identifiers**: sequence-assigned `i64` keys (`AccountId`,
//!   `TransactionId`, ...). They are monotonically increasing, so ordering by
//!   identifier descending is a proxy for recency.
//! - **String identifiers**: short unique strings that are either fixed
//!   catalogue keys (`ConditionId`, `ReportTypeId`) or generated at
//!   row-creation time (`GroupRef`, `ReportToken`, `RedemptionCode`).
//!
//! The macros below reduce boilerplate and keep serialization, display and
//! byte-encoding behavior consistent across all identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel row identifier used by "missing entity" placeholders.
pub const MISSING_ROW_ID: i64 = -1;

/// Define a sequence-assigned `i64` row identifier newtype.
macro_rules! row_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an identifier from a raw row id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The sentinel identifier carried by missing-entity placeholders.
            #[must_use]
            pub const fn missing() -> Self {
                Self(crate::ids::MISSING_ROW_ID)
            }

            /// Return the raw row id.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Big-endian byte encoding, suitable for ordered store keys.
            #[must_use]
            pub const fn to_be_bytes(&self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            /// Decode an identifier from its big-endian byte encoding.
            #[must_use]
            pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
                Self(i64::from_be_bytes(bytes))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Define an opaque string identifier newtype.
macro_rules! string_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }
    };
}

row_id_type!(AccountId, "A backoffice account row identifier.");
row_id_type!(
    TransactionId,
    "A transaction row identifier.\n\nSequence-assigned, so descending order is newest-first."
);
row_id_type!(ReportId, "A report (or archived report) row identifier.");
row_id_type!(BatchId, "A maintenance/generation batch row identifier.");
row_id_type!(PaymentId, "A frontend payment item identifier (`cpid`).");
row_id_type!(RequesterId, "A requester/originator row identifier.");

string_id_type!(
    ReportTypeId,
    "A report type catalogue key, e.g. `VHR_SE_SV_HTML`."
);
string_id_type!(
    GroupRef,
    "A grouping reference: a short human-readable token correlating a credit\n\
     grant with the report pulls spent against it."
);
string_id_type!(
    ReportToken,
    "An opaque 32-character token linking external report-view URLs."
);
string_id_type!(RedemptionCode, "A premium-rate-SMS redemption code.");

/// A pricing condition catalogue key, e.g. `SE_VHR_SINGLE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(String);

impl ConditionId {
    /// Create a new condition identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this condition grants untracked credits.
    ///
    /// Unlimited conditions are recognized by their identifier suffix; the
    /// aggregator reports their balance as the unlimited sentinel rather
    /// than a count.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.0.ends_with("UNLIMITED")
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ConditionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ConditionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<[u8]> for ConditionId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
