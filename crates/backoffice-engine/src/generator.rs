//! Unique-identifier generation with retry-on-collision.
//!
//! All three generated identifier families (grouping references, report
//! tokens, Viatel redemption codes) follow the same discipline: sample a
//! candidate from the family's [`CodeSpec`], try to persist it, and retry on
//! a uniqueness violation up to the spec's attempt budget. Any other storage
//! failure propagates immediately. Uniqueness itself is the storage layer's
//! authority; no in-process locking is involved.
//!
//! When the caller supplies a pre-assigned identity, generation is skipped
//! entirely and the identity is persisted as-is.

use chrono::Utc;

use backoffice_core::{
    codes, BackofficeError, BatchId, CodeSpec, GroupRef, RedemptionCode, ReportToken, ViatelCode,
};
use backoffice_store::{Store, StoreError};

use crate::error::Result;

/// Run the generate-and-persist loop for one identifier family.
///
/// `persist` is called with each candidate; returning a uniqueness violation
/// discards the candidate and tries again, any other error propagates.
/// Exhausting `spec.max_attempts` raises
/// [`BackofficeError::IdentitySpaceExhausted`].
fn generate_unique<F>(spec: &CodeSpec, what: &'static str, mut persist: F) -> Result<String>
where
    F: FnMut(&str) -> std::result::Result<(), StoreError>,
{
    let mut rng = rand::thread_rng();
    for attempt in 1..=spec.max_attempts {
        let candidate = spec.sample(&mut rng);
        match persist(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.is_uniqueness_violation() => {
                tracing::warn!(what, attempt, "generated identifier collided, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(BackofficeError::IdentitySpaceExhausted {
        what,
        attempts: spec.max_attempts,
    }
    .into())
}

/// Create a new grouping reference row.
///
/// With `preset`, the reference is persisted as-is without generation.
///
/// # Errors
///
/// Returns `IdentitySpaceExhausted` after 5 colliding attempts; other
/// storage failures propagate unretried.
pub fn create_transaction_reference(
    store: &dyn Store,
    preset: Option<GroupRef>,
) -> Result<GroupRef> {
    if let Some(group_ref) = preset {
        store.put_group_ref(&group_ref, Utc::now())?;
        return Ok(group_ref);
    }

    let code = generate_unique(&codes::TRANSACTION_REFERENCE, "transaction reference", |c| {
        store.insert_group_ref(&GroupRef::new(c), Utc::now())
    })?;
    Ok(GroupRef::new(code))
}

/// Create a new report token row.
///
/// With `preset`, the token is persisted as-is without generation.
///
/// # Errors
///
/// Returns `IdentitySpaceExhausted` after 3 colliding attempts; other
/// storage failures propagate unretried.
pub fn create_report_token(store: &dyn Store, preset: Option<ReportToken>) -> Result<ReportToken> {
    if let Some(token) = preset {
        store.put_token(&token)?;
        return Ok(token);
    }

    let code = generate_unique(&codes::REPORT_TOKEN, "report token", |c| {
        store.insert_token(&ReportToken::new(c))
    })?;
    Ok(ReportToken::new(code))
}

/// Create a new Viatel redemption code row under `batch`.
///
/// With `preset`, the code is persisted as-is without generation.
///
/// # Errors
///
/// Returns `IdentitySpaceExhausted` after 100 colliding attempts; other
/// storage failures propagate unretried.
pub fn create_viatel_code(
    store: &dyn Store,
    batch: BatchId,
    preset: Option<RedemptionCode>,
) -> Result<RedemptionCode> {
    if let Some(code) = preset {
        store.put_viatel_code(&ViatelCode {
            code: code.clone(),
            batch,
        })?;
        return Ok(code);
    }

    let code = generate_unique(&codes::VIATEL_CODE, "viatel code", |c| {
        store.insert_viatel_code(&ViatelCode {
            code: RedemptionCode::new(c),
            batch,
        })
    })?;
    Ok(RedemptionCode::new(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn returns_first_candidate_when_persistence_succeeds() {
        let calls = Cell::new(0u32);
        let code = generate_unique(&codes::TRANSACTION_REFERENCE, "test", |c| {
            calls.set(calls.get() + 1);
            assert!(codes::TRANSACTION_REFERENCE.matches(c));
            Ok(())
        })
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(codes::TRANSACTION_REFERENCE.matches(&code));
    }

    #[test]
    fn retries_exactly_max_attempts_then_exhausts() {
        for spec in [
            codes::TRANSACTION_REFERENCE,
            codes::REPORT_TOKEN,
            codes::VIATEL_CODE,
        ] {
            let calls = Cell::new(0u32);
            let err = generate_unique(&spec, "test", |c| {
                calls.set(calls.get() + 1);
                Err(StoreError::DuplicateKey(c.to_string()))
            })
            .unwrap_err();

            assert_eq!(calls.get(), spec.max_attempts);
            assert!(matches!(
                err,
                crate::EngineError::Domain(BackofficeError::IdentitySpaceExhausted {
                    what: "test",
                    ..
                })
            ));
        }
    }

    #[test]
    fn non_collision_failure_propagates_without_retry() {
        let calls = Cell::new(0u32);
        let err = generate_unique(&codes::TRANSACTION_REFERENCE, "test", |_| {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                Err(StoreError::Database("disk full".into()))
            } else {
                Err(StoreError::DuplicateKey("collision".into()))
            }
        })
        .unwrap_err();

        // One collision absorbed, then the database error stopped the loop.
        assert_eq!(calls.get(), 2);
        assert!(matches!(err, crate::EngineError::Store(_)));
    }

    #[test]
    fn collision_then_success_returns_fresh_candidate() {
        let calls = Cell::new(0u32);
        let code = generate_unique(&codes::VIATEL_CODE, "test", |_| {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(StoreError::DuplicateKey("collision".into()))
            } else {
                Ok(())
            }
        })
        .unwrap();

        assert_eq!(calls.get(), 3);
        assert!(codes::VIATEL_CODE.matches(&code));
    }
}
