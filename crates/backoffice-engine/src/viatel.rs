//! Viatel code batches, redemption and call-log ingestion.

use chrono::{DateTime, Utc};

use backoffice_core::{RedemptionCode, ViatelBatch, ViatelLog};
use backoffice_store::{schema::seq, Store};

use crate::error::{EngineError, Result};
use crate::generator::create_viatel_code;

/// Persist a generation batch and generate `count` fresh codes in it.
///
/// # Errors
///
/// Returns `IdentitySpaceExhausted` if the code space runs out of attempts;
/// storage failures propagate.
pub fn create_code_batch(
    store: &dyn Store,
    batch: &ViatelBatch,
    count: usize,
) -> Result<Vec<RedemptionCode>> {
    store.put_viatel_batch(batch)?;

    let mut generated = Vec::with_capacity(count);
    for _ in 0..count {
        generated.push(create_viatel_code(store, batch.batch, None)?);
    }

    tracing::info!(
        batch = %batch.batch,
        count = generated.len(),
        "generated viatel code batch"
    );
    Ok(generated)
}

/// Redeem a code at `now`, returning the batch it grants.
///
/// Redemption is one-shot: the used-code marker is written under the store's
/// uniqueness authority, so two racing redemptions cannot both succeed.
///
/// # Errors
///
/// Unknown codes, already-used codes and codes of batches that are inactive
/// or outside their validity window are validation failures; storage
/// failures propagate.
pub fn redeem_code(
    store: &dyn Store,
    code: &RedemptionCode,
    now: DateTime<Utc>,
) -> Result<ViatelBatch> {
    let Some(row) = store.get_viatel_code(code)? else {
        return Err(EngineError::validation(format!("unknown code {code}")));
    };

    let Some(batch) = store.get_viatel_batch(row.batch)? else {
        return Err(backoffice_store::StoreError::NotFound.into());
    };
    if !batch.is_redeemable_at(now) {
        tracing::warn!(code = %code, batch = %batch.batch, "code not redeemable");
        return Err(EngineError::validation(format!(
            "code {code} is not redeemable"
        )));
    }

    match store.mark_code_used(code, now) {
        Err(e) if e.is_uniqueness_violation() => Err(EngineError::validation(format!(
            "code {code} was already redeemed"
        ))),
        other => {
            other?;
            tracing::info!(code = %code, batch = %batch.batch, "code redeemed");
            Ok(batch)
        }
    }
}

/// Record a premium-rate call notification, assigning a row id when the
/// caller did not supply one.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub fn record_call_log(store: &dyn Store, mut log: ViatelLog) -> Result<ViatelLog> {
    if log.id <= 0 {
        log.id = store.next_row_id(seq::VIATEL_LOGS)?;
    }
    store.put_viatel_log(&log)?;
    Ok(log)
}
