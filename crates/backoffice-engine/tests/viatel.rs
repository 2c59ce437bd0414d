//! Viatel code generation and redemption lifecycle tests.

mod common;

use chrono::{Duration, Utc};

use backoffice_core::{
    codes, BackofficeError, BatchId, ConditionId, RedemptionCode, ViatelBatch, ViatelLog,
};
use backoffice_engine::{create_code_batch, record_call_log, redeem_code, EngineError};
use backoffice_store::Store;

use common::open_store;

fn batch(id: i64) -> ViatelBatch {
    ViatelBatch::new(BatchId::new(id), ConditionId::new("SE_VHR_SINGLE"))
}

#[test]
fn generated_codes_conform_and_persist() {
    let (_dir, store) = open_store();
    let codes_out = create_code_batch(&store, &batch(1), 25).unwrap();

    assert_eq!(codes_out.len(), 25);
    for code in &codes_out {
        assert!(codes::VIATEL_CODE.matches(code.as_str()));
        let row = store.get_viatel_code(code).unwrap().unwrap();
        assert_eq!(row.batch, BatchId::new(1));
    }
}

#[test]
fn redemption_is_one_shot() {
    let (_dir, store) = open_store();
    let codes_out = create_code_batch(&store, &batch(1), 1).unwrap();
    let code = &codes_out[0];
    let now = Utc::now();

    let granted = redeem_code(&store, code, now).unwrap();
    assert_eq!(granted.condition, Some(ConditionId::new("SE_VHR_SINGLE")));
    assert_eq!(store.code_used_at(code).unwrap(), Some(now));

    let err = redeem_code(&store, code, now).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Domain(BackofficeError::Validation(_))
    ));
}

#[test]
fn unknown_code_is_rejected() {
    let (_dir, store) = open_store();
    let err = redeem_code(&store, &RedemptionCode::new("999999"), Utc::now()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Domain(BackofficeError::Validation(_))
    ));
}

#[test]
fn out_of_window_code_is_rejected() {
    let (_dir, store) = open_store();
    let now = Utc::now();
    let mut expired = batch(2);
    expired.valid_to = Some(now - Duration::days(1));
    let codes_out = create_code_batch(&store, &expired, 1).unwrap();

    let err = redeem_code(&store, &codes_out[0], now).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Domain(BackofficeError::Validation(_))
    ));
    // Rejection must not burn the code.
    assert_eq!(store.code_used_at(&codes_out[0]).unwrap(), None);
}

#[test]
fn inactive_batch_code_is_rejected() {
    let (_dir, store) = open_store();
    let mut test_batch = batch(3);
    test_batch.inactive = backoffice_core::inactive_bits::TEST;
    let codes_out = create_code_batch(&store, &test_batch, 1).unwrap();

    assert!(redeem_code(&store, &codes_out[0], Utc::now()).is_err());
}

#[test]
fn call_log_gets_a_row_id() {
    let (_dir, store) = open_store();
    let log = ViatelLog {
        id: 0,
        prn: "0944102030".into(),
        input: Some("123456".into()),
        caller: None,
        time: Utc::now(),
        rate_cents: 2500,
        currency: "SEK".into(),
        ratetype: "PPC".into(),
        duration_seconds: 45,
        repeats: 0,
        protected: true,
        created: Utc::now(),
    };

    let stored = record_call_log(&store, log).unwrap();
    assert!(stored.id > 0);
}
