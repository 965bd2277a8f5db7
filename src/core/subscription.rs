//! Subscription upsert and payment recording.
//! This write path is owned by the payment-confirmation flow only; the
//! conversational tools never touch these tables. Renewals of an active
//! VIP subscription stack onto the existing end date instead of resetting
//! from the payment time.

use crate::core::outcome::Outcome;
use crate::db::pool::Db;
use crate::db::queries::{
    get_subscription, insert_payment, insert_placeholder_profile, profile_exists,
    upsert_subscription,
};
use crate::errors::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::utils::time::fmt_dt;
use chrono::{Duration, NaiveDateTime};

/// Paid amount (VND) → term length.
pub fn days_for_amount(amount: i64) -> i64 {
    if amount >= 500_000 {
        365
    } else if amount >= 270_000 {
        180
    } else {
        30
    }
}

/// Upsert the user's subscription and append the payment record, all in
/// one transaction. Creates a placeholder profile first when missing so
/// the subscriptions FK holds.
pub fn apply_payment(
    db: &mut Db,
    user_id: &str,
    amount: i64,
    transaction_id: Option<&str>,
    now: NaiveDateTime,
) -> AppResult<Outcome> {
    let days = days_for_amount(amount);
    let tx = db.conn.transaction()?;

    if !profile_exists(&tx, user_id)? {
        insert_placeholder_profile(&tx, user_id)?;
    }

    let (start, end) = match get_subscription(&tx, user_id)? {
        Some(sub) if sub.is_active_vip_at(now) => {
            // extend: keep the original start, stack onto the current end
            (sub.start_date, sub.end_date + Duration::days(days))
        }
        _ => (now, now + Duration::days(days)),
    };

    let subscription_id = upsert_subscription(&tx, user_id, start, end)?;
    insert_payment(
        &tx,
        user_id,
        subscription_id,
        "vnpay",
        amount,
        "completed",
        transaction_id,
        &fmt_dt(now),
    )?;
    tx.commit()?;

    Ok(Outcome::success(format!(
        "VIP subscription active until {} ({days} days added).",
        fmt_dt(end)
    )))
}

/// Full gateway-return flow: validate the signature, unpack the
/// transaction reference and amount, then apply the payment.
pub fn confirm_return(
    db: &mut Db,
    gateway: &Gateway,
    query: &str,
    now: NaiveDateTime,
) -> AppResult<Outcome> {
    let params = gateway.validate_query(query)?;

    let code = params
        .get("vnp_ResponseCode")
        .map(String::as_str)
        .unwrap_or("");
    if code != "00" {
        return Ok(Outcome::Failure(format!(
            "Payment was not completed (gateway code '{code}')."
        )));
    }

    let txn_ref = params
        .get("vnp_TxnRef")
        .ok_or_else(|| AppError::Gateway("missing vnp_TxnRef".into()))?;
    // order ids are "user-id_timestamp"
    let Some((user_id, _)) = txn_ref.rsplit_once('_') else {
        return Err(AppError::Gateway(format!(
            "invalid vnp_TxnRef format: {txn_ref}"
        )));
    };

    // the gateway reports amounts multiplied by 100
    let amount: i64 = params
        .get("vnp_Amount")
        .and_then(|a| a.parse::<i64>().ok())
        .map(|a| a / 100)
        .ok_or_else(|| AppError::Gateway("missing or invalid vnp_Amount".into()))?;
    let transaction_no = params.get("vnp_TransactionNo").map(String::as_str);

    apply_payment(db, user_id, amount, transaction_no, now)
}
