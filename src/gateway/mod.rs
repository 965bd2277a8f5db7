//! VNPAY hosted-checkout integration: building signed payment URLs and
//! verifying the signature on return redirects. The signature is
//! HMAC-SHA512 over the sorted, URL-encoded parameter string, with
//! encoding that matches the gateway's reference implementation
//! (space becomes '+').

use crate::config::GatewayConfig;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::collections::BTreeMap;

type HmacSha512 = Hmac<Sha512>;

const VNP_VERSION: &str = "2.1.0";
const VNP_COMMAND: &str = "pay";
const VNP_CURRENCY: &str = "VND";
const VNP_LOCALE: &str = "vn";
const VNP_ORDER_TYPE: &str = "other";

pub struct Gateway {
    tmn_code: String,
    secret: String,
    payment_url: String,
    return_url: String,
}

impl Gateway {
    pub fn from_config(cfg: &GatewayConfig) -> AppResult<Self> {
        let tmn_code = cfg
            .tmn_code
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("gateway tmn_code is not set".into()))?;
        let secret = cfg
            .hash_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("gateway hash_secret is not set".into()))?;

        Ok(Gateway {
            tmn_code: tmn_code.to_string(),
            secret: secret.to_string(),
            payment_url: cfg.payment_url.clone(),
            return_url: cfg.return_url.clone(),
        })
    }

    /// Hosted-checkout URL for `amount` VND. The gateway expects amounts
    /// multiplied by 100 and an order reference it echoes back on return;
    /// ours is "user-id_timestamp".
    pub fn build_payment_url(
        &self,
        user_id: &str,
        amount: i64,
        description: Option<&str>,
        bank_code: Option<&str>,
        now: NaiveDateTime,
    ) -> AppResult<String> {
        let txn_ref = format!("{user_id}_{}", now.format("%Y%m%d%H%M%S"));
        let order_info = description
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Thanh toan don hang {txn_ref}"));

        let mut params = BTreeMap::new();
        params.insert("vnp_Version", VNP_VERSION.to_string());
        params.insert("vnp_Command", VNP_COMMAND.to_string());
        params.insert("vnp_TmnCode", self.tmn_code.clone());
        params.insert("vnp_Amount", (amount * 100).to_string());
        params.insert("vnp_CurrCode", VNP_CURRENCY.to_string());
        params.insert("vnp_TxnRef", txn_ref);
        params.insert("vnp_OrderInfo", order_info);
        params.insert("vnp_OrderType", VNP_ORDER_TYPE.to_string());
        params.insert("vnp_Locale", VNP_LOCALE.to_string());
        params.insert("vnp_ReturnUrl", self.return_url.clone());
        params.insert("vnp_IpAddr", "127.0.0.1".to_string());
        params.insert(
            "vnp_CreateDate",
            now.format("%Y%m%d%H%M%S").to_string(),
        );
        if let Some(bank) = bank_code.filter(|b| !b.trim().is_empty()) {
            params.insert("vnp_BankCode", bank.to_string());
        }

        let query = encode_sorted(params.iter().map(|(k, v)| (*k, v.as_str())));
        let signature = self.sign(&query)?;
        Ok(format!(
            "{}?{query}&vnp_SecureHash={signature}",
            self.payment_url
        ))
    }

    /// Checks the signature on a return-redirect query string and hands
    /// back the decoded parameters.
    pub fn validate_query(&self, query: &str) -> AppResult<BTreeMap<String, String>> {
        let mut params = parse_query(query);
        let Some(signature) = params.remove("vnp_SecureHash") else {
            return Err(AppError::InvalidSignature);
        };
        params.remove("vnp_SecureHashType");

        let hash_data = encode_sorted(
            params
                .iter()
                .filter(|(k, _)| k.starts_with("vnp_"))
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        self.verify(&hash_data, &signature)?;
        Ok(params)
    }

    fn sign(&self, data: &str) -> AppResult<String> {
        let mut mac = HmacSha512::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Gateway(format!("bad signing key: {e}")))?;
        mac.update(data.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn verify(&self, data: &str, signature_hex: &str) -> AppResult<()> {
        let expected = hex::decode(signature_hex).map_err(|_| AppError::InvalidSignature)?;
        let mut mac = HmacSha512::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Gateway(format!("bad signing key: {e}")))?;
        mac.update(data.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| AppError::InvalidSignature)
    }
}

/// Sorted `key=value` pairs joined with '&', both sides URL-encoded.
fn encode_sorted<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .map(|(k, v)| format!("{}={}", quote_plus(k), quote_plus(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encoding with '+' for spaces, matching Python's quote_plus
/// which the gateway's reference code uses.
fn quote_plus(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

fn unquote_plus(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    let query = query.trim_start_matches('?');
    query
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (unquote_plus(k), unquote_plus(v)),
            None => (unquote_plus(pair), String::new()),
        })
        .collect()
}
