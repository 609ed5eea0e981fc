//! HMAC-SHA256 query signing for authenticated endpoints.

use crate::credentials::ApiCredentials;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 a message with the secret key, hex-encoded lowercase.
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Build a signed query string.
///
/// Parameters are kept in the given order, the timestamp is appended last,
/// and the HMAC signature of the resulting string is appended as the final
/// `signature` parameter.
pub fn signed_query(
    credentials: &ApiCredentials,
    params: &[(&str, String)],
    timestamp_ms: i64,
) -> String {
    let mut parts: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    parts.push(format!("timestamp={}", timestamp_ms));

    let query = parts.join("&");
    let signature = hmac_sha256_hex(credentials.secret(), &query);
    format!("{}&signature={}", query, signature)
}
