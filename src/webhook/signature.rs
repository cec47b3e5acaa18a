//! HMAC verification for inbound webhook deliveries.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded HMAC-SHA256 of the raw request body.
pub const SIGNATURE_HEADER: &str = "x-alchemy-signature";

/// Check a claimed webhook signature against the exact raw body bytes.
///
/// The comparison runs in constant time; hex case is normalized while
/// decoding the claimed signature. A missing or empty header, an empty body,
/// an empty signing key, or a signature that is not valid hex all resolve to
/// `false`. This function never panics and never surfaces an error — on this
/// boundary every ambiguity is a rejection.
pub fn verify_signature(body: &[u8], signature: Option<&str>, signing_key: &str) -> bool {
    let Some(signature) = signature else {
        return false;
    };
    if signature.is_empty() || signing_key.is_empty() || body.is_empty() {
        return false;
    }

    let Ok(claimed) = hex::decode(signature.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(signing_key.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&claimed).is_ok()
}
