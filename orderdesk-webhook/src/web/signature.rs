//! Foxy webhook signature verification.
//!
//! Foxy signs each webhook body with HMAC-SHA256 keyed by the store's webhook
//! encryption key and sends the hex digest in `Foxy-Webhook-Signature`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::webhook::{AuthValidator, ErrorDescriptor, IncomingRequest, SIGNATURE_HEADER};

type HmacSha256 = Hmac<Sha256>;

pub const KEY_NOT_CONFIGURED: &str = "Webhook encryption key is not configured";
pub const SIGNATURE_MISSING: &str = "Missing webhook signature";
pub const BODY_MISSING: &str = "Missing request body";
pub const SIGNATURE_INVALID: &str = "Invalid webhook signature";

/// Verify a Foxy webhook signature.
///
/// # Arguments
///
/// * `encryption_key` - The webhook encryption key configured in Foxy
/// * `body` - The raw request body, exactly as received
/// * `signature` - The hex digest from the signature header
///
/// # Returns
///
/// `true` if the signature matches the body.
pub fn verify_foxy_signature(encryption_key: &str, body: &str, signature: &str) -> bool {
    if encryption_key.is_empty() || signature.is_empty() {
        return false;
    }

    let provided = match hex::decode(signature.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(signature_length = signature.len(), "foxy_signature_not_hex");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(encryption_key.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("foxy_signature_invalid_key");
            return false;
        }
    };

    mac.update(body.as_bytes());

    // Constant-time comparison
    let valid = mac.verify_slice(&provided).is_ok();

    if !valid {
        warn!(body_length = body.len(), "foxy_signature_mismatch");
    }

    valid
}

/// [`AuthValidator`] checking the Foxy signature header against the body.
#[derive(Debug, Clone)]
pub struct FoxySignatureValidator {
    encryption_key: Option<String>,
}

impl FoxySignatureValidator {
    pub fn new(encryption_key: Option<String>) -> Self {
        Self { encryption_key }
    }
}

impl AuthValidator for FoxySignatureValidator {
    fn get_error(&self, request: &IncomingRequest) -> Option<ErrorDescriptor> {
        let key = match self.encryption_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                warn!("foxy_encryption_key_not_configured");
                return Some(ErrorDescriptor::new(KEY_NOT_CONFIGURED));
            }
        };

        let signature = match request.header(SIGNATURE_HEADER) {
            Some(sig) if !sig.trim().is_empty() => sig,
            _ => {
                warn!(method = %request.http_method, "foxy_signature_missing");
                return Some(ErrorDescriptor::new(SIGNATURE_MISSING));
            }
        };

        if request.body.is_empty() {
            warn!(method = %request.http_method, "foxy_body_missing");
            return Some(ErrorDescriptor::new(BODY_MISSING));
        }

        if !verify_foxy_signature(key, &request.body, signature) {
            return Some(ErrorDescriptor::new(SIGNATURE_INVALID));
        }

        None
    }
}

/// Hex HMAC-SHA256 of `body`, the value Foxy puts in the signature header.
#[cfg(test)]
pub(crate) fn sign_body(encryption_key: &str, body: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(encryption_key.as_bytes()).ok()?;
    mac.update(body.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}
