//! P-256 (secp256r1/prime256v1) key operations and ECDSA (ES256)

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use p256::{
    EncodedPoint, PublicKey,
    ecdsa::{
        Signature, SigningKey, VerifyingKey,
        signature::{Signer, Verifier},
    },
    elliptic_curve::sec1::ToEncodedPoint,
};
use rand::rngs::OsRng;

use crate::{CryptoError, ECParams, EcCurve, JWK, KeyPair, Params, error::Result};

/// Generates a P-256 key pair
pub fn generate(secret: Option<&[u8]>) -> Result<KeyPair> {
    let signing_key = match secret {
        Some(secret) => SigningKey::from_slice(secret).map_err(|e| {
            CryptoError::KeyError(format!("P-256 secret material isn't valid: {e}"))
        })?,
        None => SigningKey::random(&mut OsRng),
    };

    let verifying_key = VerifyingKey::from(&signing_key);
    let point = verifying_key.to_encoded_point(false);
    let private_bytes = signing_key.to_bytes().to_vec();

    let mut jwk = point_jwk(&point)?;
    let Params::EC(params) = &mut jwk.params;
    params.d = Some(BASE64_URL_SAFE_NO_PAD.encode(&private_bytes));

    Ok(KeyPair {
        curve: EcCurve::P256,
        private_bytes,
        public_bytes: point.as_bytes().to_vec(),
        jwk,
    })
}

/// Constructs a native public key from SEC1 point bytes
///
/// The curve crate validates that the point is actually on the curve.
pub(crate) fn public_key(point: &[u8]) -> Result<PublicKey> {
    PublicKey::from_sec1_bytes(point)
        .map_err(|e| CryptoError::KeyError(format!("P-256 point rejected: {e}")))
}

/// Extracts a public JWK with coordinates at full field width
pub(crate) fn public_jwk(key: &PublicKey) -> Result<JWK> {
    point_jwk(&key.to_encoded_point(false))
}

pub(crate) fn sec1_bytes(key: &PublicKey) -> Vec<u8> {
    key.to_encoded_point(false).as_bytes().to_vec()
}

fn point_jwk(point: &EncodedPoint) -> Result<JWK> {
    let x = point
        .x()
        .ok_or_else(|| CryptoError::KeyError("Couldn't get X coordinate".into()))?;
    let y = point
        .y()
        .ok_or_else(|| CryptoError::KeyError("Couldn't get Y coordinate".into()))?;

    Ok(JWK {
        key_id: None,
        params: Params::EC(ECParams {
            curve: "P-256".to_string(),
            // FieldBytes keep leading zeros, so both strings encode exactly
            // 32 bytes.
            x: BASE64_URL_SAFE_NO_PAD.encode(x.as_slice()),
            y: BASE64_URL_SAFE_NO_PAD.encode(y.as_slice()),
            d: None,
        }),
    })
}

pub(crate) fn signing_key(secret: &[u8]) -> Result<SigningKey> {
    SigningKey::from_slice(secret)
        .map_err(|e| CryptoError::KeyError(format!("P-256 secret material isn't valid: {e}")))
}

pub(crate) fn verifying_key(point: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_sec1_bytes(point)
        .map_err(|e| CryptoError::KeyError(format!("P-256 point rejected: {e}")))
}

/// ES256 signature in fixed-width `r || s` form (64 bytes)
pub(crate) fn sign(key: &SigningKey, message: &[u8]) -> Vec<u8> {
    let signature: Signature = key.sign(message);
    signature.to_bytes().to_vec()
}

pub(crate) fn verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    // An undecodable signature is reported as a plain mismatch.
    match Signature::from_slice(signature) {
        Ok(signature) => key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}
