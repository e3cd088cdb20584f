//! P-384 (secp384r1) key operations and ECDSA (ES384)

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use p384::{
    EncodedPoint, PublicKey,
    ecdsa::{
        Signature, SigningKey, VerifyingKey,
        signature::{Signer, Verifier},
    },
    elliptic_curve::sec1::ToEncodedPoint,
};
use rand::rngs::OsRng;

use crate::{CryptoError, ECParams, EcCurve, JWK, KeyPair, Params, error::Result};

/// Generates a P-384 key pair
pub fn generate(secret: Option<&[u8]>) -> Result<KeyPair> {
    let signing_key = match secret {
        Some(secret) => SigningKey::from_slice(secret).map_err(|e| {
            CryptoError::KeyError(format!("P-384 secret material isn't valid: {e}"))
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
        curve: EcCurve::P384,
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
        .map_err(|e| CryptoError::KeyError(format!("P-384 point rejected: {e}")))
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
            curve: "P-384".to_string(),
            x: BASE64_URL_SAFE_NO_PAD.encode(x.as_slice()),
            y: BASE64_URL_SAFE_NO_PAD.encode(y.as_slice()),
            d: None,
        }),
    })
}

pub(crate) fn signing_key(secret: &[u8]) -> Result<SigningKey> {
    SigningKey::from_slice(secret)
        .map_err(|e| CryptoError::KeyError(format!("P-384 secret material isn't valid: {e}")))
}

pub(crate) fn verifying_key(point: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_sec1_bytes(point)
        .map_err(|e| CryptoError::KeyError(format!("P-384 point rejected: {e}")))
}

/// ES384 signature in fixed-width `r || s` form (96 bytes)
pub(crate) fn sign(key: &SigningKey, message: &[u8]) -> Vec<u8> {
    let signature: Signature = key.sign(message);
    signature.to_bytes().to_vec()
}

pub(crate) fn verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::from_slice(signature) {
        Ok(signature) => key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_from_secret() {
        let d = "sbb1acpuGPO2P3-aAchoUO5Ghs9Iyecm52HgcvVWR58Pmd-uvKZd-38OhCNCiaNd";
        let x = "zBTXJl2R0sjxCYxvq6_eQovQWTyZUlv5wMWV857GNvYT39h7AMCPCVRrH9l6qVfb";
        let y = "meSAqJ1ycBRzuA2FwKjHWDT6BaDufqxADi6GMSqbCTvZzb0qxgHKdXCXHcbl1EPv";

        let secret_bytes = BASE64_URL_SAFE_NO_PAD.decode(d).unwrap();
        let keypair = generate(Some(&secret_bytes)).unwrap();

        let Params::EC(params) = &keypair.jwk.params;
        assert_eq!(params.d.as_ref().unwrap(), d);
        assert_eq!(params.x, x);
        assert_eq!(params.y, y);

        assert_eq!(keypair.curve, EcCurve::P384);
        assert_eq!(keypair.public_bytes.len(), 97);
    }

    #[test]
    fn public_jwk_from_compressed_point() {
        let bytes: [u8; 49] = [
            3, 148, 137, 211, 198, 95, 31, 140, 178, 169, 253, 64, 171, 196, 141, 22, 14, 73, 90,
            134, 47, 187, 251, 254, 137, 110, 216, 135, 142, 36, 111, 50, 248, 94, 118, 18, 149,
            116, 112, 95, 139, 97, 194, 99, 203, 127, 64, 156, 156,
        ];

        let key = public_key(&bytes).unwrap();
        let jwk = public_jwk(&key).unwrap();

        let Params::EC(params) = &jwk.params;
        assert_eq!(params.curve, "P-384");
        assert!(params.d.is_none());
        assert_eq!(
            params.x,
            "lInTxl8fjLKp_UCrxI0WDklahi-7-_6JbtiHjiRvMvhedhKVdHBfi2HCY8t_QJyc"
        );
        assert_eq!(
            params.y,
            "y6N1IC-2mXxHreETBW7K3mBcw0qGr3CWHCs-yl09yCQRLcyfGv7XhqAngHOu51Zv"
        );
    }

    #[test]
    fn sign_and_verify() {
        let keypair = generate(None).unwrap();
        let key = signing_key(&keypair.private_bytes).unwrap();

        let signature = sign(&key, b"message");
        assert_eq!(signature.len(), 96);

        let verifier = verifying_key(&keypair.public_bytes).unwrap();
        assert!(verify(&verifier, b"message", &signature));
        assert!(!verify(&verifier, b"other message", &signature));
    }
}
