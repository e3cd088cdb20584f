//! Conversion between JWK elliptic-curve keys and native public key objects
//!
//! The coordinate checks live here; point-on-curve validation is delegated
//! to the curve crates, which reject points that aren't on the curve when
//! the SEC1 encoding is parsed.

use std::fmt;

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};

use crate::{CryptoError, JWK, error::Result};

/// Closed registry of named curves recognized by the key converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

impl EcCurve {
    /// JOSE curve registry name (`crv` parameter)
    pub fn name(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Field element width in bytes; every coordinate serializes to exactly
    /// this length
    pub fn field_size(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }
}

impl TryFrom<&str> for EcCurve {
    type Error = CryptoError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "P-256" => Ok(EcCurve::P256),
            "P-384" => Ok(EcCurve::P384),
            "P-521" => Ok(EcCurve::P521),
            _ => Err(CryptoError::UnsupportedCurve(value.to_string())),
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Native elliptic-curve public key object
///
/// Wraps the curve crate's key type; construction goes through
/// [`to_public_key`] so every key in circulation has passed the structural
/// checks and the provider's on-curve validation.
#[derive(Debug, Clone)]
pub enum EcPublicKey {
    #[cfg(feature = "p256")]
    P256(p256::PublicKey),
    #[cfg(feature = "p384")]
    P384(p384::PublicKey),
    #[cfg(feature = "p521")]
    P521(p521::PublicKey),
}

impl EcPublicKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            #[cfg(feature = "p256")]
            EcPublicKey::P256(_) => EcCurve::P256,
            #[cfg(feature = "p384")]
            EcPublicKey::P384(_) => EcCurve::P384,
            #[cfg(feature = "p521")]
            EcPublicKey::P521(_) => EcCurve::P521,
        }
    }

    /// SEC1 uncompressed point encoding (`0x04 || x || y`)
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            #[cfg(feature = "p256")]
            EcPublicKey::P256(key) => crate::p256::sec1_bytes(key),
            #[cfg(feature = "p384")]
            EcPublicKey::P384(key) => crate::p384::sec1_bytes(key),
            #[cfg(feature = "p521")]
            EcPublicKey::P521(key) => crate::p521::sec1_bytes(key),
        }
    }
}

/// Generated key pair with raw bytes and JWK representation
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub curve: EcCurve,
    pub private_bytes: Vec<u8>,
    pub public_bytes: Vec<u8>,
    pub jwk: JWK,
}

/// Converts a JWK into a native public key object
///
/// Checks, in order: the curve is recognized, both coordinates decode from
/// unpadded base64url, and each decoded coordinate is exactly the curve's
/// field width. A wrong-length coordinate is rejected rather than padded or
/// truncated; it means the key is malformed or not on the stated curve. The
/// assembled uncompressed point is then handed to the curve crate, which is
/// authoritative for rejecting points not on the curve.
pub fn to_public_key(jwk: &JWK) -> Result<EcPublicKey> {
    let curve = jwk.curve()?;
    let params = jwk.ec_params();

    let x = decode_coordinate("x", &params.x, curve)?;
    let y = decode_coordinate("y", &params.y, curve)?;

    // SEC1 uncompressed form: marker byte then fixed-width big-endian X, Y.
    let mut point = Vec::with_capacity(1 + 2 * curve.field_size());
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);

    match curve {
        #[cfg(feature = "p256")]
        EcCurve::P256 => Ok(EcPublicKey::P256(crate::p256::public_key(&point)?)),
        #[cfg(feature = "p384")]
        EcCurve::P384 => Ok(EcPublicKey::P384(crate::p384::public_key(&point)?)),
        #[cfg(feature = "p521")]
        EcCurve::P521 => Ok(EcPublicKey::P521(crate::p521::public_key(&point)?)),
        #[allow(unreachable_patterns)]
        _ => Err(CryptoError::UnsupportedCurve(curve.to_string())),
    }
}

/// Converts a native public key object back into a public JWK
///
/// Coordinates are re-encoded at the curve's full field width; a coordinate
/// whose numeric value is short keeps its leading zero bytes so the
/// base64url string always has the same length.
pub fn from_public_key(key: &EcPublicKey) -> Result<JWK> {
    match key {
        #[cfg(feature = "p256")]
        EcPublicKey::P256(key) => crate::p256::public_jwk(key),
        #[cfg(feature = "p384")]
        EcPublicKey::P384(key) => crate::p384::public_jwk(key),
        #[cfg(feature = "p521")]
        EcPublicKey::P521(key) => crate::p521::public_jwk(key),
    }
}

fn decode_coordinate(name: &str, value: &str, curve: EcCurve) -> Result<Vec<u8>> {
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| CryptoError::MalformedCoordinate(format!("{name}: {e}")))?;

    if bytes.len() != curve.field_size() {
        return Err(CryptoError::InvalidCoordinateLength {
            expected: curve.field_size(),
            actual: bytes.len(),
        });
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ECParams, Params};

    fn ec_jwk(curve: &str, x: &str, y: &str) -> JWK {
        JWK {
            key_id: None,
            params: Params::EC(ECParams {
                curve: curve.to_string(),
                x: x.to_string(),
                y: y.to_string(),
                d: None,
            }),
        }
    }

    // Generator points of the three NIST curves, base64url at field width.
    const P256_GX: &str = "axfR8uEsQkf4vOblY6RA8ncDfYEt6zOg9KE5RdiYwpY";
    const P256_GY: &str = "T-NC4v4af5uO5-tKfA-eFivOM1drMV7Oy7ZAaDe_UfU";
    const P384_GX: &str = "qofKIr6LBTeOscce8yCtdG4dO2KLp5uYWfdB4IJUKjhVAvJdv1UpbDpUXjhydgq3";
    const P384_GY: &str = "NhfeSpYmLG9dnpi_kpLcKfj0Hb0omhR86doxE7XwuMAKYLHOHX6BnXpDHXyQ6g5f";
    const P521_GX: &str =
        "AMaFjga3BATpzZ4-y2YjlbRCnGSBOQU_tSH4KK9ga009uqFLXnfv51ko_h3BJ6L_qN4zSLPBhWpCm_l-fjHC5b1m";
    const P521_GY: &str =
        "ARg5KWp4mjvABFyKX7QsfRvZmPVESVebRGgXr70XJz5mLJfucple9CZAxVC5AT-tB2E1PHCGonLCQIi-lHaf0WZQ";

    #[test]
    fn round_trip_preserves_coordinates() {
        for (curve, x, y) in [
            ("P-256", P256_GX, P256_GY),
            ("P-384", P384_GX, P384_GY),
            ("P-521", P521_GX, P521_GY),
        ] {
            let jwk = ec_jwk(curve, x, y);
            let key = to_public_key(&jwk).unwrap();
            assert_eq!(key.curve().name(), curve);

            let back = from_public_key(&key).unwrap();
            assert_eq!(back.ec_params().x, x);
            assert_eq!(back.ec_params().y, y);
        }
    }

    #[test]
    fn sec1_encoding_is_fixed_width() {
        let jwk = ec_jwk("P-521", P521_GX, P521_GY);
        let key = to_public_key(&jwk).unwrap();

        let sec1 = key.to_sec1_bytes();
        assert_eq!(sec1.len(), 1 + 2 * 66);
        assert_eq!(sec1[0], 0x04);
    }

    #[test]
    fn wrong_coordinate_length_is_rejected() {
        // 31 bytes
        let short = BASE64_URL_SAFE_NO_PAD.encode([0xab; 31]);
        // 33 bytes
        let long = BASE64_URL_SAFE_NO_PAD.encode([0xab; 33]);

        for x in [short.as_str(), long.as_str()] {
            let jwk = ec_jwk("P-256", x, P256_GY);
            assert!(matches!(
                to_public_key(&jwk),
                Err(CryptoError::InvalidCoordinateLength {
                    expected: 32,
                    ..
                })
            ));
        }

        // Same check applies to y.
        let jwk = ec_jwk("P-256", P256_GX, &short);
        assert!(matches!(
            to_public_key(&jwk),
            Err(CryptoError::InvalidCoordinateLength { .. })
        ));
    }

    #[test]
    fn unsupported_curve_is_rejected() {
        for curve in ["P-224", "secp256k1", "Ed25519", ""] {
            let jwk = ec_jwk(curve, P256_GX, P256_GY);
            assert!(matches!(
                to_public_key(&jwk),
                Err(CryptoError::UnsupportedCurve(_))
            ));
        }
    }

    #[test]
    fn malformed_base64_is_rejected() {
        let jwk = ec_jwk("P-256", "not base64url!", P256_GY);
        assert!(matches!(
            to_public_key(&jwk),
            Err(CryptoError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn off_curve_point_is_rejected() {
        // Generator x with y+1: correct width, not on the curve.
        let jwk = ec_jwk(
            "P-256",
            P256_GX,
            "T-NC4v4af5uO5-tKfA-eFivOM1drMV7Oy7ZAaDe_UfY",
        );
        assert!(matches!(
            to_public_key(&jwk),
            Err(CryptoError::KeyError(_))
        ));
    }
}
