//! JOSE signature algorithm registry (RFC 7518) and primitive resolution

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CryptoError, EcCurve};

/// Logical JOSE signature algorithms
///
/// The set is closed; each value resolves to at most one primitive family
/// handled by this crate. RSA algorithms are listed so headers parse, but
/// are handled by a different signer implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
    ES512,
}

impl SignatureAlgorithm {
    /// Registry name as it appears in the `alg` header parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::HS256 => "HS256",
            SignatureAlgorithm::HS384 => "HS384",
            SignatureAlgorithm::HS512 => "HS512",
            SignatureAlgorithm::RS256 => "RS256",
            SignatureAlgorithm::RS384 => "RS384",
            SignatureAlgorithm::RS512 => "RS512",
            SignatureAlgorithm::PS256 => "PS256",
            SignatureAlgorithm::PS384 => "PS384",
            SignatureAlgorithm::PS512 => "PS512",
            SignatureAlgorithm::ES256 => "ES256",
            SignatureAlgorithm::ES384 => "ES384",
            SignatureAlgorithm::ES512 => "ES512",
        }
    }

    /// Resolves the logical algorithm to a keyed-hash primitive
    ///
    /// Returns `None` for non-HMAC algorithms. Whether `None` means "try a
    /// different signer family" or "fatal" is the caller's decision.
    pub fn hmac_algorithm(&self) -> Option<HmacAlgorithm> {
        match self {
            SignatureAlgorithm::HS256 => Some(HmacAlgorithm::Sha256),
            SignatureAlgorithm::HS384 => Some(HmacAlgorithm::Sha384),
            SignatureAlgorithm::HS512 => Some(HmacAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Resolves the logical algorithm to the curve its ECDSA variant signs on
    pub fn ec_curve(&self) -> Option<EcCurve> {
        match self {
            SignatureAlgorithm::ES256 => Some(EcCurve::P256),
            SignatureAlgorithm::ES384 => Some(EcCurve::P384),
            SignatureAlgorithm::ES512 => Some(EcCurve::P521),
            _ => None,
        }
    }
}

impl TryFrom<&str> for SignatureAlgorithm {
    type Error = CryptoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "HS256" => Ok(SignatureAlgorithm::HS256),
            "HS384" => Ok(SignatureAlgorithm::HS384),
            "HS512" => Ok(SignatureAlgorithm::HS512),
            "RS256" => Ok(SignatureAlgorithm::RS256),
            "RS384" => Ok(SignatureAlgorithm::RS384),
            "RS512" => Ok(SignatureAlgorithm::RS512),
            "PS256" => Ok(SignatureAlgorithm::PS256),
            "PS384" => Ok(SignatureAlgorithm::PS384),
            "PS512" => Ok(SignatureAlgorithm::PS512),
            "ES256" => Ok(SignatureAlgorithm::ES256),
            "ES384" => Ok(SignatureAlgorithm::ES384),
            "ES512" => Ok(SignatureAlgorithm::ES512),
            _ => Err(CryptoError::AlgorithmNotSupported(value.to_string())),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keyed-hash primitives backing the HS* family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HmacAlgorithm {
    /// Digest length in bytes. A pure function of the primitive, never of
    /// the input.
    pub fn output_length(&self) -> usize {
        match self {
            HmacAlgorithm::Sha256 => 32,
            HmacAlgorithm::Sha384 => 48,
            HmacAlgorithm::Sha512 => 64,
        }
    }
}
