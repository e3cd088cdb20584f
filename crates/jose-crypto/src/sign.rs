//! Signer / Verifier capability interfaces and the per-family implementations
//!
//! A signer or verifier binds `(algorithm, key)` immutably at construction
//! and is stateless across calls; any number of invocations may run
//! concurrently. Key material is copied out of the caller's buffer at
//! construction and zeroized on drop.

use zeroize::Zeroizing;

use crate::{CryptoError, EcCurve, HmacAlgorithm, SignatureAlgorithm, error::Result, hmac};

/// Signs a message with the algorithm and key bound at construction
pub trait Signer: Send + Sync {
    fn algorithm(&self) -> SignatureAlgorithm;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Verifies a signature with the algorithm and key bound at construction
pub trait Verifier: Send + Sync {
    fn algorithm(&self) -> SignatureAlgorithm;

    /// A signature that simply doesn't match is `Ok(false)`; only
    /// structural problems (bad key, unsupported algorithm) are errors.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool>;
}

/// A `Signer` for the HS* family
pub struct HmacSigner {
    algorithm: SignatureAlgorithm,
    primitive: HmacAlgorithm,
    key: Zeroizing<Vec<u8>>,
}

impl HmacSigner {
    pub fn new(algorithm: SignatureAlgorithm, key: &[u8]) -> Result<Self> {
        let Some(primitive) = algorithm.hmac_algorithm() else {
            return Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()));
        };

        Ok(HmacSigner {
            algorithm,
            primitive,
            key: Zeroizing::new(key.to_vec()),
        })
    }
}

impl Signer for HmacSigner {
    fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        hmac::calculate(message, &self.key, self.primitive)
    }
}

/// A `Verifier` for the HS* family
///
/// Recomputes the expected tag and compares in constant time, so a wrong
/// key, a tampered message and a tampered tag are indistinguishable.
pub struct HmacVerifier {
    algorithm: SignatureAlgorithm,
    primitive: HmacAlgorithm,
    key: Zeroizing<Vec<u8>>,
}

impl HmacVerifier {
    pub fn new(algorithm: SignatureAlgorithm, key: &[u8]) -> Result<Self> {
        let Some(primitive) = algorithm.hmac_algorithm() else {
            return Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()));
        };

        Ok(HmacVerifier {
            algorithm,
            primitive,
            key: Zeroizing::new(key.to_vec()),
        })
    }
}

impl Verifier for HmacVerifier {
    fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        hmac::verify_tag(message, &self.key, self.primitive, signature)
    }
}

enum EcSigningKey {
    #[cfg(feature = "p256")]
    P256(p256::ecdsa::SigningKey),
    #[cfg(feature = "p384")]
    P384(p384::ecdsa::SigningKey),
    #[cfg(feature = "p521")]
    P521(p521::ecdsa::SigningKey),
}

enum EcVerifyingKey {
    #[cfg(feature = "p256")]
    P256(p256::ecdsa::VerifyingKey),
    #[cfg(feature = "p384")]
    P384(p384::ecdsa::VerifyingKey),
    #[cfg(feature = "p521")]
    P521(p521::ecdsa::VerifyingKey),
}

/// A `Signer` for the ES* family
///
/// `key` is the private scalar at the curve's field width. Signatures use
/// the fixed-width JOSE `r || s` encoding, not ASN.1 DER.
pub struct EcdsaSigner {
    algorithm: SignatureAlgorithm,
    key: EcSigningKey,
}

impl EcdsaSigner {
    pub fn new(algorithm: SignatureAlgorithm, key: &[u8]) -> Result<Self> {
        let Some(curve) = algorithm.ec_curve() else {
            return Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()));
        };

        // The curve crates left-pad short scalars, which would let key
        // material for one curve silently sign on another. Require the
        // exact field width instead.
        if key.len() != curve.field_size() {
            return Err(CryptoError::KeyError(format!(
                "{curve} private key must be {} bytes, got {}",
                curve.field_size(),
                key.len()
            )));
        }

        let key = match curve {
            #[cfg(feature = "p256")]
            EcCurve::P256 => EcSigningKey::P256(crate::p256::signing_key(key)?),
            #[cfg(feature = "p384")]
            EcCurve::P384 => EcSigningKey::P384(crate::p384::signing_key(key)?),
            #[cfg(feature = "p521")]
            EcCurve::P521 => EcSigningKey::P521(crate::p521::signing_key(key)?),
            #[allow(unreachable_patterns)]
            _ => return Err(CryptoError::UnsupportedCurve(curve.to_string())),
        };

        Ok(EcdsaSigner { algorithm, key })
    }
}

impl Signer for EcdsaSigner {
    fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        if message.is_empty() {
            return Err(CryptoError::EmptyInput);
        }

        Ok(match &self.key {
            #[cfg(feature = "p256")]
            EcSigningKey::P256(key) => crate::p256::sign(key, message),
            #[cfg(feature = "p384")]
            EcSigningKey::P384(key) => crate::p384::sign(key, message),
            #[cfg(feature = "p521")]
            EcSigningKey::P521(key) => crate::p521::sign(key, message),
        })
    }
}

/// A `Verifier` for the ES* family
///
/// `key` is the public key as SEC1 point bytes (compressed or uncompressed).
pub struct EcdsaVerifier {
    algorithm: SignatureAlgorithm,
    key: EcVerifyingKey,
}

impl EcdsaVerifier {
    pub fn new(algorithm: SignatureAlgorithm, key: &[u8]) -> Result<Self> {
        let Some(curve) = algorithm.ec_curve() else {
            return Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()));
        };

        // SEC1 point for this curve: compressed or uncompressed only.
        let compressed = 1 + curve.field_size();
        let uncompressed = 1 + 2 * curve.field_size();
        if key.len() != compressed && key.len() != uncompressed {
            return Err(CryptoError::KeyError(format!(
                "{curve} public key must be a {compressed}- or {uncompressed}-byte SEC1 point, got {} bytes",
                key.len()
            )));
        }

        let key = match curve {
            #[cfg(feature = "p256")]
            EcCurve::P256 => EcVerifyingKey::P256(crate::p256::verifying_key(key)?),
            #[cfg(feature = "p384")]
            EcCurve::P384 => EcVerifyingKey::P384(crate::p384::verifying_key(key)?),
            #[cfg(feature = "p521")]
            EcCurve::P521 => EcVerifyingKey::P521(crate::p521::verifying_key(key)?),
            #[allow(unreachable_patterns)]
            _ => return Err(CryptoError::UnsupportedCurve(curve.to_string())),
        };

        Ok(EcdsaVerifier { algorithm, key })
    }
}

impl Verifier for EcdsaVerifier {
    fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        if message.is_empty() {
            return Err(CryptoError::EmptyInput);
        }

        // An undecodable signature reports as a plain non-match so callers
        // can't distinguish it from any other wrong signature.
        Ok(match &self.key {
            #[cfg(feature = "p256")]
            EcVerifyingKey::P256(key) => crate::p256::verify(key, message, signature),
            #[cfg(feature = "p384")]
            EcVerifyingKey::P384(key) => crate::p384::verify(key, message, signature),
            #[cfg(feature = "p521")]
            EcVerifyingKey::P521(key) => crate::p521::verify(key, message, signature),
        })
    }
}

/// Builds the signer for a logical algorithm
///
/// `key` is opaque: the HMAC secret for HS*, the private scalar for ES*.
/// Algorithms this crate has no signer family for (RSA) fail with
/// [`CryptoError::AlgorithmNotSupported`].
pub fn signer(algorithm: SignatureAlgorithm, key: &[u8]) -> Result<Box<dyn Signer>> {
    if algorithm.hmac_algorithm().is_some() {
        Ok(Box::new(HmacSigner::new(algorithm, key)?))
    } else if algorithm.ec_curve().is_some() {
        Ok(Box::new(EcdsaSigner::new(algorithm, key)?))
    } else {
        Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()))
    }
}

/// Builds the verifier for a logical algorithm
///
/// `key` is opaque: the HMAC secret for HS*, SEC1 public point bytes for ES*.
pub fn verifier(algorithm: SignatureAlgorithm, key: &[u8]) -> Result<Box<dyn Verifier>> {
    if algorithm.hmac_algorithm().is_some() {
        Ok(Box::new(HmacVerifier::new(algorithm, key)?))
    } else if algorithm.ec_curve().is_some() {
        Ok(Box::new(EcdsaVerifier::new(algorithm, key)?))
    } else {
        Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()))
    }
}

/// Signs `message` with `algorithm` under `key`
pub fn sign(algorithm: SignatureAlgorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    signer(algorithm, key)?.sign(message)
}

/// Verifies `signature` over `message` with `algorithm` under `key`
pub fn verify(
    algorithm: SignatureAlgorithm,
    key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    verifier(algorithm, key)?.verify(message, signature)
}
