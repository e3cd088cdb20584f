//! HMAC keyed-hash primitive (HS256, HS384, HS512)

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::{CryptoError, HmacAlgorithm, SignatureAlgorithm, error::Result};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

fn key_error(e: hmac::digest::InvalidLength) -> CryptoError {
    CryptoError::KeyError(format!("HMAC key isn't usable: {e}"))
}

/// Calculates the HMAC of `input` under `key`
///
/// The output is exactly [`HmacAlgorithm::output_length`] bytes and a
/// deterministic function of `(input, key, algorithm)`. `input` must not be
/// empty. No minimum key length is enforced; key-strength policy belongs to
/// the caller layer.
pub fn calculate(input: &[u8], key: &[u8], algorithm: HmacAlgorithm) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(CryptoError::EmptyInput);
    }

    Ok(match algorithm {
        HmacAlgorithm::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(key).map_err(key_error)?;
            mac.update(input);
            mac.finalize().into_bytes().to_vec()
        }
        HmacAlgorithm::Sha384 => {
            let mut mac = HmacSha384::new_from_slice(key).map_err(key_error)?;
            mac.update(input);
            mac.finalize().into_bytes().to_vec()
        }
        HmacAlgorithm::Sha512 => {
            let mut mac = HmacSha512::new_from_slice(key).map_err(key_error)?;
            mac.update(input);
            mac.finalize().into_bytes().to_vec()
        }
    })
}

/// Resolves a logical signature algorithm to its keyed-hash primitive and
/// calculates the HMAC
///
/// Fails with [`CryptoError::AlgorithmNotSupported`] for algorithms outside
/// the HS* family.
pub fn calculate_signature(
    input: &[u8],
    key: &[u8],
    algorithm: SignatureAlgorithm,
) -> Result<Vec<u8>> {
    let Some(algorithm) = algorithm.hmac_algorithm() else {
        return Err(CryptoError::AlgorithmNotSupported(algorithm.to_string()));
    };
    calculate(input, key, algorithm)
}

/// Recomputes the HMAC of `input` and compares it to `tag` in constant time
///
/// The comparison runs in time independent of where the buffers differ, so a
/// wrong tag is indistinguishable from any other wrong tag. A mismatch is
/// reported as `Ok(false)`, never as an error.
pub fn verify_tag(input: &[u8], key: &[u8], algorithm: HmacAlgorithm, tag: &[u8]) -> Result<bool> {
    if input.is_empty() {
        return Err(CryptoError::EmptyInput);
    }

    // Mac::verify_slice compares through a subtle::Choice internally.
    Ok(match algorithm {
        HmacAlgorithm::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(key).map_err(key_error)?;
            mac.update(input);
            mac.verify_slice(tag).is_ok()
        }
        HmacAlgorithm::Sha384 => {
            let mut mac = HmacSha384::new_from_slice(key).map_err(key_error)?;
            mac.update(input);
            mac.verify_slice(tag).is_ok()
        }
        HmacAlgorithm::Sha512 => {
            let mut mac = HmacSha512::new_from_slice(key).map_err(key_error)?;
            mac.update(input);
            mac.verify_slice(tag).is_ok()
        }
    })
}
