//! Cryptographic core for JOSE (JSON Object Signing and Encryption)
//!
//! This crate provides:
//! - The JOSE signature algorithm registry and its mapping onto concrete
//!   keyed-hash primitives
//! - HMAC signing and verification (HS256, HS384, HS512) with a
//!   constant-time verification path
//! - ECDSA signing and verification (ES256, ES384, ES512)
//! - JWK (JSON Web Key) types per RFC 7517 and conversion between JWK
//!   elliptic-curve keys and native public key objects
//!
//! Header/payload framing, compact serialization and certificate handling
//! live above this crate; it only consumes and produces raw byte buffers.

mod algorithms;
mod ec;
mod error;
mod jwk;
mod sign;

pub mod hmac;

#[cfg(feature = "p256")]
pub mod p256;

#[cfg(feature = "p384")]
pub mod p384;

#[cfg(feature = "p521")]
pub mod p521;

pub use algorithms::{HmacAlgorithm, SignatureAlgorithm};
pub use ec::{EcCurve, EcPublicKey, KeyPair, from_public_key, to_public_key};
pub use error::CryptoError;
pub use jwk::{ECParams, JWK, Params};
pub use sign::{
    EcdsaSigner, EcdsaVerifier, HmacSigner, HmacVerifier, Signer, Verifier, sign, signer, verifier,
    verify,
};
