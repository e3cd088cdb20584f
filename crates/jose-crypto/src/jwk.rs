//! JWK (JSON Web Key) types per RFC 7517

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{EcCurve, error::Result};

/// RFC 7517 JWK Struct
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct JWK {
    #[serde(rename = "kid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(flatten)]
    pub params: Params,
}

impl JWK {
    /// Resolves the declared curve name against the closed curve registry
    pub fn curve(&self) -> Result<EcCurve> {
        let Params::EC(params) = &self.params;
        EcCurve::try_from(params.curve.as_str())
    }

    pub fn ec_params(&self) -> &ECParams {
        let Params::EC(params) = &self.params;
        params
    }
}

/// JWK Key Types and associated Parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
#[serde(tag = "kty")]
pub enum Params {
    EC(ECParams),
}

/// Elliptic Curve parameters (P-256, P-384, P-521)
///
/// Coordinates are unpadded base64url strings of the curve's full field
/// width; leading zero bytes are preserved.
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct ECParams {
    #[serde(rename = "crv")]
    pub curve: String,
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}
