//! End-to-end signing and verification through the public API

use jose_crypto::{CryptoError, JWK, SignatureAlgorithm, from_public_key, sign, to_public_key, verify};

/// Keys for every supported algorithm: (algorithm, signing key, verifying key)
fn test_keys() -> Vec<(SignatureAlgorithm, Vec<u8>, Vec<u8>)> {
    let mut keys = vec![
        (SignatureAlgorithm::HS256, b"secret".to_vec(), b"secret".to_vec()),
        (SignatureAlgorithm::HS384, b"secret".to_vec(), b"secret".to_vec()),
        (SignatureAlgorithm::HS512, b"secret".to_vec(), b"secret".to_vec()),
    ];

    for (algorithm, keypair) in [
        (SignatureAlgorithm::ES256, jose_crypto::p256::generate(None).unwrap()),
        (SignatureAlgorithm::ES384, jose_crypto::p384::generate(None).unwrap()),
        (SignatureAlgorithm::ES512, jose_crypto::p521::generate(None).unwrap()),
    ] {
        keys.push((algorithm, keypair.private_bytes, keypair.public_bytes));
    }

    keys
}

#[test]
fn sign_then_verify_round_trips() {
    let message = b"eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJqb3NlIn0";

    for (algorithm, signing_key, verifying_key) in test_keys() {
        let signature = sign(algorithm, &signing_key, message).unwrap();
        assert!(
            verify(algorithm, &verifying_key, message, &signature).unwrap(),
            "{algorithm} round trip failed"
        );
    }
}

#[test]
fn flipped_message_bit_fails_verification() {
    let message = b"header.payload".to_vec();

    for (algorithm, signing_key, verifying_key) in test_keys() {
        let signature = sign(algorithm, &signing_key, &message).unwrap();

        let mut tampered = message.clone();
        tampered[0] ^= 0x01;
        assert!(
            !verify(algorithm, &verifying_key, &tampered, &signature).unwrap(),
            "{algorithm} accepted a tampered message"
        );
    }
}

#[test]
fn flipped_signature_bit_fails_verification() {
    let message = b"header.payload";

    for (algorithm, signing_key, verifying_key) in test_keys() {
        let mut signature = sign(algorithm, signing_key.as_slice(), message).unwrap();
        *signature.last_mut().unwrap() ^= 0x01;

        assert!(
            !verify(algorithm, &verifying_key, message, &signature).unwrap(),
            "{algorithm} accepted a tampered signature"
        );
    }
}

#[test]
fn hs256_pinned_signature() {
    let signature = sign(SignatureAlgorithm::HS256, &[0u8; 32], b"hello").unwrap();
    assert_eq!(
        hex::encode(&signature),
        "4352b26e33fe0d769a8922a6ba29004109f01688e26acc9e6cb347e5a5afc4da"
    );
}

#[test]
fn unsupported_algorithm_is_an_error_not_a_false() {
    let result = verify(SignatureAlgorithm::RS256, b"key", b"message", b"signature");
    assert!(matches!(
        result,
        Err(CryptoError::AlgorithmNotSupported(_))
    ));
}

#[test]
fn jwk_json_to_native_key_and_back() {
    let keypair = jose_crypto::p256::generate(None).unwrap();

    // A verifier typically receives the JWK as JSON.
    let json = serde_json::to_string(&keypair.jwk).unwrap();
    let jwk: JWK = serde_json::from_str(&json).unwrap();

    let key = to_public_key(&jwk).unwrap();
    assert_eq!(key.to_sec1_bytes(), keypair.public_bytes);

    let back = from_public_key(&key).unwrap();
    assert_eq!(back.ec_params().x, keypair.jwk.ec_params().x);
    assert_eq!(back.ec_params().y, keypair.jwk.ec_params().y);

    // Verify an ES256 signature with the key that travelled through JSON.
    let signature = sign(SignatureAlgorithm::ES256, &keypair.private_bytes, b"message").unwrap();
    assert!(
        verify(
            SignatureAlgorithm::ES256,
            &key.to_sec1_bytes(),
            b"message",
            &signature,
        )
        .unwrap()
    );
}
