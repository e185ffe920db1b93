//! Certificate issuance and verification.
//!
//! A certificate binds a customer public key to the authority: the
//! authority's private key transforms the customer public key PEM into an
//! opaque base64 value, and only the authority's matching public key can
//! invert it. The inverted payload equals the original customer public key
//! byte-for-byte, so the verifier recovers the embedded key rather than
//! checking a detached signature.
//!
//! The PEM is longer than one RSA block, so it is processed in chunks of
//! `modulus - 11` bytes (PKCS#1 v1.5 padding overhead); the certificate
//! payload is the concatenation of the resulting modulus-sized blocks.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use openssl::rsa::{Padding, Rsa};

use crate::authority::AuthorityKeys;
use crate::error::{VouchError, VouchResult};

/// PKCS#1 v1.5 padding overhead per RSA block, in bytes.
const PKCS1_PADDING_OVERHEAD: usize = 11;

/// Issue a certificate over a customer public key.
///
/// Fails with [`VouchError::InvalidKeyMaterial`] when either key fails to
/// parse; the cipher operation itself has no expected failure mode.
pub fn issue(customer_public_pem: &str, authority: &AuthorityKeys) -> VouchResult<String> {
    let rsa = Rsa::private_key_from_pem(authority.private_pem().as_bytes())
        .map_err(|e| VouchError::InvalidKeyMaterial(format!("authority private key: {e}")))?;

    // Reject malformed customer material before binding it.
    Rsa::public_key_from_pem_pkcs1(customer_public_pem.as_bytes())
        .map_err(|e| VouchError::InvalidKeyMaterial(format!("customer public key: {e}")))?;

    let modulus_len = rsa.size() as usize;
    let chunk_len = modulus_len - PKCS1_PADDING_OVERHEAD;

    let mut payload = Vec::new();
    for chunk in customer_public_pem.as_bytes().chunks(chunk_len) {
        let mut block = vec![0u8; modulus_len];
        let written = rsa
            .private_encrypt(chunk, &mut block, Padding::PKCS1)
            .map_err(|e| VouchError::InvalidKeyMaterial(format!("private-encrypt: {e}")))?;
        block.truncate(written);
        payload.extend_from_slice(&block);
    }

    Ok(STANDARD.encode(payload))
}

/// Invert a certificate under the authority public key, recovering the
/// embedded customer public key PEM.
///
/// Any decode, length, or cipher failure maps to
/// [`VouchError::VerificationFailed`]; adversarial and corrupted input is
/// the routine case here, never a crash. A successful inversion proves the
/// value was produced by the holder of the authority private key; whether
/// the recovered key names the expected customer is up to the caller.
pub fn verify(certificate: &str, authority_public_pem: &str) -> VouchResult<String> {
    let rsa = Rsa::public_key_from_pem_pkcs1(authority_public_pem.as_bytes())
        .map_err(|e| VouchError::InvalidKeyMaterial(format!("authority public key: {e}")))?;

    let payload = STANDARD
        .decode(certificate.trim())
        .map_err(|e| VouchError::VerificationFailed(format!("not valid base64: {e}")))?;

    let modulus_len = rsa.size() as usize;
    if payload.is_empty() || payload.len() % modulus_len != 0 {
        return Err(VouchError::VerificationFailed(format!(
            "payload length {} is not a multiple of the modulus size",
            payload.len()
        )));
    }

    let mut recovered = Vec::new();
    for block in payload.chunks(modulus_len) {
        let mut plain = vec![0u8; modulus_len];
        let written = rsa
            .public_decrypt(block, &mut plain, Padding::PKCS1)
            .map_err(|e| VouchError::VerificationFailed(format!("block does not invert: {e}")))?;
        plain.truncate(written);
        recovered.extend_from_slice(&plain);
    }

    String::from_utf8(recovered)
        .map_err(|_| VouchError::VerificationFailed("recovered payload is not UTF-8".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair;

    fn test_authority() -> AuthorityKeys {
        AuthorityKeys::from_key_pair(keypair::generate().unwrap())
    }

    #[test]
    fn issue_then_verify_recovers_customer_key() {
        let authority = test_authority();
        let customer = keypair::generate().unwrap();

        let cert = issue(&customer.public_pem, &authority).unwrap();
        let recovered = verify(&cert, authority.public_pem()).unwrap();
        assert_eq!(recovered, customer.public_pem);
    }

    #[test]
    fn verify_with_wrong_authority_key_fails() {
        let authority = test_authority();
        let other = test_authority();
        let customer = keypair::generate().unwrap();

        let cert = issue(&customer.public_pem, &authority).unwrap();
        match verify(&cert, other.public_pem()) {
            Err(VouchError::VerificationFailed(_)) => {}
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn verify_truncated_certificate_fails() {
        let authority = test_authority();
        let customer = keypair::generate().unwrap();

        let cert = issue(&customer.public_pem, &authority).unwrap();
        let truncated = &cert[..cert.len() / 2];
        match verify(truncated, authority.public_pem()) {
            Err(VouchError::VerificationFailed(_)) => {}
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn verify_garbage_fails() {
        let authority = test_authority();
        match verify("not-a-certificate!!", authority.public_pem()) {
            Err(VouchError::VerificationFailed(_)) => {}
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
        match verify("", authority.public_pem()) {
            Err(VouchError::VerificationFailed(_)) => {}
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn verify_tampered_certificate_fails() {
        let authority = test_authority();
        let customer = keypair::generate().unwrap();

        let mut cert = issue(&customer.public_pem, &authority)
            .unwrap()
            .into_bytes();
        // Flip one base64 character to a different alphabet character.
        cert[10] = if cert[10] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(cert).unwrap();

        assert!(verify(&tampered, authority.public_pem()).is_err());
    }

    #[test]
    fn issue_rejects_malformed_customer_key() {
        let authority = test_authority();
        match issue("-----BEGIN RSA PUBLIC KEY-----\ngarbage\n-----END RSA PUBLIC KEY-----\n", &authority) {
            Err(VouchError::InvalidKeyMaterial(_)) => {}
            other => panic!("expected InvalidKeyMaterial, got {other:?}"),
        }
    }
}
