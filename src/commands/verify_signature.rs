use crate::certificate;
use crate::config::AppConfig;
use crate::error::{VouchError, VouchResult};
use crate::authority;

/// Outcome of a verification run. Invalid certificates are an expected
/// result, not an error; any party may hand us adversarial input.
#[derive(Debug)]
pub enum VerifyOutcome {
    /// The certificate inverts under the authority public key; the
    /// recovered customer public key PEM is carried along.
    Valid { customer_public_pem: String },
    Invalid { reason: String },
}

/// Handle the `verify-signature` command.
///
/// Requires only the authority public key. `VerificationFailed` is caught
/// here and folded into the outcome; every other error (missing authority
/// key, malformed authority key material) still propagates.
pub fn handle_verify_signature(config: &AppConfig, cert: &str) -> VouchResult<VerifyOutcome> {
    let public_pem = authority::load_public_only(&config.out_dir)?;

    match certificate::verify(cert, &public_pem) {
        Ok(customer_public_pem) => Ok(VerifyOutcome::Valid { customer_public_pem }),
        Err(VouchError::VerificationFailed(reason)) => Ok(VerifyOutcome::Invalid { reason }),
        Err(e) => Err(e),
    }
}
