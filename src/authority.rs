//! Authority key pair lifecycle and durable storage.
//!
//! The authority's key pair lives at fixed, well-known names inside the
//! output directory. It must be initialized exactly once before any
//! issuance or verification; dependent operations load it into an
//! [`AuthorityKeys`] value and receive it as an injected dependency rather
//! than re-reading the files ad hoc.
//!
//! The private half is held behind the `secrecy` crate so it never shows
//! up in debug output and is zeroized on drop.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, Secret, Zeroize};

use crate::error::{VouchError, VouchResult};
use crate::keypair::{self, KeyPair};

/// File name of the authority private key inside the output directory.
pub const PRIVATE_KEY_FILE: &str = "private.pem";
/// File name of the authority public key inside the output directory.
pub const PUBLIC_KEY_FILE: &str = "public.pem";

/// PEM-encoded private key material that zeroizes on drop.
struct SecurePem {
    pem: String,
}

impl Zeroize for SecurePem {
    fn zeroize(&mut self) {
        self.pem.zeroize();
    }
}

impl fmt::Debug for SecurePem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurePem")
            .field("pem", &"<redacted>")
            .finish()
    }
}

/// The loaded authority identity: public half in the clear, private half
/// behind a `Secret` wrapper.
pub struct AuthorityKeys {
    public_pem: String,
    private: Secret<SecurePem>,
}

impl AuthorityKeys {
    fn new(public_pem: String, private_pem: String) -> Self {
        Self {
            public_pem,
            private: Secret::new(SecurePem { pem: private_pem }),
        }
    }

    /// Wrap an already-generated key pair as an authority identity, without
    /// touching durable storage. Lets issuance and verification be driven
    /// with a substitute authority.
    pub fn from_key_pair(key_pair: KeyPair) -> Self {
        Self::new(key_pair.public_pem, key_pair.private_pem)
    }

    pub fn public_pem(&self) -> &str {
        &self.public_pem
    }

    /// Expose the private key PEM for an issuance operation.
    pub fn private_pem(&self) -> &str {
        &self.private.expose_secret().pem
    }
}

impl fmt::Debug for AuthorityKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorityKeys")
            .field("public_pem", &self.public_pem)
            .field("private", &"<securely stored>")
            .finish()
    }
}

fn private_key_path(out_dir: &Path) -> PathBuf {
    out_dir.join(PRIVATE_KEY_FILE)
}

fn public_key_path(out_dir: &Path) -> PathBuf {
    out_dir.join(PUBLIC_KEY_FILE)
}

/// Generate a fresh authority key pair and persist both halves.
///
/// Refuses to clobber an existing key pair unless `force` is set; every
/// certificate issued under the old pair becomes unverifiable once the
/// pair is replaced.
pub fn initialize(out_dir: &Path, force: bool) -> VouchResult<AuthorityKeys> {
    let private_path = private_key_path(out_dir);
    if private_path.exists() && !force {
        return Err(VouchError::AlreadyInitialized(private_path));
    }

    let KeyPair {
        public_pem,
        private_pem,
    } = keypair::generate()?;

    fs::create_dir_all(out_dir)?;
    fs::write(&private_path, &private_pem)?;
    fs::write(public_key_path(out_dir), &public_pem)?;

    tracing::info!(path = %out_dir.display(), "authority key pair written");
    Ok(AuthorityKeys::new(public_pem, private_pem))
}

/// Load both halves of the authority key pair.
///
/// Fails with [`VouchError::NotInitialized`] when the private key artifact
/// is absent. Callers must run this check before any other work; there is
/// no point opening a record store for an operation that cannot complete.
pub fn load(out_dir: &Path) -> VouchResult<AuthorityKeys> {
    let private_path = private_key_path(out_dir);
    if !private_path.exists() {
        return Err(VouchError::NotInitialized);
    }

    let private_pem = fs::read_to_string(&private_path)?;
    let public_pem = fs::read_to_string(public_key_path(out_dir))?;
    Ok(AuthorityKeys::new(public_pem, private_pem))
}

/// Load only the public half, for verification.
///
/// Verification must not require the private key to be present.
pub fn load_public_only(out_dir: &Path) -> VouchResult<String> {
    let public_path = public_key_path(out_dir);
    if !public_path.exists() {
        return Err(VouchError::NotInitialized);
    }
    Ok(fs::read_to_string(public_path)?)
}
