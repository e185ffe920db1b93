//! Credential bundle export.
//!
//! The bundle is the artifact handed to the customer after registration:
//! their private key, the authority public key, and the issued
//! certificate, serialized as one JSON document named after the external
//! id. It is written once and never retained server-side beyond the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VouchResult;

/// File extension for exported bundles.
pub const BUNDLE_EXTENSION: &str = "bundle";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBundle {
    pub customer_private_key: String,
    pub authority_public_key: String,
    pub certificate: String,
}

/// Path of the bundle for a given external id.
pub fn bundle_path(out_dir: &Path, external_id: &str) -> PathBuf {
    out_dir.join(format!("{external_id}.{BUNDLE_EXTENSION}"))
}

/// Serialize the bundle and write it under the output directory.
///
/// Must be called only after the customer record has been durably saved,
/// so every exported bundle corresponds to a server-side record.
pub fn write_bundle(
    out_dir: &Path,
    external_id: &str,
    bundle: &CredentialBundle,
) -> VouchResult<PathBuf> {
    let path = bundle_path(out_dir, external_id);
    let json = serde_json::to_string_pretty(bundle)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;

    tracing::info!(path = %path.display(), "credential bundle written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_bundle() -> CredentialBundle {
        CredentialBundle {
            customer_private_key: "priv-pem".to_string(),
            authority_public_key: "authority-pub-pem".to_string(),
            certificate: "cert-value".to_string(),
        }
    }

    #[test]
    fn write_then_read_back() {
        let dir = TempDir::new().unwrap();
        let path = write_bundle(dir.path(), "123456789", &test_bundle()).unwrap();
        assert_eq!(path.file_name().unwrap(), "123456789.bundle");

        let parsed: CredentialBundle =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.certificate, "cert-value");
        assert_eq!(parsed.authority_public_key, "authority-pub-pem");
    }

    #[test]
    fn bundle_uses_original_field_names() {
        let json = serde_json::to_string(&test_bundle()).unwrap();
        assert!(json.contains("customerPrivateKey"));
        assert!(json.contains("authorityPublicKey"));
        assert!(json.contains("certificate"));
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        match write_bundle(&missing, "123456789", &test_bundle()) {
            Err(crate::error::VouchError::Io(_)) => {}
            other => panic!("expected Io, got {:?}", other.err()),
        }
    }
}
