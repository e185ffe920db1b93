//! vouch - Credential authority for a closed customer registry
//!
//! A single authority RSA key pair issues lightweight identity
//! certificates for registered customers. A certificate is the customer's
//! public key transformed by the authority's private key; anyone holding
//! the authority public key can invert it and recover the embedded
//! customer key, proving the authority vouched for it.
//!
//! # Operations
//!
//! - `generate-authority-keys`: create the authority key pair at fixed
//!   paths in the output directory
//! - `clean-output`: clear and recreate the output directory
//! - `register-customer`: generate a customer key pair, issue a
//!   certificate, save the record, export the credential bundle
//! - `verify-signature`: check a certificate against the authority
//!   public key
//!
//! # Architecture
//!
//! - [`keypair`]: RSA key pair generation (fixed modulus size)
//! - [`authority`]: authority key lifecycle and durable storage
//! - [`certificate`]: issuance and verification core
//! - [`record_store`]: per-customer records in SQLite
//! - [`bundle`]: the JSON export handed to the customer
//! - [`commands`]: one handler per CLI operation
//!
//! All operations are local and synchronous, one customer per
//! invocation, no network surface, no key rotation.

pub mod authority;
pub mod bundle;
pub mod certificate;
pub mod commands;
pub mod config;
pub mod error;
pub mod keypair;
pub mod record_store;

pub use authority::AuthorityKeys;
pub use bundle::CredentialBundle;
pub use config::AppConfig;
pub use error::{VouchError, VouchResult};
pub use keypair::KeyPair;
pub use record_store::{CustomerRecord, RecordStore};
