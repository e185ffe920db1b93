use std::path::PathBuf;

use crate::bundle::{self, CredentialBundle};
use crate::config::AppConfig;
use crate::error::VouchResult;
use crate::record_store::{CustomerRecord, RecordStore};
use crate::{authority, certificate, keypair};

/// Handle the `register-customer` command.
///
/// Order matters here:
/// 1. load the authority key pair. Fails fast with `NotInitialized`
///    before anything else, in particular before touching the store;
/// 2. generate the customer key pair and issue the certificate;
/// 3. connect to the record store and save the full record;
/// 4. only after the save succeeded, write the customer-facing bundle.
///
/// Returns the path of the written bundle.
pub fn handle_register_customer(
    config: &AppConfig,
    external_id: &str,
    name_parts: &[String],
) -> VouchResult<PathBuf> {
    let authority = authority::load(&config.out_dir)?;

    let customer_keys = keypair::generate()?;
    let cert = certificate::issue(&customer_keys.public_pem, &authority)?;

    let record = CustomerRecord {
        external_id: external_id.to_string(),
        display_name: name_parts.join(" "),
        key_pair: customer_keys.clone(),
        certificate: cert.clone(),
    };

    let store = RecordStore::connect(&config.db_path, config.db_timeout)?;
    store.save(&record)?;
    println!("✓ Customer {} saved to the registry", record.external_id);

    let bundle = CredentialBundle {
        customer_private_key: customer_keys.private_pem,
        authority_public_key: authority.public_pem().to_string(),
        certificate: cert,
    };
    let path = bundle::write_bundle(&config.out_dir, external_id, &bundle)?;
    println!("✓ Credential bundle written to {}", path.display());

    Ok(path)
}
