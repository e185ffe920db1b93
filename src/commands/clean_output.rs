use std::fs;
use std::io::ErrorKind;

use crate::config::AppConfig;
use crate::error::VouchResult;

/// Handle the `clean-output` command.
///
/// Destructively clears and recreates the output directory. The authority
/// key files live inside it, so this also de-initializes the authority;
/// the record store is untouched.
pub fn handle_clean_output(config: &AppConfig) -> VouchResult<()> {
    match fs::remove_dir_all(&config.out_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(&config.out_dir)?;

    println!("✓ Output directory {} cleared", config.out_dir.display());
    Ok(())
}
