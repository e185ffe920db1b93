use crate::authority;
use crate::config::AppConfig;
use crate::error::VouchResult;

/// Handle the `generate-authority-keys` command.
///
/// Generates the authority RSA key pair and persists both halves at their
/// fixed names in the output directory. Refuses to overwrite an existing
/// pair unless `force` is set.
pub fn handle_generate_authority_keys(config: &AppConfig, force: bool) -> VouchResult<()> {
    authority::initialize(&config.out_dir, force)?;
    println!(
        "✓ Authority key pair written to {}",
        config.out_dir.display()
    );
    Ok(())
}
