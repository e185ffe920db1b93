//! Binary shell: argument parsing, environment loading, exit-code
//! translation. All real work lives in `vouch::commands`.

use clap::{Parser, Subcommand};
use tracing::error;

use vouch::commands::{
    handle_clean_output, handle_generate_authority_keys, handle_register_customer,
    handle_verify_signature, VerifyOutcome,
};
use vouch::AppConfig;

/// Credential authority for a closed customer registry.
#[derive(Parser, Debug)]
#[command(name = "vouch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the authority key pair and write it to the output directory
    GenerateAuthorityKeys {
        /// Overwrite an existing authority key pair
        #[arg(long)]
        force: bool,
    },

    /// Clear and recreate the output directory (authority keys included)
    CleanOutput,

    /// Register a customer: issue a certificate, save the record, export the bundle
    RegisterCustomer {
        /// Unique external identifier (e.g. a national identifier number)
        external_id: String,

        /// Name parts: given [middle] family
        #[arg(num_args = 2..=3, required = true)]
        names: Vec<String>,
    },

    /// Check a certificate against the authority public key
    VerifySignature {
        /// The certificate value to verify
        certificate: String,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vouch=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if let Err(e) = run(&cli, &config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::GenerateAuthorityKeys { force } => {
            handle_generate_authority_keys(config, *force)?;
        }
        Commands::CleanOutput => {
            handle_clean_output(config)?;
        }
        Commands::RegisterCustomer { external_id, names } => {
            handle_register_customer(config, external_id, names)?;
        }
        Commands::VerifySignature { certificate } => {
            match handle_verify_signature(config, certificate)? {
                VerifyOutcome::Valid { .. } => println!("Certificate is valid."),
                VerifyOutcome::Invalid { reason } => {
                    tracing::debug!(%reason, "certificate rejected");
                    println!("Certificate is invalid.");
                }
            }
        }
    }
    Ok(())
}
