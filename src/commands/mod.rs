//! One handler per CLI operation.
//!
//! Handlers are plain functions returning `Result`, so the whole command
//! surface is exercisable from tests without spawning a process; the
//! binary shell in `main.rs` translates outcomes to exit codes.

pub mod clean_output;
pub mod generate_authority_keys;
pub mod register_customer;
pub mod verify_signature;

pub use clean_output::handle_clean_output;
pub use generate_authority_keys::handle_generate_authority_keys;
pub use register_customer::handle_register_customer;
pub use verify_signature::{handle_verify_signature, VerifyOutcome};
