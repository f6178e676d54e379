//! peer-auth-encrypt - Entry Point
//!
//! Hashes a secret with one of the supported encryptors and prints it wrapped as
//! `ENC(...)`, ready to paste into a credential file or a passwords string.

use clap::Parser;
use log::error;
use peer_auth::encryptor::{EncryptorKind, wrap_encrypted};
use peer_auth::utils::logging::setup_logging;
use std::io::{self, BufRead};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "peer-auth-encrypt")]
#[command(about = "Hash a peer password for an allowed-peers configuration")]
#[command(version)]
struct Cli {
    /// Encryptor to hash with (basic or strong)
    #[arg(short = 't', long = "type")]
    kind: EncryptorKind,

    /// The secret to hash; read from the first line of stdin when omitted
    #[arg(short, long)]
    password: Option<String>,
}

fn read_password() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    let Some(encryptor) = cli.kind.password_encryptor() else {
        error!("Encryptor '{}' does not hash passwords; use basic or strong", cli.kind);
        return ExitCode::from(2);
    };

    let password = match cli.password {
        Some(password) => password,
        None => match read_password() {
            Ok(password) => password,
            Err(e) => {
                error!("Failed to read password from stdin: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    println!("{}", wrap_encrypted(&encryptor.encrypt_password(&password)));
    ExitCode::SUCCESS
}
