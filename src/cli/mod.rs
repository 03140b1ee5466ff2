//! CLI module for keychain-access
//!
//! Provides three commands over the system keychain:
//! - `get`: print a password
//! - `set`: store a password, prompting for it when not given
//! - `delete`: remove a password

use crate::config::AppConfig;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use keychain_access_core::{
    CredentialRequest, Keychain, KeychainError, NativeStore, SecureString,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

/// Keychain Access CLI
#[derive(Parser, Debug)]
#[command(name = "keychain-access")]
#[command(about = "Get, set and delete passwords in the platform credential store")]
#[command(version)]
pub struct Cli {
    /// Additional configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the password for a service and account
    Get(KeyArgs),
    /// Store a password, replacing any existing one
    Set {
        #[command(flatten)]
        key: KeyArgs,
        /// Password; prompted for when omitted
        #[arg(short = 'w', long)]
        password: Option<String>,
    },
    /// Delete the password for a service and account
    Delete(KeyArgs),
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Service name
    #[arg(short, long)]
    pub service: Option<String>,
    /// Account name
    #[arg(short, long)]
    pub account: Option<String>,
}

impl KeyArgs {
    fn request(&self) -> CredentialRequest {
        CredentialRequest {
            service: self.service.clone(),
            account: self.account.clone(),
            password: None,
        }
    }
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let keychain = Keychain::system().with_config(config.keychain);
    debug!(config = ?keychain.config(), "Keychain ready");

    let mut command = cli.command;
    if let Commands::Set { password, .. } = &mut command {
        if password.is_none() && std::io::stdin().is_terminal() {
            *password = Some(
                inquire::Password::new("Password:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read password")?,
            );
        }
    }

    match execute(&keychain, command).await {
        Ok(Some(secret)) => {
            println!("{}", secret.expose());
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => anyhow::bail!(format_error_for_cli(&err)),
    }
}

/// Execute one command, returning the password for `get`
pub async fn execute<S: NativeStore>(
    keychain: &Keychain<S>,
    command: Commands,
) -> keychain_access_core::Result<Option<SecureString>> {
    match command {
        Commands::Get(key) => keychain.get_password(&key.request()).await.map(Some),
        Commands::Set { key, password } => {
            let mut request = key.request();
            request.password = password.map(SecureString::new);
            keychain.set_password(&request).await.map(|()| None)
        }
        Commands::Delete(key) => keychain.delete_password(&key.request()).await.map(|()| None),
    }
}

/// Format an error for display in the CLI
pub fn format_error_for_cli(error: &KeychainError) -> String {
    let mut output = format!("{}: {}", error.code(), error);
    if let Some(suggestion) = error.suggestion() {
        output.push_str("\n\n");
        output.push_str(suggestion);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use keychain_access_core::{ErrorCode, NativeStatus};

    fn key(service: &str, account: &str) -> KeyArgs {
        KeyArgs {
            service: Some(service.to_string()),
            account: Some(account.to_string()),
        }
    }

    #[test]
    fn test_parse_set() {
        let cli = Cli::try_parse_from([
            "keychain-access",
            "set",
            "-s",
            "svc",
            "-a",
            "acct",
            "-w",
            "baz",
        ])
        .unwrap();

        match cli.command {
            Commands::Set { key, password } => {
                assert_eq!(key.service.as_deref(), Some("svc"));
                assert_eq!(key.account.as_deref(), Some("acct"));
                assert_eq!(password.as_deref(), Some("baz"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from([
            "keychain-access",
            "get",
            "--service",
            "svc",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let keychain = Keychain::in_memory();

        let stored = execute(
            &keychain,
            Commands::Set {
                key: key("svc", "acct"),
                password: Some("∆elta".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(stored.is_none());

        let secret = execute(&keychain, Commands::Get(key("svc", "acct")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(secret.expose(), "∆elta");

        execute(&keychain, Commands::Delete(key("svc", "acct")))
            .await
            .unwrap();
        let err = execute(&keychain, Commands::Get(key("svc", "acct")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PasswordNotFound);
    }

    #[tokio::test]
    async fn test_execute_reports_missing_fields() {
        let keychain = Keychain::in_memory();

        let err = execute(
            &keychain,
            Commands::Set {
                key: KeyArgs {
                    service: Some("svc".to_string()),
                    account: None,
                },
                password: Some("baz".to_string()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoAccountProvided);

        let err = execute(
            &keychain,
            Commands::Set {
                key: key("svc", "acct"),
                password: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoPasswordProvided);
    }

    #[test]
    fn test_format_error_for_cli() {
        let output = format_error_for_cli(&KeychainError::NoAccountProvided);
        assert!(output.starts_with("NoAccountProvided: An account is required"));
        assert!(output.contains("--account"));

        let output = format_error_for_cli(&KeychainError::StoreOperationFailed {
            status: NativeStatus::new(-61),
        });
        assert_eq!(output, "StoreOperationFailed: Keychain operation failed (status -61)");
    }
}
