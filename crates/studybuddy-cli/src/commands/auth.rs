use std::io::BufRead;

use clap::Subcommand;
use studybuddy_core::assistant::credentials::{self, KeySource, API_KEY_ENTRY};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the chat API key in the OS keyring
    SetKey {
        /// API key (read from stdin when omitted)
        key: Option<String>,
    },
    /// Remove the stored API key
    ClearKey,
    /// Show where the API key comes from
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            let key = match key {
                Some(key) => key,
                None => {
                    let mut line = String::new();
                    std::io::stdin().lock().read_line(&mut line)?;
                    line
                }
            };
            let key = key.trim();
            if key.is_empty() {
                return Err("API key must not be empty".into());
            }
            credentials::set(API_KEY_ENTRY, key)?;
            println!("API key stored");
        }
        AuthAction::ClearKey => {
            credentials::delete(API_KEY_ENTRY)?;
            println!("API key removed");
        }
        AuthAction::Status => match credentials::api_key_source()? {
            Some(KeySource::Env(var)) => println!("API key: set via {var}"),
            Some(KeySource::Keyring) => println!("API key: stored in keyring"),
            None => println!("API key: not configured"),
        },
    }
    Ok(())
}
