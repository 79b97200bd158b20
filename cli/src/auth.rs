use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tandem_client::ApiClient;
use tandem_client::ClientConfig;
use tandem_client::IdentityError;
use tandem_client::IdentityProvider;
use tandem_client::SessionHandler;
use tandem_client::TokenAccessor;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

pub const API_TOKEN_ENV_VAR: &str = "TANDEM_API_TOKEN";
const AUTH_FILENAME: &str = "auth.json";

/// Exit code signalling that the backend asked for a fresh session.
pub const EXIT_SESSION_REFRESH: i32 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct AuthDotJson {
    access_token: String,
}

fn auth_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tandem").join(AUTH_FILENAME))
}

fn read_auth_file() -> Option<String> {
    let contents = std::fs::read_to_string(auth_file_path()?).ok()?;
    let parsed: AuthDotJson = serde_json::from_str(&contents).ok()?;
    Some(parsed.access_token)
}

/// Bearer-token provider for a terminal session: `TANDEM_API_TOKEN` wins,
/// else `~/.tandem/auth.json`. The token is resolved once at startup; a
/// terminal has no asynchronously-loading identity SDK, so `is_loaded` is
/// always true.
pub struct CliTokenProvider {
    token: Option<String>,
}

impl CliTokenProvider {
    pub fn load() -> Self {
        let token = std::env::var(API_TOKEN_ENV_VAR)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(read_auth_file);
        Self { token }
    }
}

#[async_trait]
impl IdentityProvider for CliTokenProvider {
    fn is_loaded(&self) -> bool {
        true
    }

    fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_token(&self) -> Result<String, IdentityError> {
        self.token
            .clone()
            .ok_or_else(|| IdentityError::Provider("no stored token".to_string()))
    }
}

/// The CLI cannot reload a page; it tells the user to sign in again and
/// exits once the scheduled reload fires.
struct CliSessionHandler;

impl SessionHandler for CliSessionHandler {
    fn notice(&self, message: &str) {
        eprintln!("{message}");
    }

    fn reload(&self) {
        eprintln!("Session expired. Run `tandem login` and retry.");
        std::process::exit(EXIT_SESSION_REFRESH);
    }
}

pub fn build_client() -> Result<ApiClient> {
    let config = ClientConfig::from_env()?;
    let tokens = TokenAccessor::new(Arc::new(CliTokenProvider::load()));
    let client = ApiClient::with_session_handler(config, tokens, Arc::new(CliSessionHandler))?;
    Ok(client)
}

#[derive(Debug, clap::Parser)]
pub struct LoginArgs {
    /// Personal API token issued by the platform.
    #[arg(long)]
    pub token: String,
}

pub fn run_login(args: LoginArgs) -> Result<()> {
    let path = auth_file_path().context("could not resolve a home directory")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(&AuthDotJson {
        access_token: args.token,
    })?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options
        .open(&path)
        .with_context(|| format!("write {}", path.display()))?;
    file.write_all(contents.as_bytes())?;
    file.write_all(b"\n")?;

    println!("Token stored in {}", path.display());
    Ok(())
}
