use std::time::Duration;
use std::time::Instant;

use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::endpoints::HEALTH_PATH;
use crate::error::ApiError;

/// Outcome of the startup probe. Unreachable backends are reported, not
/// raised; only a malformed configuration is an error.
#[derive(Clone, Debug)]
pub struct StartupReport {
    pub reachable: bool,
    pub status: Option<StatusCode>,
    pub round_trip: Duration,
    pub message: Option<String>,
}

/// Probes the backend health endpoint once, unauthenticated.
///
/// Callers invoke this explicitly (the CLI's `check` command does); nothing
/// runs it as an import side effect.
pub async fn run_startup_check(
    config: &ClientConfig,
    timeout: Duration,
) -> Result<StartupReport, ApiError> {
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    let url = config.endpoint(HEALTH_PATH)?;
    let started = Instant::now();
    match http.get(url).send().await {
        Ok(response) => Ok(StartupReport {
            reachable: response.status().is_success(),
            status: Some(response.status()),
            round_trip: started.elapsed(),
            message: None,
        }),
        Err(err) => Ok(StartupReport {
            reachable: false,
            status: None,
            round_trip: started.elapsed(),
            message: Some(err.to_string()),
        }),
    }
}
