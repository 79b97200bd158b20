use std::time::Duration;

use anyhow::Result;
use anyhow::bail;
use tandem_client::ClientConfig;
use tandem_client::run_startup_check;

#[derive(Debug, clap::Parser)]
pub struct CheckArgs {
    /// Probe timeout in seconds.
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let config = ClientConfig::from_env()?;
    let report = run_startup_check(&config, Duration::from_secs(args.timeout_secs)).await?;

    let millis = report.round_trip.as_millis();
    if report.reachable {
        if let Some(status) = report.status {
            println!("backend {}: ok ({status}, {millis}ms)", config.base_url);
        }
        return Ok(());
    }
    match report.status {
        Some(status) => {
            println!("backend {}: degraded ({status}, {millis}ms)", config.base_url);
            bail!("backend health check returned {status}");
        }
        None => {
            let message = report.message.unwrap_or_else(|| "no response".to_string());
            println!("backend {}: unreachable ({message})", config.base_url);
            bail!("backend is unreachable");
        }
    }
}
