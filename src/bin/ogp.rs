//! Fetch a URL and print its Open Graph metadata as JSON.
//!
//! Logs go to stderr (filter with `RUST_LOG`), so stdout stays valid JSON.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rs_opengraph::{fetch_with, Intent};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Fetch URL and extract OpenGraph meta informations.
#[derive(Debug, Parser)]
#[command(name = "ogp", version)]
struct Cli {
    /// Page to fetch. `https://` is assumed when no scheme is given.
    url: String,

    /// Populate relative URLs to absolute URLs.
    #[arg(short = 'A', long)]
    absolute: bool,

    /// Only trust <meta> tags.
    #[arg(long)]
    strict: bool,

    /// Fetch deadline in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn normalize(raw: &str) -> Result<String, rs_opengraph::Error> {
    match Url::parse(raw) {
        Ok(url) => Ok(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = Url::parse(&format!("https://{raw}"))
                .map_err(|err| rs_opengraph::Error::InvalidUrl {
                    url: raw.to_string(),
                    reason: err.to_string(),
                })?;
            Ok(url.to_string())
        }
        Err(err) => Err(rs_opengraph::Error::InvalidUrl {
            url: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let url = normalize(&cli.url)?;

    let mut intent = Intent::new(url.clone()).with_strict(cli.strict);
    if let Some(secs) = cli.timeout {
        intent = intent.with_timeout(Duration::from_secs(secs));
    }

    let mut og = fetch_with(&url, intent).await?;
    if cli.absolute {
        og.to_absolute()?;
    }

    Ok(serde_json::to_string_pretty(&og)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize("example.com/page").unwrap(), "https://example.com/page");
        assert_eq!(normalize("http://example.com/").unwrap(), "http://example.com/");
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["ogp", "-A", "--strict", "--timeout", "3", "https://ogp.me"]);
        assert!(cli.absolute);
        assert!(cli.strict);
        assert_eq!(cli.timeout, Some(3));
        assert_eq!(cli.url, "https://ogp.me");
    }
}
