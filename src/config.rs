use std::time::Duration;

use crate::cli::Args;

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a single run, derived from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API base without a trailing slash
    pub api_url: String,
    pub user_agent: String,
    /// Applied to connection setup only; transfers are not bounded
    pub connect_timeout: Duration,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_url: args.api_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("gh-assets/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}
