use clap::Parser;

use crate::config::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(name = "gh-assets")]
#[command(
    version,
    about = "Download a release asset or source archive from a GitHub project",
    after_help = "If no project is specified, you will be prompted to enter one."
)]
pub struct Args {
    /// Project path in `owner/name` form
    pub project: Option<String>,

    /// Base URL of the GitHub REST API (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Log requests and responses to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
