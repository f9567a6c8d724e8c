use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use gh_assets::cli::Args;
use gh_assets::config::Settings;
use gh_assets::github::GitHub;
use gh_assets::prompt::InquirePrompter;
use gh_assets::status::Status;
use gh_assets::transport::ReqwestTransport;
use gh_assets::{Outcome, Workflow, WorkflowError};

fn main() {
    // --help and --version exit here, before any network access
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    let code = match rt.block_on(real_main(args)) {
        Ok(outcome) => {
            debug!("finished: {:?}", outcome);
            0
        }
        Err(e) => match e.downcast_ref::<WorkflowError>() {
            // Stage failures were already shown on their spinner
            Some(err) => {
                debug!("run ended: {err:?}");
                err.exit_code()
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        },
    };
    std::process::exit(code);
}

async fn real_main(args: Args) -> Result<Outcome> {
    let settings = Settings::from_args(&args);
    let transport = ReqwestTransport::new(&settings).context("Failed to build HTTP client")?;
    let output_dir = std::env::current_dir().context("Could not determine working directory")?;

    let mut workflow = Workflow::new(
        GitHub::new(transport, settings.api_url.as_str()),
        InquirePrompter,
        Status::terminal(),
        output_dir,
    );

    Ok(workflow.run(args.project).await?)
}
