//! Interactive GitHub release downloader
//!
//! Lists a project's releases, lets the user pick a tag and one of its assets
//! (or a zip/tar source snapshot when nothing is attached), and writes the
//! payload to the working directory without overwriting existing files.
//!
//! ## Module Organization
//!
//! - `cli` / `config` - command line surface and per-run settings
//! - `transport` - buffered HTTP GET over `reqwest`
//! - `github` - typed release and asset records, error decoding
//! - `sanitize` - caller IP removal from upstream messages
//! - `naming` - archive names, copy suffixes, create-new persistence
//! - `prompt` / `status` - `inquire` questions and `indicatif` spinners
//! - `workflow` - the stage-by-stage controller

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod naming;
pub mod prompt;
pub mod sanitize;
pub mod status;
pub mod transport;
pub mod workflow;

pub use error::WorkflowError;
pub use workflow::{DownloadTarget, Outcome, Workflow};
