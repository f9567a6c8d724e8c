//! End-to-end release download flow
//!
//! Stages run strictly in order: resolve project, list releases, pick a tag,
//! list assets, pick an asset (or a source archive), download, persist.
//! Each network stage runs under a spinner that ends in a success, warning or
//! failure line. A failing stage reports itself and ends the run.

use std::path::PathBuf;

use log::info;

use crate::error::WorkflowError;
use crate::github::{GitHub, Release, find_asset, find_release};
use crate::naming::{ArchiveFormat, persist, source_archive_name};
use crate::prompt::Prompter;
use crate::status::{Spinner, Status};
use crate::transport::Transport;

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Payload written to `path`
    Saved { path: PathBuf, bytes: usize },
    /// No assets and the user declined the source archive
    Declined,
}

/// Resolved download: where to fetch and the preferred local name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub filename: String,
}

pub struct Workflow<T, P> {
    github: GitHub<T>,
    prompter: P,
    status: Status,
    output_dir: PathBuf,
}

impl<T: Transport, P: Prompter> Workflow<T, P> {
    pub fn new(
        github: GitHub<T>,
        prompter: P,
        status: Status,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            github,
            prompter,
            status,
            output_dir: output_dir.into(),
        }
    }

    /// Run every stage for `project`, prompting for it when absent
    pub async fn run(&mut self, project: Option<String>) -> Result<Outcome, WorkflowError> {
        let result = self.run_stages(project).await;
        if let Err(WorkflowError::Prompt(message)) = &result {
            self.status.error(message);
        }
        result
    }

    async fn run_stages(&mut self, project: Option<String>) -> Result<Outcome, WorkflowError> {
        let project = match project {
            Some(project) => project,
            None => self.prompter.input("Project path")?,
        };

        let releases = self.find_releases(&project).await?;
        let tags = releases.iter().map(|r| r.tag_name.clone()).collect();
        let tag = self.prompter.select("Select a tag", tags)?;
        let release = find_release(&releases, &tag)
            .ok_or_else(|| WorkflowError::UnknownSelection(tag.clone()))?;

        match self.choose_target(&project, release).await? {
            Some(target) => self.download(&target).await,
            None => Ok(Outcome::Declined),
        }
    }

    async fn find_releases(&self, project: &str) -> Result<Vec<Release>, WorkflowError> {
        let spinner = self.status.start("Finding releases...");

        let releases = match self.github.releases(project).await {
            Ok(releases) => releases,
            Err(e) => return fail(spinner, e),
        };
        if releases.is_empty() {
            return fail(spinner, WorkflowError::NoReleases);
        }

        spinner.succeed(&format!("Found {} releases", releases.len()));
        Ok(releases)
    }

    /// Pick an asset of `release`, or fall back to a source archive when it has none.
    ///
    /// `None` means the user declined the fallback.
    async fn choose_target(
        &mut self,
        project: &str,
        release: &Release,
    ) -> Result<Option<DownloadTarget>, WorkflowError> {
        let spinner = self.status.start("Finding assets...");
        let assets = match self.github.assets(release).await {
            Ok(assets) => assets,
            Err(e) => return fail(spinner, e),
        };

        if assets.is_empty() {
            spinner.warn("No assets found");

            if !self.prompter.confirm("Download source instead?", true)? {
                return Ok(None);
            }

            let formats = ArchiveFormat::ALL.iter().map(|f| f.to_string()).collect();
            let choice = self.prompter.select("Select a format", formats)?;
            let format = ArchiveFormat::from_extension(&choice)
                .ok_or(WorkflowError::UnknownSelection(choice))?;

            return Ok(Some(DownloadTarget {
                url: format.url(release).to_string(),
                filename: source_archive_name(project, &release.tag_name, format),
            }));
        }

        spinner.succeed(&format!("Found {} assets", assets.len()));

        let names = assets.iter().map(|a| a.name.clone()).collect();
        let name = self.prompter.select("Select a file", names)?;
        let asset = find_asset(&assets, &name)
            .ok_or_else(|| WorkflowError::UnknownSelection(name.clone()))?;

        Ok(Some(DownloadTarget {
            url: asset.browser_download_url.clone(),
            filename: name,
        }))
    }

    async fn download(&self, target: &DownloadTarget) -> Result<Outcome, WorkflowError> {
        let spinner = self.status.start("Downloading...");

        let bytes = match self.github.download(&target.url).await {
            Ok(bytes) => bytes,
            Err(e) => return fail(spinner, e),
        };
        let path = match persist(&self.output_dir, &target.filename, &bytes).await {
            Ok(path) => path,
            Err(e) => return fail(spinner, e),
        };

        let shown = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.filename.clone());
        spinner.succeed(&format!("Downloaded {shown}"));
        info!("wrote {} bytes to {}", bytes.len(), path.display());

        Ok(Outcome::Saved {
            path,
            bytes: bytes.len(),
        })
    }
}

fn fail<R>(spinner: Spinner, error: WorkflowError) -> Result<R, WorkflowError> {
    spinner.fail(&error.to_string());
    Err(error)
}
