//! Output file naming and collision-free persistence

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use tokio::io::AsyncWriteExt;

use crate::error::WorkflowError;
use crate::github::Release;

/// Source snapshot formats GitHub generates for every tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 2] = [ArchiveFormat::Zip, ArchiveFormat::Tar];

    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
        }
    }

    /// Snapshot URL on `release` for this format
    pub fn url<'a>(&self, release: &'a Release) -> &'a str {
        match self {
            ArchiveFormat::Zip => &release.zipball_url,
            ArchiveFormat::Tar => &release.tarball_url,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `owner/name` + `v1.2` + zip -> `owner-name-v1.2.zip`
pub fn source_archive_name(project: &str, tag: &str, format: ArchiveFormat) -> String {
    format!("{}-{}.{}", project.replacen('/', "-", 1), tag, format)
}

/// Next candidate after `name` is taken: `report.txt` -> `report-copy.txt`.
///
/// Names without an extension (`README`, `.env`) get the suffix appended.
pub fn copy_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}-copy{}", &name[..dot], &name[dot..]),
        _ => format!("{name}-copy"),
    }
}

/// First name in the `copy_name` chain starting at `candidate` that is free in `dir`
pub async fn resolve_available(dir: &Path, candidate: &str) -> std::io::Result<String> {
    let mut name = candidate.to_string();
    while tokio::fs::try_exists(dir.join(&name)).await? {
        debug!("{} exists, trying another name", name);
        name = copy_name(&name);
    }
    Ok(name)
}

/// Write `bytes` under a free name in `dir` and return the path used.
///
/// The file is opened with create-new semantics, so an entry that appears
/// after resolution is skipped rather than overwritten.
pub async fn persist(dir: &Path, candidate: &str, bytes: &[u8]) -> Result<PathBuf, WorkflowError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| WorkflowError::Io { path, source }
    };

    let mut candidate = candidate.to_string();
    loop {
        let name = resolve_available(dir, &candidate)
            .await
            .map_err(io_err(&dir.join(&candidate)))?;
        let path = dir.join(&name);

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                candidate = copy_name(&name);
                continue;
            }
            Err(e) => return Err(io_err(&path)(e)),
        };

        file.write_all(bytes).await.map_err(io_err(&path))?;
        file.flush().await.map_err(io_err(&path))?;
        return Ok(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_name_inserts_before_last_extension() {
        assert_eq!(copy_name("report.txt"), "report-copy.txt");
        assert_eq!(copy_name("report-copy.txt"), "report-copy-copy.txt");
        assert_eq!(copy_name("tool-x86_64.tar.gz"), "tool-x86_64.tar-copy.gz");
    }

    #[test]
    fn copy_name_without_extension_has_no_trailing_dot() {
        assert_eq!(copy_name("README"), "README-copy");
        assert_eq!(copy_name(".env"), ".env-copy");
    }

    #[test]
    fn source_archive_replaces_first_slash_only() {
        assert_eq!(
            source_archive_name("owner/name", "v1.2.0", ArchiveFormat::Zip),
            "owner-name-v1.2.0.zip"
        );
        assert_eq!(
            source_archive_name("a/b/c", "t", ArchiveFormat::Tar),
            "a-b/c-t.tar"
        );
    }

    #[test]
    fn archive_format_round_trips_through_extension() {
        for format in ArchiveFormat::ALL {
            assert_eq!(ArchiveFormat::from_extension(&format.to_string()), Some(format));
        }
        assert_eq!(ArchiveFormat::from_extension("7z"), None);
    }

    #[tokio::test]
    async fn resolves_past_existing_copies() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_available(dir.path(), "report.txt").await.unwrap(), "report.txt");

        std::fs::write(dir.path().join("report.txt"), b"old").unwrap();
        assert_eq!(
            resolve_available(dir.path(), "report.txt").await.unwrap(),
            "report-copy.txt"
        );

        std::fs::write(dir.path().join("report-copy.txt"), b"old").unwrap();
        assert_eq!(
            resolve_available(dir.path(), "report.txt").await.unwrap(),
            "report-copy-copy.txt"
        );
    }

    #[tokio::test]
    async fn persist_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.bin"), b"original").unwrap();

        let payload = [1u8, 2, 3, 0, 255];
        let path = persist(dir.path(), "app.bin", &payload).await.unwrap();

        assert_eq!(path, dir.path().join("app-copy.bin"));
        assert_eq!(std::fs::read(&path).unwrap(), payload);
        assert_eq!(std::fs::read(dir.path().join("app.bin")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn persist_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let err = persist(&missing, "x.bin", b"data").await.unwrap_err();
        match err {
            WorkflowError::Io { path, .. } => assert_eq!(path, missing.join("x.bin")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
