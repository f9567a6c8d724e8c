//! GitHub release API interaction

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::WorkflowError;
use crate::sanitize::scrub_ip;
use crate::transport::{HttpResponse, Transport};

/// GitHub release metadata from API. Does not contain all fields.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub assets_url: String,
    pub zipball_url: String,
    pub tarball_url: String,
}

/// GitHub release asset metadata
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// Error body returned alongside a failing status
#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub message: String,
}

/// Thin client over a [`Transport`] for the three calls a run makes
pub struct GitHub<T> {
    transport: T,
    api_url: String,
}

impl<T: Transport> GitHub<T> {
    pub fn new(transport: T, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
        }
    }

    /// List releases for `owner/name`, newest first as GitHub orders them
    pub async fn releases(&self, project: &str) -> Result<Vec<Release>, WorkflowError> {
        let url = format!("{}/repos/{}/releases", self.api_url, project);
        let response = self.fetch(&url).await?;
        decode(&response, "release list")
    }

    /// List the files attached to `release`
    pub async fn assets(&self, release: &Release) -> Result<Vec<Asset>, WorkflowError> {
        let response = self.fetch(&release.assets_url).await?;
        decode(&response, "asset list")
    }

    /// Fetch a payload as raw bytes
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, WorkflowError> {
        let response = self.fetch(url).await?;
        Ok(response.body)
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse, WorkflowError> {
        debug!("GET {}", url);
        let response = self.transport.get(url).await?;

        if response.is_failure() {
            return Err(upstream_error(&response));
        }
        Ok(response)
    }
}

fn decode<R: DeserializeOwned>(
    response: &HttpResponse,
    what: &'static str,
) -> Result<R, WorkflowError> {
    serde_json::from_slice(&response.body).map_err(|source| WorkflowError::Decode { what, source })
}

/// Build the user-facing error for a failing response.
///
/// Falls back to the bare status when the body is not a GitHub error document
/// (CDN redirects for assets answer with HTML or nothing).
fn upstream_error(response: &HttpResponse) -> WorkflowError {
    let message = match serde_json::from_slice::<ApiError>(&response.body) {
        Ok(body) => scrub_ip(&body.message).into_owned(),
        Err(_) => format!("HTTP {}", response.status),
    };
    WorkflowError::Upstream {
        status: response.status,
        message,
    }
}

/// First release whose tag equals `tag`
pub fn find_release<'a>(releases: &'a [Release], tag: &str) -> Option<&'a Release> {
    releases.iter().find(|r| r.tag_name == tag)
}

/// First asset whose name equals `name`
pub fn find_asset<'a>(assets: &'a [Asset], name: &str) -> Option<&'a Asset> {
    assets.iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FetchError;
    use std::collections::HashMap;

    struct Canned(HashMap<String, HttpResponse>);

    impl Transport for Canned {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            Ok(self.0.get(url).cloned().unwrap_or_else(|| {
                HttpResponse::new(404, r#"{"message":"Not Found"}"#)
            }))
        }
    }

    fn client(routes: &[(&str, HttpResponse)]) -> GitHub<Canned> {
        let map = routes
            .iter()
            .map(|(u, r)| (u.to_string(), r.clone()))
            .collect();
        GitHub::new(Canned(map), "https://api.test")
    }

    const RELEASES: &str = r#"[
        {"tag_name":"v2.0.0","assets_url":"https://api.test/a/2","zipball_url":"https://api.test/z/2","tarball_url":"https://api.test/t/2","draft":false},
        {"tag_name":"v1.0.0","assets_url":"https://api.test/a/1","zipball_url":"https://api.test/z/1","tarball_url":"https://api.test/t/1"}
    ]"#;

    #[tokio::test]
    async fn releases_keep_upstream_order_and_ignore_extra_fields() {
        let gh = client(&[(
            "https://api.test/repos/o/n/releases",
            HttpResponse::new(200, RELEASES),
        )]);
        let releases = gh.releases("o/n").await.unwrap();
        let tags: Vec<_> = releases.iter().map(|r| r.tag_name.as_str()).collect();
        assert_eq!(tags, ["v2.0.0", "v1.0.0"]);
    }

    #[tokio::test]
    async fn missing_field_is_a_decode_error() {
        let gh = client(&[(
            "https://api.test/repos/o/n/releases",
            HttpResponse::new(200, r#"[{"tag_name":"v1"}]"#),
        )]);
        let err = gh.releases("o/n").await.unwrap_err();
        assert!(matches!(err, WorkflowError::Decode { what: "release list", .. }));
    }

    #[tokio::test]
    async fn rate_limit_message_is_scrubbed() {
        let body = r#"{"message":"API rate limit exceeded for 198.51.100.23. Try later."}"#;
        let gh = client(&[(
            "https://api.test/repos/o/n/releases",
            HttpResponse::new(403, body),
        )]);
        match gh.releases("o/n").await.unwrap_err() {
            WorkflowError::Upstream { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API rate limit exceeded . Try later.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_failure_falls_back_to_status() {
        let gh = client(&[("https://cdn.test/file", HttpResponse::new(502, "<html>"))]);
        let err = gh.download("https://cdn.test/file").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn download_returns_body_untouched() {
        let payload = vec![0u8, 159, 146, 150, 255, b'\n'];
        let gh = client(&[("https://cdn.test/bin", HttpResponse::new(200, payload.clone()))]);
        assert_eq!(gh.download("https://cdn.test/bin").await.unwrap(), payload);
    }

    #[test]
    fn lookups_take_the_first_match() {
        let releases: Vec<Release> = serde_json::from_str(
            r#"[
                {"tag_name":"dup","assets_url":"first","zipball_url":"","tarball_url":""},
                {"tag_name":"dup","assets_url":"second","zipball_url":"","tarball_url":""}
            ]"#,
        )
        .unwrap();
        assert_eq!(find_release(&releases, "dup").unwrap().assets_url, "first");
        assert!(find_release(&releases, "Dup").is_none());

        let assets = vec![
            Asset { name: "a.tar.gz".into(), browser_download_url: "u1".into() },
            Asset { name: "a.tar.gz".into(), browser_download_url: "u2".into() },
        ];
        assert_eq!(find_asset(&assets, "a.tar.gz").unwrap().browser_download_url, "u1");
    }
}
