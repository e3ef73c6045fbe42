//! Newest-release lookup.
//!
//! The project page redirects `/releases/latest` to `/releases/tag/vX.Y.Z`;
//! the tag at the end of the final URL is the newest version. The lookup is
//! best effort: callers report a failure and carry on.

use crate::constants::UPDATE_CHECK_TIMEOUT_SECS;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Outcome of comparing the running version with the newest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The running version is the newest one.
    UpToDate,
    /// A different release is published.
    Available {
        /// Version of the published release.
        latest: String,
    },
}

/// Client for the project's release page.
pub struct ReleaseClient {
    repository_url: String,
    client: Client,
}

impl ReleaseClient {
    /// Creates a client for `repository_url` with a 5 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Update` if the HTTP client cannot be built.
    pub fn new(repository_url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(UPDATE_CHECK_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Update(e.to_string()))?;

        Ok(Self {
            repository_url: repository_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetches the newest published version, without the leading `v`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Update` if the page is unreachable, answers with an
    /// error status, or the final URL carries no version.
    pub fn latest_version(&self) -> AppResult<String> {
        let url = format!("{}/releases/latest", self.repository_url);
        debug!("Fetching newest release from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::Update(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Update(format!("HTTP {}", response.status())));
        }

        let final_url = response.url().as_str();
        debug!("Release page resolved to {}", final_url);
        version_from_url(final_url)
            .ok_or_else(|| AppError::Update(format!("no version in '{}'", final_url)))
    }

    /// Compares the newest release with `current`.
    pub fn check(&self, current: &str) -> AppResult<UpdateStatus> {
        let latest = self.latest_version()?;
        Ok(compare_versions(current, &latest))
    }
}

/// Takes the last path segment of `url` and strips one leading `v`.
///
/// ```
/// use daybook::update::version_from_url;
///
/// assert_eq!(
///     version_from_url("https://example.com/releases/tag/v1.2.0").as_deref(),
///     Some("1.2.0")
/// );
/// assert_eq!(version_from_url("https://example.com/releases/"), None);
/// ```
pub fn version_from_url(url: &str) -> Option<String> {
    let segment = url.rsplit('/').next()?;
    let version = segment.strip_prefix('v').unwrap_or(segment);
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Any difference from the running version counts as an available release.
pub fn compare_versions(current: &str, latest: &str) -> UpdateStatus {
    if current == latest {
        UpdateStatus::UpToDate
    } else {
        UpdateStatus::Available {
            latest: latest.to_string(),
        }
    }
}
