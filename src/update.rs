/// Update check against the GitHub releases API
///
/// Fetches the tag of the latest published release and compares it to the
/// running version. Every transport or parse failure collapses into one
/// generic error; callers choose whether to surface or ignore it.

use serde::Deserialize;
use thiserror::Error;

/// Repository the updater checks against
pub const REPOSITORY: &str = "natecraddock/page-zipper";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("Failed to make request")]
    RequestFailed,
}

/// The slice of the release payload we care about
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Fetch the tag name of the latest release of `repository`
pub async fn get_tag_name(repository: &str) -> Result<String, UpdateError> {
    let url = format!(
        "https://api.github.com/repos/{}/releases/latest",
        repository
    );

    let response = reqwest::Client::new()
        .get(&url)
        // The GitHub API rejects requests without a user agent
        .header(reqwest::header::USER_AGENT, "page-zipper")
        .send()
        .await
        .map_err(|_| UpdateError::RequestFailed)?;

    if !response.status().is_success() {
        return Err(UpdateError::RequestFailed);
    }

    let body = response
        .text()
        .await
        .map_err(|_| UpdateError::RequestFailed)?;
    let release: Release =
        serde_json::from_str(&body).map_err(|_| UpdateError::RequestFailed)?;

    Ok(release.tag_name)
}

/// Check whether a newer release than `current_version` exists.
/// Returns the remote tag when it is newer, None otherwise.
pub async fn check_for_updates(current_version: &str) -> Result<Option<String>, UpdateError> {
    let tag = get_tag_name(REPOSITORY).await?;

    if is_newer(&tag, current_version) {
        Ok(Some(tag))
    } else {
        Ok(None)
    }
}

/// Download page offered when an update is found
pub fn download_url() -> String {
    format!("https://www.github.com/{}/releases/latest", REPOSITORY)
}

/// Compare two dotted version strings numerically, component by component.
/// A leading `v` is ignored and missing components count as zero, so
/// "v1.2" and "1.2.0" compare equal.
pub fn is_newer(remote: &str, current: &str) -> bool {
    let parse = |version: &str| -> Vec<u64> {
        version
            .trim()
            .trim_start_matches('v')
            .split('.')
            .map(|component| component.trim().parse().unwrap_or(0))
            .collect()
    };

    let remote = parse(remote);
    let current = parse(current);

    for i in 0..remote.len().max(current.len()) {
        let r = remote.get(i).copied().unwrap_or(0);
        let c = current.get(i).copied().unwrap_or(0);
        if r != c {
            return r > c;
        }
    }

    false
}
