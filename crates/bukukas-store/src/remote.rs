//! Remote versioned store over a GitHub-contents-style API
//!
//! Writes are revision-guarded: the current revision token (`sha`) is read
//! first and sent back with the new content, so a concurrent update makes
//! the PUT fail. There is no retry with a fresh token; a conflict counts as
//! the remote being unavailable and the caller falls back to local storage.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bukukas_config::RemoteConfig;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};

/// Bound on every remote call; a timeout is just another remote failure.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(12);

/// A remote store holding one JSON document per file name, guarded by a
/// revision token. The trait is the seam the gateway (and the tests) work
/// against; the GitHub implementation below is the production one.
pub trait RemoteStore {
    /// Fetch the JSON text stored under `filename`, or `None` if absent.
    fn read(&self, filename: &str) -> StoreResult<Option<String>>;

    /// Overwrite `filename` with `json`, guarded by the current revision.
    fn write(&self, filename: &str, json: &str) -> StoreResult<()>;

    /// Human-readable target for log lines
    fn describe(&self) -> String;
}

/// GitHub contents API implementation.
pub struct GitHubStore {
    agent: ureq::Agent,
    api_base: String,
    repo: String,
    branch: String,
    folder: String,
    token: String,
}

impl GitHubStore {
    /// Build a store from the remote configuration. Returns `None` when no
    /// token is configured: without credentials the remote is disabled and
    /// the tool runs local-only.
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        let token = config.token.clone()?;
        Some(Self {
            agent: ureq::AgentBuilder::new().timeout(REMOTE_TIMEOUT).build(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            folder: config.folder.trim_matches('/').to_string(),
            token,
        })
    }

    fn content_url(&self, filename: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}/{}",
            self.api_base, self.repo, self.folder, filename
        )
    }

    fn get(&self, url: &str) -> StoreResult<Option<serde_json::Value>> {
        let request = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("User-Agent", "bukukas");
        match request.call() {
            Ok(response) => response
                .into_json::<serde_json::Value>()
                .map(Some)
                .map_err(StoreError::remote),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(StoreError::remote(err)),
        }
    }

    /// Current revision token of `filename`, or `None` for a new file.
    fn current_sha(&self, filename: &str) -> StoreResult<Option<String>> {
        let url = format!("{}?ref={}", self.content_url(filename), self.branch);
        Ok(self
            .get(&url)?
            .and_then(|body| body.get("sha").and_then(|v| v.as_str()).map(String::from)))
    }
}

impl RemoteStore for GitHubStore {
    fn read(&self, filename: &str) -> StoreResult<Option<String>> {
        let url = format!("{}?ref={}", self.content_url(filename), self.branch);
        let Some(body) = self.get(&url)? else {
            return Ok(None);
        };

        // the API returns base64 broken into lines
        let encoded: String = body
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        let bytes = BASE64.decode(encoded.as_bytes()).map_err(StoreError::remote)?;
        String::from_utf8(bytes).map(Some).map_err(StoreError::remote)
    }

    fn write(&self, filename: &str, json: &str) -> StoreResult<()> {
        let sha = self.current_sha(filename)?;
        let mut payload = serde_json::json!({
            "message": format!(
                "Auto-backup {} ({})",
                filename,
                chrono::Utc::now().to_rfc3339()
            ),
            "content": BASE64.encode(json.as_bytes()),
            "branch": self.branch,
        });
        if let Some(sha) = sha {
            payload["sha"] = serde_json::Value::String(sha);
        }

        let request = self
            .agent
            .put(&self.content_url(filename))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("User-Agent", "bukukas");
        match request.send_json(payload) {
            Ok(response) if matches!(response.status(), 200 | 201) => Ok(()),
            Ok(response) => Err(StoreError::remote(format!(
                "unexpected status {}",
                response.status()
            ))),
            Err(err) => Err(StoreError::remote(err)),
        }
    }

    fn describe(&self) -> String {
        format!("{}/{} ({})", self.repo, self.folder, self.branch)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> RemoteConfig {
        RemoteConfig {
            repo: "desa/buku-kas".to_string(),
            token: token.map(String::from),
            branch: "main".to_string(),
            folder: "backup".to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }

    #[test]
    fn test_from_config_requires_token() {
        assert!(GitHubStore::from_config(&config(None)).is_none());
        assert!(GitHubStore::from_config(&config(Some("ghp_dummy"))).is_some());
    }

    #[test]
    fn test_content_url_shape() {
        let store = GitHubStore::from_config(&config(Some("ghp_dummy"))).unwrap();
        assert_eq!(
            store.content_url("snapshot.json"),
            "https://api.github.com/repos/desa/buku-kas/contents/backup/snapshot.json"
        );
    }

    #[test]
    fn test_url_tolerates_decorated_config_values() {
        let mut cfg = config(Some("ghp_dummy"));
        cfg.api_base = "https://api.github.com/".to_string();
        cfg.folder = "/backup/".to_string();
        let store = GitHubStore::from_config(&cfg).unwrap();
        assert_eq!(
            store.content_url("snapshot.json"),
            "https://api.github.com/repos/desa/buku-kas/contents/backup/snapshot.json"
        );
    }

    #[test]
    fn test_describe_names_the_target() {
        let store = GitHubStore::from_config(&config(Some("ghp_dummy"))).unwrap();
        assert_eq!(store.describe(), "desa/buku-kas/backup (main)");
    }
}
