// file: src/network/keys.rs
// version: 1.0.0
// guid: f0b52d68-39c4-4a17-9d83-6e75c1a40b92

//! Authorized-key fetching
//!
//! Pulls the trusted public keys for the configured account from GitHub's
//! keys endpoint. Runs during preflight: a failed fetch or an empty key
//! list aborts the bootstrap before anything destructive happens, since a
//! system installed without keys would be unreachable.

use crate::{BootstrapError, Result};
use std::time::Duration;
use tracing::info;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches authorized public keys for a remote identity
pub struct KeyFetcher {
    client: reqwest::Client,
}

impl KeyFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the key list for `key_user`
    ///
    /// Returns the non-blank key lines in response order. Transport
    /// errors, non-success status, and an empty list are all fatal.
    pub async fn fetch_authorized_keys(&self, key_user: &str) -> Result<Vec<String>> {
        let url = format!("https://github.com/{}.keys", key_user);
        info!("Fetching authorized keys for {} from {}", key_user, url);

        let response = self.client.get(&url).timeout(FETCH_TIMEOUT).send().await?;
        if !response.status().is_success() {
            return Err(BootstrapError::precondition(format!(
                "key fetch for {} returned HTTP {}",
                key_user,
                response.status()
            )));
        }

        let body = response.text().await?;
        let keys = parse_keys(&body);
        if keys.is_empty() {
            return Err(BootstrapError::precondition(format!(
                "no authorized keys published for {}; refusing to install an unreachable system",
                key_user
            )));
        }

        info!("Fetched {} authorized key(s)", keys.len());
        Ok(keys)
    }
}

impl Default for KeyFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a keys response into trimmed, non-blank lines, order preserved
pub fn parse_keys(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_drops_blank_lines() {
        let body = "ssh-ed25519 AAA laptop\n\n  \nssh-rsa BBB desktop\n";
        let keys = parse_keys(body);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], "ssh-ed25519 AAA laptop");
        assert_eq!(keys[1], "ssh-rsa BBB desktop");
    }

    #[test]
    fn test_parse_keys_trims_whitespace() {
        let keys = parse_keys("  ssh-ed25519 AAA  \n");
        assert_eq!(keys, vec!["ssh-ed25519 AAA"]);
    }

    #[test]
    fn test_parse_keys_empty_body() {
        assert!(parse_keys("").is_empty());
        assert!(parse_keys("\n\n").is_empty());
    }
}
