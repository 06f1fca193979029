//! Online oracle backed by a public dictionary API
//!
//! A word is valid when `GET {base_url}/{word}` (lowercase) answers with a
//! success status. Network errors, timeouts and non-success statuses all mean
//! "invalid".

use super::{OracleError, ValidityOracle};
use crate::core::Word;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Free dictionary API entries endpoint
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Clone)]
pub struct DictionaryOracle {
    http: Client,
    base_url: String,
}

impl DictionaryOracle {
    /// Create an oracle for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OracleError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(OracleError::InvalidUrl(base_url));
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Lookup URL for a word
    #[must_use]
    pub fn url_for(&self, word: &Word) -> String {
        format!("{}/{}", self.base_url, word.text().to_ascii_lowercase())
    }
}

#[async_trait]
impl ValidityOracle for DictionaryOracle {
    async fn is_valid(&self, word: &Word) -> bool {
        let url = self.url_for(word);
        match self.http.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(%word, %status, "dictionary lookup");
                status.is_success()
            }
            Err(e) => {
                warn!(%word, error = %e, "dictionary lookup failed, treating word as invalid");
                false
            }
        }
    }
}
