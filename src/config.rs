use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::url_invalid_error::UrlInvalidError;

/// Result pages of the 2017 parliamentary election.
const DEFAULT_BASE_URL: &str = "https://www.volby.cz/pls/ps2017nss/";

/// The env vars the scraper recognises.
#[derive(Debug, Deserialize)]
struct ScrapingEnv {
    election_base_url: Option<String>,
}

pub struct ScrapingConfig {
    base_url: String,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Ok(Self {
            base_url: scraping_env
                .election_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Overview pages live under the fixed base address. Anything else
    /// is rejected before a single request goes out.
    pub fn validate_index_url(&self, url: &str) -> Result<(), UrlInvalidError> {
        if url.starts_with(&self.base_url) {
            Ok(())
        } else {
            Err(UrlInvalidError {
                url: url.to_string(),
                expected_prefix: self.base_url.clone(),
            })
        }
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScrapingConfig {
        ScrapingConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[test]
    fn index_url_under_the_base_is_accepted() {
        assert!(
            config()
                .validate_index_url("https://www.volby.cz/pls/ps2017nss/ps32?xnumnuts=2101")
                .is_ok()
        );
    }

    #[test]
    fn foreign_url_is_rejected_before_any_fetch() {
        let error = config()
            .validate_index_url("https://example.com/ps32")
            .unwrap_err();
        assert!(error.to_string().contains(DEFAULT_BASE_URL));
    }
}
