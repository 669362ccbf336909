use std::env;

use crate::error::Error;

pub const DEFAULT_API_URL: &str = "https://api.cloudflare.com/client/v4";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_token: String,
    pub api_url: String,
    pub spf_content: String,
    pub dmarc_content: String,
    pub skip_domains: Vec<String>,
    pub limit: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            api_token: get("CLOUDFLARE_API_TOKEN").ok_or_else(|| {
                Error::ConfigError("CLOUDFLARE_API_TOKEN is not set".to_string())
            })?,
            api_url: get("CLOUDFLARE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            spf_content: get("SPF_RECORD").unwrap_or_default(),
            dmarc_content: get("DMARC_RECORD").unwrap_or_default(),
            skip_domains: get("SKIP_DOMAINS")
                .map(|list| parse_skip_domains(&list))
                .unwrap_or_default(),
            limit: None,
        })
    }

    /// A limit of zero means no limit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    /// Number of fetched zones to consider, `None` for all of them.
    pub fn zone_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }

    /// Reconciliation writes these values verbatim, so both must be present.
    pub fn require_record_content(&self) -> Result<(), Error> {
        if self.spf_content.is_empty() {
            return Err(Error::ConfigError("SPF_RECORD is not set".to_string()));
        }
        if self.dmarc_content.is_empty() {
            return Err(Error::ConfigError("DMARC_RECORD is not set".to_string()));
        }
        Ok(())
    }

    pub fn is_skipped(&self, domain: &str) -> bool {
        self.skip_domains.iter().any(|d| d == domain)
    }
}

fn parse_skip_domains(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) mod mock {
    use super::*;

    impl Default for Config {
        fn default() -> Self {
            Config {
                api_token: String::from("test-token"),
                api_url: String::from("http://127.0.0.1:0"),
                spf_content: String::from("v=spf1 include:_spf.example.com ~all"),
                dmarc_content: String::from("v=DMARC1; p=reject; rua=mailto:dmarc@example.com"),
                skip_domains: Vec::new(),
                limit: None,
            }
        }
    }
}
