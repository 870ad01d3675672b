// src/config.rs

use std::env;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.ebay.co.uk";
pub const DEFAULT_SITE_ID: &str = "3";

/// Raised before any network activity when credentials are incomplete.
/// Every missing name is listed in one message.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "missing required environment variables: {}\nSet them in the terminal before running this program.",
    missing.join(", ")
)]
pub struct MissingVars {
    pub missing: Vec<String>,
}

/// Credentials and site settings for the Trading API.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_id: String,
    pub dev_id: String,
    pub cert_id: String,
    pub token: String,
    /// Marketplace front-end used to build product URLs, e.g. `https://www.ebay.co.uk`.
    pub base_url: String,
    /// Numeric eBay site id sent in the `X-EBAY-API-SITEID` header.
    pub site_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, MissingVars> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // A blank value counts as missing.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, MissingVars> {
        let mut missing = Vec::new();
        let mut require = |name: &str| {
            get(name).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| {
                missing.push(name.to_string());
                String::new()
            })
        };
        let app_id = require("EBAY_APP_ID");
        let dev_id = require("EBAY_DEV_ID");
        let cert_id = require("EBAY_CERT_ID");
        let token = require("EBAY_TOKEN");
        if !missing.is_empty() {
            return Err(MissingVars { missing });
        }

        Ok(Self {
            app_id,
            dev_id,
            cert_id,
            token,
            base_url: get("EBAY_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            site_id: get("EBAY_SITE_ID")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SITE_ID.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn all_vars_present() {
        let cfg = Config::from_lookup(lookup(&[
            ("EBAY_APP_ID", "app"),
            ("EBAY_DEV_ID", "dev"),
            ("EBAY_CERT_ID", "cert"),
            ("EBAY_TOKEN", "tok"),
        ]))
        .unwrap();
        assert_eq!(cfg.app_id, "app");
        assert_eq!(cfg.token, "tok");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.site_id, DEFAULT_SITE_ID);
    }

    #[test]
    fn every_missing_var_is_reported() {
        let err = Config::from_lookup(lookup(&[("EBAY_APP_ID", "app")])).unwrap_err();
        assert_eq!(err.missing, vec!["EBAY_DEV_ID", "EBAY_CERT_ID", "EBAY_TOKEN"]);
        let msg = err.to_string();
        assert!(msg.contains("EBAY_DEV_ID, EBAY_CERT_ID, EBAY_TOKEN"), "{msg}");
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("EBAY_APP_ID", "app"),
            ("EBAY_DEV_ID", "dev"),
            ("EBAY_CERT_ID", "cert"),
            ("EBAY_TOKEN", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err.missing, vec!["EBAY_TOKEN"]);
    }

    #[test]
    fn optional_overrides_apply() {
        let cfg = Config::from_lookup(lookup(&[
            ("EBAY_APP_ID", "app"),
            ("EBAY_DEV_ID", "dev"),
            ("EBAY_CERT_ID", "cert"),
            ("EBAY_TOKEN", "tok"),
            ("EBAY_BASE_URL", "https://www.ebay.com/"),
            ("EBAY_SITE_ID", "0"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url, "https://www.ebay.com/");
        assert_eq!(cfg.site_id, "0");
    }
}
