//! `[base]` section configuration.
//!
//! Contains the network origin the dataset is served from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in tuxdex.toml - where the site lives.
///
/// # Example
/// ```toml
/// [base]
/// url = "https://bestlinuxdistros.com"
/// ```
///
/// Without a `url` the catalog runs like a page opened from disk: no network
/// origin, bundled snapshot only.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site origin used to resolve `[dataset].path`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_default_url() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.base.url.as_deref(), Some("https://bestlinuxdistros.com"));
    }

    #[test]
    fn test_base_config_custom_url() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            url = "http://localhost:8000"
        "#,
        )
        .unwrap();
        assert_eq!(config.base.url.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [base]
            title = "not here"
        "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
