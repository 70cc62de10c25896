// Runtime configuration. Resolved once in `main` and passed down, so the key
// store and the API client never look at the environment themselves.

use crate::error::{Result, ShortenerError};
use log::debug;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/urlshortener/v1/url";
pub const CONFIG_DIR_ENV: &str = "URL_SHORTENER_CONFIG_DIR";
pub const API_URL_ENV: &str = "URL_SHORTENER_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the persisted key file.
    pub config_dir: PathBuf,
    /// Shorten/expand endpoint.
    pub api_url: String,
}

impl Config {
    /// Build the configuration from `URL_SHORTENER_CONFIG_DIR` and
    /// `URL_SHORTENER_API_URL`, falling back to the platform config
    /// directory and the public Google endpoint.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from),
            std::env::var(API_URL_ENV).ok(),
            dirs::config_dir(),
        )
    }

    fn resolve(
        dir_override: Option<PathBuf>,
        api_override: Option<String>,
        platform_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let config_dir = dir_override
            .filter(|p| !p.as_os_str().is_empty())
            .or(platform_dir)
            .ok_or(ShortenerError::ConfigDirUnavailable)?;
        let api_url = api_override
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        debug!("config dir {}, api url {}", config_dir.display(), api_url);
        Ok(Config {
            config_dir,
            api_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_platform_dir_and_public_endpoint() {
        let cfg = Config::resolve(None, None, Some(PathBuf::from("/home/u/.config"))).unwrap();
        assert_eq!(cfg.config_dir, PathBuf::from("/home/u/.config"));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn overrides_win() {
        let cfg = Config::resolve(
            Some(PathBuf::from("/tmp/keys")),
            Some("http://127.0.0.1:9000/v1/url".into()),
            Some(PathBuf::from("/home/u/.config")),
        )
        .unwrap();
        assert_eq!(cfg.config_dir, PathBuf::from("/tmp/keys"));
        assert_eq!(cfg.api_url, "http://127.0.0.1:9000/v1/url");
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let cfg = Config::resolve(
            Some(PathBuf::new()),
            Some("  ".into()),
            Some(PathBuf::from("/etc/xdg")),
        )
        .unwrap();
        assert_eq!(cfg.config_dir, PathBuf::from("/etc/xdg"));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn no_directory_at_all_is_an_error() {
        let err = Config::resolve(None, None, None).unwrap_err();
        assert!(matches!(err, ShortenerError::ConfigDirUnavailable));
    }
}
