//! Run configuration assembled from command line flags and environment variables.

use anyhow::{Context, Error};
use directories_next::ProjectDirs;
use std::{fmt, path::PathBuf};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Bearer credential.
///
/// Debug output never shows the value.
#[derive(PartialEq, Eq, Clone)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Values coming from the command line.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub no_open: bool,
    pub cache: bool,
    pub cache_path: Option<PathBuf>,
}

#[derive(PartialEq, Clone, Debug)]
pub struct AppConfig {
    pub api_url: Url,
    pub token: Option<Token>,
    /// Location of the response cache, `None` when caching is disabled.
    pub cache_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub open_viewer: bool,
}

impl AppConfig {
    /// Builds config from command line overrides and an environment lookup.
    pub fn load(
        Overrides {
            output,
            no_open,
            cache,
            cache_path,
        }: Overrides,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let token = var("GITHUB_TOKEN")
            .filter(|x| !x.is_empty())
            .map(Token::new);

        let api_url = {
            let mut raw = var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
            // keep the last path segment when joining
            if !raw.ends_with('/') {
                raw.push('/');
            }
            raw.parse::<Url>()
                .with_context(|| format!("Invalid GITHUB_API_URL `{raw}`."))?
        };

        let cache_enabled = cache
            || cache_path.is_some()
            || var("STAR_HISTORY_CACHE")
                .map(|x| matches!(x.to_ascii_lowercase().as_str(), "1" | "true"))
                .unwrap_or_default();
        let cache_path = if cache_enabled {
            match cache_path {
                Some(x) => Some(x),
                None => Some(default_cache_path()?),
            }
        } else {
            None
        };

        Ok(Self {
            api_url,
            token,
            cache_path,
            output,
            open_viewer: !no_open,
        })
    }
}

fn default_cache_path() -> Result<PathBuf, Error> {
    let dirs = ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
        .ok_or_else(|| Error::msg("Failed to locate a cache directory for this platform."))?;
    Ok(dirs.cache_dir().join("http_cache.sqlite"))
}
