pub mod app;
pub mod axis;
pub mod chart;
pub mod config;
pub mod display;
pub mod github;
pub mod series;

use anyhow::{bail, Error};
use core::fmt;
use std::str::FromStr;

/// Repository identifier, `owner/name`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        Self { owner, name }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let r = match trimmed.split_once('/') {
            Some((owner, name)) => {
                if !is_segment(owner) || !is_segment(name) || name.contains('/') {
                    bail!("Expecting in `:owner/:name` format, but was `{}`.", s)
                }
                Self::new(owner, name)
            }
            None => {
                bail!("Expecting in `:owner/:name` format, but was `{}`.", s)
            }
        };
        Ok(r)
    }
}

/// Non-empty and not a relative path component.
fn is_segment(s: &str) -> bool {
    !matches!(s, "" | "." | "..")
}

#[cfg(test)]
#[test]
fn test_repository_id_display() {
    assert_eq!(RepositoryId::new("kafji", "shub").to_string(), "kafji/shub");
}

#[cfg(test)]
#[test]
fn test_parse_repository_id() {
    // trivial case
    assert_eq!(
        RepositoryId::new("kafji", "shub"),
        "kafji/shub".parse().unwrap()
    );
    // surrounding whitespace from the prompt
    assert_eq!(
        RepositoryId::new("kafji", "shub"),
        "  kafji/shub\n".parse().unwrap()
    );
    // missing owner
    assert_eq!(
        "Expecting in `:owner/:name` format, but was `shub`.",
        "shub".parse::<RepositoryId>().unwrap_err().to_string()
    );
    assert_eq!(
        "Expecting in `:owner/:name` format, but was `/shub`.",
        "/shub".parse::<RepositoryId>().unwrap_err().to_string()
    );
    // missing name
    assert_eq!(
        "Expecting in `:owner/:name` format, but was `kafji/`.",
        "kafji/".parse::<RepositoryId>().unwrap_err().to_string()
    );
    // double separator
    assert_eq!(
        "Expecting in `:owner/:name` format, but was `kafji/sh/ub`.",
        "kafji/sh/ub".parse::<RepositoryId>().unwrap_err().to_string()
    );
}

#[cfg(test)]
#[test]
fn test_parse_repository_id_rejects_dot_segments() {
    for s in ["kafji/..", "kafji/.", "../shub", "./shub", "../.."] {
        assert_eq!(
            format!("Expecting in `:owner/:name` format, but was `{}`.", s),
            s.parse::<RepositoryId>().unwrap_err().to_string()
        );
    }
    // dots inside a name are fine
    assert_eq!(
        RepositoryId::new("kafji", ".github"),
        "kafji/.github".parse().unwrap()
    );
}
