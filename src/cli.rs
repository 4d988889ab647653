use anyhow::Result;
use clap::Parser;
use console::Term;
use dialoguer::Input;
use star_history::config::Overrides;
use std::{
    io::{self, BufRead},
    path::PathBuf,
};

const PROMPT: &str = "Enter a repository to view star graph for";

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Repository identifier, `owner/name`. Prompted for when omitted.
    pub repo: Option<String>,

    /// Write the chart to this file instead of the temporary directory.
    #[clap(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not open the chart in the default viewer.
    #[clap(long)]
    pub no_open: bool,

    /// Cache GitHub responses on disk.
    #[clap(long)]
    pub cache: bool,

    /// Cache database location. Implies --cache.
    #[clap(long, value_name = "PATH")]
    pub cache_path: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            no_open: self.no_open,
            cache: self.cache,
            cache_path: self.cache_path.clone(),
        }
    }
}

pub fn cmd() -> Cli {
    Cli::parse()
}

/// Asks for a repository, reading one line from stdin when it is not a terminal.
pub fn prompt_repo() -> Result<String> {
    if console::user_attended() {
        let repo = Input::<String>::new()
            .with_prompt(PROMPT)
            .interact_text()?;
        return Ok(repo);
    }
    Term::stdout().write_str(&format!("{PROMPT}: "))?;
    read_repo(io::stdin().lock())
}

fn read_repo(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
