#![deny(rust_2018_idioms)]

use anyhow::{Context, Result};
use console::Term;
use star_history::{
    app::App,
    chart::SvgRenderer,
    config::AppConfig,
    github::{CachingTransport, GhClient, HttpTransport, ResponseCache, Transport},
    series::SystemClock,
};
use std::{env, io};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

fn transport(cfg: &AppConfig) -> Result<Box<dyn Transport>> {
    let http = HttpTransport::new(cfg.token.as_ref())?;
    let transport: Box<dyn Transport> = match &cfg.cache_path {
        Some(path) => {
            let cache = ResponseCache::open(path)
                .with_context(|| format!("Failed to open cache `{}`.", path.display()))?;
            debug!(path = %path.display(), "caching responses");
            Box::new(CachingTransport::new(http, cache))
        }
        None => Box::new(http),
    };
    Ok(transport)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cmd = cli::cmd();
    debug!(?cmd, "launched");

    let cfg = AppConfig::load(cmd.overrides(), |key| env::var(key).ok())?;
    debug!(?cfg, "loaded config");

    let input = match cmd.repo {
        Some(x) => x,
        None => cli::prompt_repo()?,
    };

    let client = GhClient::new(cfg.api_url.clone(), transport(&cfg)?);
    let renderer = SvgRenderer::new(cfg.output.clone(), cfg.open_viewer);
    let app = App::new(client, renderer, SystemClock);

    let outcome = app.run(&input).await?;
    debug!(?outcome, "finished");
    Term::stdout().write_line(&outcome.to_string())?;

    debug!("exiting");
    Ok(())
}
