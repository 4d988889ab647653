use crate::{
    axis::select_format,
    chart::{Chart, Renderer},
    display::Summary,
    github::{self, GhClient, Transport},
    series::{build_series, Clock, StarSeries},
    RepositoryId,
};
use anyhow::{Context, Error};
use std::fmt;
use tracing::{debug, info};

pub const FORMAT_HINT: &str = r#"Please make sure the repository is in the format "user/repo""#;

pub const GATE_MESSAGE: &str =
    "An error occurred, the repository has more than 100 stars or rate limit reached";

/// Reason a run stopped before drawing anything.
///
/// Not an error: the message is reported on stdout like any other result and
/// the process exits successfully.
#[derive(PartialEq, Clone, Debug)]
pub enum Abort {
    /// The identifier is not `owner/name`.
    InputFormat(String),
    /// Repository metadata reports stars already.
    Gate { stargazer_count: u64 },
    /// GitHub answered with an error message.
    Api(String),
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Abort::InputFormat(message) | Abort::Api(message) => {
                write!(f, "{message}\n{FORMAT_HINT}")
            }
            Abort::Gate { .. } => f.write_str(GATE_MESSAGE),
        }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub enum Outcome {
    Rendered {
        repo: RepositoryId,
        series: StarSeries,
    },
    Aborted(Abort),
}

/// Line reported to the user at the end of a run.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rendered { repo, series } => write!(f, "{}", Summary::new(repo, series)),
            Outcome::Aborted(abort) => write!(f, "{abort}"),
        }
    }
}

#[derive(Debug)]
pub struct App<T, R, C> {
    client: GhClient<T>,
    renderer: R,
    clock: C,
}

impl<T, R, C> App<T, R, C>
where
    T: Transport,
    R: Renderer,
    C: Clock,
{
    pub fn new(client: GhClient<T>, renderer: R, clock: C) -> Self {
        Self {
            client,
            renderer,
            clock,
        }
    }

    /// Fetches, builds and renders the star history of the repository named
    /// by `input`.
    pub async fn run(&self, input: &str) -> Result<Outcome, Error> {
        let repo: RepositoryId = match input.parse() {
            Ok(x) => x,
            Err(err) => return Ok(Outcome::Aborted(Abort::InputFormat(err.to_string()))),
        };
        debug!(%repo, "running");

        let metadata = self
            .client
            .get_repository_metadata(&repo)
            .await
            .with_context(|| format!("Failed to get repository {repo}."))?;
        if metadata.stargazer_count > 0 {
            info!(stargazer_count = metadata.stargazer_count, "stopped by gate");
            return Ok(Outcome::Aborted(Abort::Gate {
                stargazer_count: metadata.stargazer_count,
            }));
        }

        let events = match self.client.list_stargazers(&repo).await {
            Ok(x) => x,
            Err(github::Error::Api { message }) => {
                return Ok(Outcome::Aborted(Abort::Api(message)));
            }
            Err(err) => {
                let context = format!("Failed to list stargazers of {repo}.");
                return Err(Error::new(err).context(context));
            }
        };
        for event in &events {
            let login = event.user.as_ref().map(|x| x.login.as_str());
            debug!(starred_at = %event.starred_at, ?login, "star");
        }

        let series = build_series(&events, self.clock.now())?;
        let format = select_format(series.timestamps());
        debug!(points = series.points().len(), %format, "built series");

        self.renderer.render(&Chart::new(&repo, &series, format))?;

        Ok(Outcome::Rendered { repo, series })
    }
}
