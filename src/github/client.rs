use super::{
    error::Error,
    responses::{RepositoryMetadata, StarEvent},
    transport::{Request, Transport},
};
use crate::RepositoryId;
use serde_json::Value;
use std::result::Result;
use tracing::debug;
use url::Url;

type ClientResult<T> = Result<T, Error>;

/// Page size of the stargazers listing. Only the first page is ever fetched.
pub const PER_PAGE: u8 = 100;

/// Media type that makes GitHub include `starred_at` in stargazer listings.
pub const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

#[derive(Debug)]
pub struct GhClient<T> {
    base_url: Url,
    transport: T,
}

impl<T> GhClient<T> {
    pub fn new(base_url: Url, transport: T) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn build_url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl<T> GhClient<T>
where
    T: Transport,
{
    /// Get a repository.
    ///
    /// [GitHub Docs].
    ///
    /// [GitHub Docs]: https://docs.github.com/en/rest/repos/repos#get-a-repository
    #[tracing::instrument(skip(self))]
    pub async fn get_repository_metadata(
        &self,
        repo: &RepositoryId,
    ) -> ClientResult<RepositoryMetadata> {
        let url = self.build_url(&["repos", &repo.owner, &repo.name])?;
        let response = self.transport.get(&Request::new(url)).await?;
        let metadata = RepositoryMetadata::from_body(&response.body);
        debug!(?metadata);
        Ok(metadata)
    }

    /// List stargazers with their star creation timestamps.
    ///
    /// Single page of at most [`PER_PAGE`] events, oldest first.
    ///
    /// [GitHub Docs].
    ///
    /// [GitHub Docs]: https://docs.github.com/en/rest/activity/starring#list-stargazers
    #[tracing::instrument(skip(self))]
    pub async fn list_stargazers(&self, repo: &RepositoryId) -> ClientResult<Vec<StarEvent>> {
        let mut url = self.build_url(&["repos", &repo.owner, &repo.name, "stargazers"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string());
        let request = Request::new(url).accept(STAR_MEDIA_TYPE);
        let response = self.transport.get(&request).await?;
        match response.body {
            Value::Array(_) => {
                let events: Vec<StarEvent> = serde_json::from_value(response.body)?;
                debug!(count = events.len(), "listed stargazers");
                Ok(events)
            }
            Value::Object(ref fields) if is_truthy(fields.get("message")) => {
                let message = match &fields["message"] {
                    Value::String(x) => x.clone(),
                    x => x.to_string(),
                };
                Err(Error::Api { message })
            }
            body => Err(Error::UnexpectedBody {
                url: request.url.to_string(),
                body: body.to_string(),
            }),
        }
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(x)) => *x,
        Some(Value::String(x)) => !x.is_empty(),
        Some(_) => true,
    }
}
