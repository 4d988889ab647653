use super::error::Error;
use crate::config::Token;
use async_trait::async_trait;
use http::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    HeaderMap, HeaderValue,
};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::convert::TryInto;
use tracing::debug;
use url::Url;

const DEFAULT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// A `GET` request to the API.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Request {
    pub url: Url,
    /// Media type override, sent as the `Accept` header.
    pub accept: Option<String>,
}

impl Request {
    pub fn new(url: Url) -> Self {
        Self { url, accept: None }
    }

    pub fn accept(mut self, media_type: impl Into<String>) -> Self {
        self.accept = Some(media_type.into());
        self
    }
}

/// Decoded JSON body along with its HTTP status.
///
/// Error statuses are not turned into errors, GitHub's error documents are
/// JSON bodies and callers inspect them.
#[derive(PartialEq, Clone, Debug)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, request: &Request) -> Result<Response, Error>;
}

#[async_trait(?Send)]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn get(&self, request: &Request) -> Result<Response, Error> {
        (**self).get(request).await
    }
}

#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
}

/// Headers sent on every request: `User-Agent`, the default `Accept` and, with
/// a token, a sensitive bearer `Authorization`.
fn default_headers(token: Option<&Token>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    headers.insert(USER_AGENT, HeaderValue::from_str(&user_agent)?);

    if let Some(token) = token {
        let mut authorization: HeaderValue = format!("Bearer {}", token.expose()).try_into()?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
    }

    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_MEDIA_TYPE));

    Ok(headers)
}

impl HttpTransport {
    pub fn new(token: Option<&Token>) -> Result<Self, Error> {
        let headers = default_headers(token)?;
        let http = ClientBuilder::new().default_headers(headers).build()?;

        let transport = Self { http };
        debug!(?transport);

        Ok(transport)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, request: &Request) -> Result<Response, Error> {
        let mut builder = self.http.get(request.url.clone());
        if let Some(accept) = &request.accept {
            builder = builder.header(ACCEPT, HeaderValue::from_str(accept)?);
        }
        debug!(?builder, "sending request");
        let response = builder.send().await?;
        debug!(?response, "received response");
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(Response { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, json!([])).is_success());
        assert!(Response::new(204, Value::Null).is_success());
        assert!(!Response::new(304, Value::Null).is_success());
        assert!(!Response::new(404, json!({"message": "Not Found"})).is_success());
    }

    #[test]
    fn test_request_accept() {
        let url: Url = "https://api.github.com/repos/kafji/shub".parse().unwrap();
        let request = Request::new(url.clone());
        assert_eq!(request.accept, None);
        let request = request.accept("application/vnd.github.v3.star+json");
        assert_eq!(
            request,
            Request {
                url,
                accept: Some("application/vnd.github.v3.star+json".to_owned())
            }
        );
    }

    #[test]
    fn test_default_headers_with_token() {
        let headers = default_headers(Some(&Token::new("t0k3n"))).unwrap();
        let authorization = &headers[AUTHORIZATION];
        assert_eq!(authorization, "Bearer t0k3n");
        assert!(authorization.is_sensitive());
        assert_eq!(
            headers[USER_AGENT],
            format!("star-history/{}", env!("CARGO_PKG_VERSION")).as_str()
        );
        assert_eq!(headers[ACCEPT], DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_default_headers_without_token() {
        let headers = default_headers(None).unwrap();
        assert!(!headers.contains_key(AUTHORIZATION));
        assert!(headers.contains_key(USER_AGENT));
        assert_eq!(headers[ACCEPT], DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_http_transport_rejects_invalid_token() {
        let token = Token::new("t0k3n\n");
        assert!(matches!(
            HttpTransport::new(Some(&token)),
            Err(Error::Header(_))
        ));
    }
}
