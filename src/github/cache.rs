//! Transparent response cache backed by SQLite.
//!
//! Stores successful responses keyed by method, URL and media type. Entries
//! never expire; delete the database file to start over.

use super::{
    error::Error,
    transport::{Request, Response, Transport},
};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::{fs, path::Path};
use tracing::info;

/// Sql for database migrations.
///
/// All operations must be idempotent.
const MIGRATIONS: &str = "
    CREATE TABLE IF NOT EXISTS responses (
        key TEXT PRIMARY KEY ON CONFLICT REPLACE,
        status INTEGER NOT NULL,
        body TEXT NOT NULL,
        stored_at TEXT NOT NULL
    );
";

pub struct ResponseCache(rusqlite::Connection);

impl ResponseCache {
    #[tracing::instrument]
    pub fn open(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = rusqlite::Connection::open(path)?;
        let cache = Self(conn);
        migrate(&cache)?;
        Ok(cache)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = rusqlite::Connection::open_in_memory()?;
        let cache = Self(conn);
        migrate(&cache)?;
        Ok(cache)
    }

    #[tracing::instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<Response>, Error> {
        let row = self
            .0
            .prepare_cached("SELECT status, body FROM responses WHERE key = ?;")?
            .query_row([key], |x| {
                let status: u16 = x.get(0)?;
                let body: String = x.get(1)?;
                Ok((status, body))
            })
            .optional()?;
        let response = match row {
            Some((status, body)) => Some(Response::new(status, serde_json::from_str(&body)?)),
            None => None,
        };
        Ok(response)
    }

    /// Puts a response into the cache.
    ///
    /// On conflict, will replace the stored response.
    #[tracing::instrument(skip(self, response))]
    pub fn put(&self, key: &str, response: &Response) -> Result<(), Error> {
        let body = serde_json::to_string(&response.body)?;
        let stored_at = Utc::now().to_rfc3339();
        self.0.execute(
            "INSERT INTO responses (
                key,
                status,
                body,
                stored_at
            ) VALUES (?, ?, ?, ?)
            ;",
            params![key, response.status, body, stored_at],
        )?;
        Ok(())
    }
}

/// Migrates database.
fn migrate(cache: &ResponseCache) -> Result<(), Error> {
    cache.0.execute_batch(MIGRATIONS)?;
    Ok(())
}

fn cache_key(request: &Request) -> String {
    format!(
        "GET {} {}",
        request.url,
        request.accept.as_deref().unwrap_or_default()
    )
}

/// Serves repeated requests from a [`ResponseCache`], forwarding misses to
/// the inner transport.
pub struct CachingTransport<T> {
    inner: T,
    cache: ResponseCache,
}

impl<T> CachingTransport<T> {
    pub fn new(inner: T, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait(?Send)]
impl<T> Transport for CachingTransport<T>
where
    T: Transport,
{
    async fn get(&self, request: &Request) -> Result<Response, Error> {
        let key = cache_key(request);
        if let Some(response) = self.cache.get(&key)? {
            info!(%key, "served from cache");
            return Ok(response);
        }
        let response = self.inner.get(request).await?;
        if response.is_success() {
            self.cache.put(&key, &response)?;
            info!(%key, "stored in cache");
        }
        Ok(response)
    }
}
