//! Resource fetching: page fragments, dictionaries and catalog JSON.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response.
    Transport(String),
    /// A response arrived with a non-2xx status.
    Status(u16),
    /// The body could not be decoded.
    Parse(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Status(code) => write!(f, "HTTP error! status: {}", code),
            FetchError::Parse(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Response {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a site-relative resource such as `data/projects.json`.
    async fn get(&self, path: &str) -> Result<Response, FetchError>;
}

/// Body of a successful response.
pub async fn fetch_text(fetcher: &dyn Fetch, path: &str) -> Result<String, FetchError> {
    let response = fetcher.get(path).await?;
    if !response.ok() {
        return Err(FetchError::Status(response.status));
    }
    Ok(response.body)
}

pub async fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetch, path: &str) -> Result<T, FetchError> {
    let body = fetch_text(fetcher, path).await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Serves a site directory from disk. Missing files answer 404.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFetcher { root: root.into() }
    }

    /// Resolve `path` under the root, refusing anything that climbs out.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl Fetch for FsFetcher {
    async fn get(&self, path: &str) -> Result<Response, FetchError> {
        let Some(full) = self.resolve(path) else {
            return Ok(Response::new(403, ""));
        };
        match tokio::fs::read_to_string(&full).await {
            Ok(body) => {
                debug!("Served {} from {}", path, full.display());
                Ok(Response::new(200, body))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Response::new(404, "")),
            Err(e) => Err(FetchError::Transport(e.to_string())),
        }
    }
}

/// Fetches from a deployed copy of the site.
pub struct HttpFetcher {
    base: Url,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base: &str) -> Result<Self, String> {
        let mut base = Url::parse(base).map_err(|e| format!("Invalid base URL: {}", e))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| e.to_string())?;
        Ok(HttpFetcher { base, client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, path: &str) -> Result<Response, FetchError> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Response::new(status, body))
    }
}

/// Canned responses, with a log of every requested path.
#[derive(Default)]
pub struct MemoryFetcher {
    routes: Mutex<HashMap<String, Response>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, path: &str, status: u16, body: &str) -> &Self {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), Response::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }
}

#[async_trait]
impl Fetch for MemoryFetcher {
    async fn get(&self, path: &str) -> Result<Response, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
        let routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(routes
            .get(path)
            .cloned()
            .unwrap_or_else(|| Response::new(404, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_fetcher_serves_files_and_404s() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/tr.json"), r#"{"hello":"Merhaba"}"#).unwrap();
        let fetcher = FsFetcher::new(dir.path());

        let r = fetcher.get("data/tr.json").await.unwrap();
        assert!(r.ok());
        let dict: HashMap<String, String> = fetch_json(&fetcher, "/data/tr.json").await.unwrap();
        assert_eq!(dict["hello"], "Merhaba");

        assert_eq!(fetcher.get("data/en.json").await.unwrap().status, 404);
        assert_eq!(
            fetch_text(&fetcher, "data/en.json").await,
            Err(FetchError::Status(404))
        );
    }

    #[tokio::test]
    async fn fs_fetcher_refuses_parent_paths() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FsFetcher::new(dir.path());
        assert_eq!(fetcher.get("../etc/passwd").await.unwrap().status, 403);
    }

    #[tokio::test]
    async fn parse_errors_are_reported_as_such() {
        let fetcher = MemoryFetcher::new();
        fetcher.route("data/blog.json", 200, "[{oops");
        let result: Result<Vec<String>, _> = fetch_json(&fetcher, "data/blog.json").await;
        assert!(matches!(result, Err(FetchError::Parse(_))));
        assert_eq!(fetcher.request_count("data/blog.json"), 1);
    }

    #[test]
    fn http_fetcher_normalizes_base() {
        let f = HttpFetcher::new("https://example.com/site").unwrap();
        assert_eq!(f.base.as_str(), "https://example.com/site/");
        assert!(HttpFetcher::new("not a url").is_err());
    }
}
