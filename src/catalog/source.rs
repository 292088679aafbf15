//! Catalog sources

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;

use crate::{catalog::CatalogError, products::Product};

/// Somewhere a catalog can be fetched from.
#[automock]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the product list.
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Pick a source for a location: `http(s)://` URLs are fetched over HTTP, anything else is a file path.
pub fn from_location(location: &str) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCatalogSource::new(location))
    } else {
        Box::new(FileCatalogSource::new(location))
    }
}

/// Catalog read from a local file. `.yml`/`.yaml` files are parsed as YAML, anything else as JSON.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a new file source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;

        if self.is_yaml() {
            Ok(serde_norway::from_str(&raw)?)
        } else {
            Ok(serde_json::from_str(&raw)?)
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog fetched with a `GET` request.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Create a new HTTP source with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a new HTTP source sharing an existing client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Catalog held in memory as a JSON document.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    document: String,
}

impl StaticCatalogSource {
    /// Create a new static source from a JSON document.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(serde_json::from_str(&self.document)?)
    }

    fn describe(&self) -> String {
        "static document".to_string()
    }
}
