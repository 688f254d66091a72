use std::{fmt, sync::Arc, time::Duration};

use crate::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    memory::InMemoryStore,
};

/// Connection settings for [`StoreHandle::connect`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `mongodb://...`, `mongodb+srv://...` or `memory://`.
    pub url: String,
    /// Database name inside the store.
    pub database: String,
    pub connect_timeout: Option<Duration>,
    pub max_pool_size: Option<u32>,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            connect_timeout: None,
            max_pool_size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEngine {
    Memory,
    MongoDb,
}

impl StoreEngine {
    /// Detect the engine from the URL scheme.
    pub fn detect(url: &str) -> StoreResult<Self> {
        let parsed = url::Url::parse(url.trim())
            .map_err(|_| StoreError::UnknownDsn(redact_credentials_in_url(url)))?;
        match parsed.scheme() {
            "memory" => Ok(StoreEngine::Memory),
            "mongodb" | "mongodb+srv" => Ok(StoreEngine::MongoDb),
            _ => Err(StoreError::UnknownDsn(redact_credentials_in_url(url))),
        }
    }
}

impl fmt::Display for StoreEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEngine::Memory => f.write_str("memory"),
            StoreEngine::MongoDb => f.write_str("mongodb"),
        }
    }
}

/// An open store connection with an explicit lifecycle.
///
/// Created by [`StoreHandle::connect`], released by [`StoreHandle::close`].
/// Repositories receive the backend through [`StoreHandle::backend`].
#[derive(Debug, Clone)]
pub struct StoreHandle {
    engine: StoreEngine,
    backend: Arc<dyn StoreBackend>,
    url: String,
}

impl StoreHandle {
    /// Connect and verify the store answers a ping.
    pub async fn connect(cfg: &StoreConfig) -> StoreResult<Self> {
        let engine = StoreEngine::detect(&cfg.url)?;
        let backend: Arc<dyn StoreBackend> = match engine {
            StoreEngine::Memory => Arc::new(InMemoryStore::new()),
            #[cfg(feature = "mongodb")]
            StoreEngine::MongoDb => Arc::new(crate::mongo::MongoStore::connect(cfg).await?),
            #[cfg(not(feature = "mongodb"))]
            StoreEngine::MongoDb => return Err(StoreError::FeatureDisabled("mongodb")),
        };

        let url = redact_credentials_in_url(&cfg.url);
        backend.ping().await?;
        tracing::info!(
            engine = %engine,
            url = %url,
            database = %cfg.database,
            "document store connected"
        );

        Ok(Self {
            engine,
            backend,
            url,
        })
    }

    /// Wrap an already-built backend.
    pub fn from_backend(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            engine: backend.engine(),
            url: format!("{}://", backend.engine()),
            backend,
        }
    }

    pub fn engine(&self) -> StoreEngine {
        self.engine
    }

    pub fn backend(&self) -> Arc<dyn StoreBackend> {
        Arc::clone(&self.backend)
    }

    /// Connection URL with the password masked.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn close(self) -> StoreResult<()> {
        self.backend.close().await?;
        tracing::info!(engine = %self.engine, "document store closed");
        Ok(())
    }
}

/// Mask the password part of a connection URL for logs and error messages.
pub fn redact_credentials_in_url(url: &str) -> String {
    if !url.contains('@') {
        return url.to_string();
    }
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
