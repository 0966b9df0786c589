//! The explorer engine: one instance per database connection.
//!
//! The engine owns the connector, the graph cache, and the schema
//! resolver. There are no module-level singletons: the cache's lifecycle
//! is the engine's lifecycle, torn down on disconnect (drop).

use crate::cache::GraphCache;
use crate::config::ConnectionConfig;
use crate::error::{ExplorerError, Result};
use crate::schema::SchemaResolver;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vertiscope_connector::{Dialect, GraphConnector};

pub struct ExplorerEngine {
    config: ConnectionConfig,
    connector: Arc<dyn GraphConnector>,
    cache: Arc<GraphCache>,
    resolver: SchemaResolver,
    cancel_token: CancellationToken,
}

pub struct ExplorerEngineBuilder {
    config: ConnectionConfig,
    connector: Option<Arc<dyn GraphConnector>>,
}

impl ExplorerEngineBuilder {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            connector: None,
        }
    }

    pub fn with_connector(mut self, connector: Arc<dyn GraphConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn build(self) -> Result<ExplorerEngine> {
        let connector = self
            .connector
            .ok_or_else(|| ExplorerError::Config("no connector configured".to_string()))?;
        let cancel_token = CancellationToken::new();
        let cache = Arc::new(GraphCache::new(
            connector.clone(),
            cancel_token.child_token(),
        ));
        let resolver = SchemaResolver::new(connector.clone());
        Ok(ExplorerEngine {
            config: self.config,
            connector,
            cache,
            resolver,
            cancel_token,
        })
    }
}

impl ExplorerEngine {
    pub fn builder(config: ConnectionConfig) -> ExplorerEngineBuilder {
        ExplorerEngineBuilder::new(config)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.connector.dialect()
    }

    pub fn connector(&self) -> &Arc<dyn GraphConnector> {
        &self.connector
    }

    pub fn cache(&self) -> &Arc<GraphCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    /// Cancel every in-flight fetch. Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for ExplorerEngine {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
