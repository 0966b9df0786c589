//! Schema resolution: one state machine per connection.
//!
//! `Unresolved -> Resolving -> Resolved`. There is no failed state and no
//! automatic retry: a failed resolution reports its error, drops the
//! machine back to `Unresolved`, and the next call re-enters `Resolving`.
//! While `Resolving`, every concurrent caller joins the single in-flight
//! resolution instead of issuing duplicate network calls.

use crate::error::{ExplorerError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};
use vertiscope_api::{ConnectorError, LabelSchema, Schema, SchemaCounts};
use vertiscope_connector::GraphConnector;

type Outcome = std::result::Result<Arc<Schema>, Arc<ConnectorError>>;

enum ResolveState {
    Unresolved,
    Resolving(watch::Receiver<Option<Outcome>>),
    Resolved(Arc<Schema>),
}

pub struct SchemaResolver {
    connector: Arc<dyn GraphConnector>,
    state: Mutex<ResolveState>,
}

impl SchemaResolver {
    pub fn new(connector: Arc<dyn GraphConnector>) -> Self {
        Self {
            connector,
            state: Mutex::new(ResolveState::Unresolved),
        }
    }

    /// The cached schema, resolving it on first use.
    pub async fn schema(&self) -> Result<Arc<Schema>> {
        enum Role {
            Done(Arc<Schema>),
            Follow(watch::Receiver<Option<Outcome>>),
            Lead(watch::Sender<Option<Outcome>>),
        }
        let role = {
            let mut state = self.state.lock().await;
            match &*state {
                ResolveState::Resolved(schema) => Role::Done(schema.clone()),
                ResolveState::Resolving(rx) => Role::Follow(rx.clone()),
                ResolveState::Unresolved => {
                    let (tx, rx) = watch::channel(None);
                    *state = ResolveState::Resolving(rx);
                    Role::Lead(tx)
                }
            }
        };
        match role {
            Role::Done(schema) => Ok(schema),
            Role::Follow(rx) => self.follow(rx).await,
            Role::Lead(tx) => self.lead(tx).await,
        }
    }

    /// The cached schema without triggering resolution.
    pub async fn current(&self) -> Option<Arc<Schema>> {
        match &*self.state.lock().await {
            ResolveState::Resolved(schema) => Some(schema.clone()),
            _ => None,
        }
    }

    /// Explicitly invalidate and resolve again. An in-flight resolution is
    /// joined rather than duplicated.
    pub async fn refresh(&self) -> Result<Arc<Schema>> {
        {
            let mut state = self.state.lock().await;
            if matches!(&*state, ResolveState::Resolved(_)) {
                *state = ResolveState::Unresolved;
            }
        }
        self.schema().await
    }

    async fn follow(&self, mut rx: watch::Receiver<Option<Outcome>>) -> Result<Arc<Schema>> {
        let waited = rx
            .wait_for(|outcome| outcome.is_some())
            .await
            .map(|value| value.clone());
        let outcome = match waited {
            Ok(value) => value.clone(),
            Err(_) => {
                // The leader was dropped mid-resolution; unstick the
                // machine so the next call can resolve again.
                let mut state = self.state.lock().await;
                if matches!(&*state, ResolveState::Resolving(_)) {
                    *state = ResolveState::Unresolved;
                }
                return Err(ExplorerError::Connector(ConnectorError::Cancelled));
            }
        };
        match outcome {
            Some(Ok(schema)) => Ok(schema),
            Some(Err(error)) => Err(ExplorerError::Resolution(error)),
            None => unreachable!("wait_for only returns set outcomes"),
        }
    }

    async fn lead(&self, tx: watch::Sender<Option<Outcome>>) -> Result<Arc<Schema>> {
        let outcome: Outcome = self
            .resolve()
            .await
            .map(Arc::new)
            .map_err(Arc::new);
        {
            let mut state = self.state.lock().await;
            *state = match &outcome {
                Ok(schema) => ResolveState::Resolved(schema.clone()),
                Err(_) => ResolveState::Unresolved,
            };
        }
        let _ = tx.send(Some(outcome.clone()));
        outcome.map_err(ExplorerError::Resolution)
    }

    /// Compose the four discovery steps, in order. The label-count steps
    /// are load-bearing and fail the resolution; connections and samples
    /// degrade to empty sections on failure.
    async fn resolve(&self) -> std::result::Result<Schema, ConnectorError> {
        let vertex_counts = self.connector.fetch_vertex_label_counts().await?;
        let edge_counts = self.connector.fetch_edge_label_counts().await?;

        let connections = partial(
            "label-connections",
            self.connector.fetch_label_connections().await,
        )?;

        let vertex_labels: Vec<String> = vertex_counts.counts.keys().cloned().collect();
        let edge_labels: Vec<String> = edge_counts.counts.keys().cloned().collect();

        let vertex_samples = partial(
            "vertex-samples",
            self.connector
                .fetch_vertex_attribute_samples(&vertex_labels)
                .await,
        )?;
        let edge_samples = partial(
            "edge-samples",
            self.connector
                .fetch_edge_attribute_samples(&edge_labels)
                .await,
        )?;

        let schema = Schema {
            vertex_labels: assemble(&vertex_counts, vertex_samples),
            edge_labels: assemble(&edge_counts, edge_samples),
            connections,
            vertex_total: vertex_counts.total,
            edge_total: edge_counts.total,
        };
        info!(
            vertex_labels = schema.vertex_labels.len(),
            edge_labels = schema.edge_labels.len(),
            connections = schema.connections.len(),
            "schema resolved"
        );
        Ok(schema)
    }
}

/// Degrade a non-load-bearing step to its empty value, keeping the failure
/// visible in the log. Cancellation propagates: it is not a partial
/// failure but the end of the whole resolution.
fn partial<T: Default>(
    step: &'static str,
    result: std::result::Result<T, ConnectorError>,
) -> std::result::Result<T, ConnectorError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_cancelled() => Err(e),
        Err(e) => {
            warn!("{}", ConnectorError::partial(step, e));
            Ok(T::default())
        }
    }
}

fn assemble(
    counts: &SchemaCounts,
    mut samples: indexmap::IndexMap<String, Vec<vertiscope_api::AttributeSchema>>,
) -> indexmap::IndexMap<String, LabelSchema> {
    counts
        .counts
        .iter()
        .map(|(label, &count)| {
            let attributes = samples.swap_remove(label).unwrap_or_default();
            (label.clone(), LabelSchema { count, attributes })
        })
        .collect()
}
