mod common;

use common::MockConnector;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use vertiscope_core::{ConnectionConfig, ExplorerHandle};
use vertiscope_connector::Dialect;

fn handle(connector: Arc<MockConnector>) -> ExplorerHandle {
    let config = ConnectionConfig::parse("http://localhost:9999", Dialect::Gremlin).unwrap();
    ExplorerHandle::new(config, connector).unwrap()
}

#[tokio::test]
async fn vertex_details_resolve_once_then_hit_the_cache() {
    let connector = Arc::new(MockConnector::new());
    connector.put_vertex(MockConnector::airport("123", "LHR"));
    let handle = handle(connector.clone());

    let first = handle.vertex_details(&"123".into()).await.unwrap().unwrap();
    assert!(!first.is_fragment());
    assert_eq!(first.attributes["code"].to_string(), "LHR");

    let second = handle.vertex_details(&"123".into()).await.unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(connector.vertex_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expand_neighbors_grows_the_cache() {
    let connector = Arc::new(MockConnector::new());
    connector.put_vertex(MockConnector::airport("123", "LHR"));
    let handle = handle(connector.clone());

    let neighborhood = handle.expand_neighbors(&"123".into(), 10).await.unwrap();
    assert_eq!(neighborhood.edges.len(), 1);

    let stats = handle.cache_stats().await;
    assert_eq!(stats.vertices, 2);
    assert_eq!(stats.edges, 1);

    // The far vertex is a browsable fragment.
    let far = handle.ensure_fragment(&"far-1".into(), &[]).await;
    assert_eq!(far.primary_type(), "airport");
}

#[tokio::test]
async fn search_by_label_caches_what_it_finds() {
    let connector = Arc::new(MockConnector::new());
    connector.put_vertex(MockConnector::airport("123", "LHR"));
    connector.put_vertex(MockConnector::airport("456", "JFK"));
    let handle = handle(connector.clone());

    let found = handle.search_by_label("airport", 10).await.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(handle.cache_stats().await.vertices, 2);
}

#[tokio::test]
async fn schema_flows_through_the_handle() {
    let connector = Arc::new(MockConnector::new());
    let handle = handle(connector.clone());

    let schema = handle.schema().await.unwrap();
    assert_eq!(schema.vertex_labels["airport"].count, 16);

    let refreshed = handle.refresh_schema().await.unwrap();
    assert_eq!(connector.label_count_calls.load(Ordering::SeqCst), 2);
    assert_eq!(refreshed.vertex_total, schema.vertex_total);
}

#[tokio::test]
async fn eviction_flows_through_the_handle() {
    let connector = Arc::new(MockConnector::new());
    connector.put_vertex(MockConnector::airport("123", "LHR"));
    let handle = handle(connector.clone());

    handle.vertex_details(&"123".into()).await.unwrap();
    assert!(handle.evict(&"123".into()).await.is_some());
    assert_eq!(handle.cache_stats().await.vertices, 0);
}
