mod common;

use common::MockConnector;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use vertiscope_core::SchemaResolver;

#[tokio::test]
async fn resolves_labels_counts_connections_and_samples() {
    let connector = Arc::new(MockConnector::new());
    let resolver = SchemaResolver::new(connector.clone());

    let schema = resolver.schema().await.unwrap();
    assert_eq!(schema.vertex_total, 19);
    assert_eq!(schema.edge_total, 40);
    assert_eq!(schema.vertex_labels["airport"].count, 16);
    assert_eq!(schema.vertex_labels["airport"].attributes.len(), 1);
    assert_eq!(schema.edge_labels["route"].count, 40);
    assert_eq!(schema.connections.len(), 1);
}

#[tokio::test]
async fn schema_is_cached_until_refresh() {
    let connector = Arc::new(MockConnector::new());
    let resolver = SchemaResolver::new(connector.clone());

    let first = resolver.schema().await.unwrap();
    let second = resolver.schema().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(connector.label_count_calls.load(Ordering::SeqCst), 1);

    let refreshed = resolver.refresh().await.unwrap();
    assert_eq!(connector.label_count_calls.load(Ordering::SeqCst), 2);
    assert_eq!(refreshed.vertex_total, first.vertex_total);
}

#[tokio::test]
async fn concurrent_resolutions_share_one_flight() {
    let connector = Arc::new(MockConnector::new());
    connector.gated.store(true, Ordering::SeqCst);
    let resolver = Arc::new(SchemaResolver::new(connector.clone()));

    let a = tokio::spawn({
        let resolver = resolver.clone();
        async move { resolver.schema().await }
    });
    let b = tokio::spawn({
        let resolver = resolver.clone();
        async move { resolver.schema().await }
    });

    // Only the leader passes the gate; one permit resolves both callers.
    connector.gate.add_permits(1);
    let a = a.await.unwrap().unwrap();
    let b = b.await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(connector.label_count_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn connection_failure_degrades_to_an_empty_section() {
    let connector = Arc::new(MockConnector::new());
    connector.fail_connections.store(true, Ordering::SeqCst);
    let resolver = SchemaResolver::new(connector.clone());

    let schema = resolver.schema().await.unwrap();
    assert!(schema.connections.is_empty());
    // The load-bearing sections are intact.
    assert_eq!(schema.vertex_labels["airport"].count, 16);
}

#[tokio::test]
async fn sample_failure_leaves_attribute_schemas_empty() {
    let connector = Arc::new(MockConnector::new());
    connector.fail_samples.store(true, Ordering::SeqCst);
    let resolver = SchemaResolver::new(connector.clone());

    let schema = resolver.schema().await.unwrap();
    assert!(schema.vertex_labels["airport"].attributes.is_empty());
    assert_eq!(schema.vertex_labels["airport"].count, 16);
}

#[tokio::test]
async fn label_count_failure_fails_resolution_but_allows_reinvocation() {
    let connector = Arc::new(MockConnector::new());
    connector.fail_label_counts.store(true, Ordering::SeqCst);
    let resolver = SchemaResolver::new(connector.clone());

    assert!(resolver.schema().await.is_err());
    assert!(resolver.current().await.is_none());

    // No failed state sticks around: the next call re-enters resolution.
    connector.fail_label_counts.store(false, Ordering::SeqCst);
    let schema = resolver.schema().await.unwrap();
    assert_eq!(schema.vertex_labels["airport"].count, 16);
    assert_eq!(connector.label_count_calls.load(Ordering::SeqCst), 2);
}
