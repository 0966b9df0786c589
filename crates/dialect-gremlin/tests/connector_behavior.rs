mod common;

use common::MockTransport;
use serde_json::json;
use std::sync::Arc;
use vertiscope_api::ConnectorError;
use vertiscope_connector::{Dialect, GraphConnector};
use vertiscope_gremlin::GremlinConnector;

fn connector() -> (Arc<MockTransport>, GremlinConnector) {
    let transport = Arc::new(MockTransport::new());
    let connector = GremlinConnector::new(transport.clone());
    (transport, connector)
}

fn grouped_count_body(entries: &[(&str, i64)]) -> serde_json::Value {
    let mut flat = Vec::new();
    for (label, count) in entries {
        flat.push(json!(label));
        flat.push(json!({"@type": "g:Int64", "@value": count}));
    }
    json!({
        "result": {"data": {"@type": "g:List", "@value": [
            {"@type": "g:Map", "@value": flat}
        ]}}
    })
}

#[tokio::test]
async fn neighbor_counts_aggregate_in_one_round_trip() {
    let (transport, connector) = connector();
    transport.push_response(grouped_count_body(&[
        ("continent", 1),
        ("country", 1),
        ("airport", 16),
    ]));

    let counts = connector
        .fetch_neighbor_counts(&"123".into())
        .await
        .unwrap();

    assert_eq!(counts.total, 18);
    assert_eq!(counts.get("airport"), 16);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].dialect, Dialect::Gremlin);
    assert_eq!(
        requests[0].query,
        "g.V(\"123\").both().dedup().groupCount().by(label())"
    );
}

#[tokio::test]
async fn absent_vertex_fetch_returns_none() {
    let (transport, connector) = connector();
    transport.push_response(json!({
        "result": {"data": {"@type": "g:List", "@value": []}}
    }));

    let fetched = connector.fetch_vertex(&"nope".into()).await.unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn transport_failure_stays_distinguishable_from_malformed() {
    let (_transport, connector) = connector();
    // No canned response: the mock reports a transport failure.
    let err = connector.fetch_vertex_label_counts().await.unwrap_err();
    assert!(matches!(err, ConnectorError::Transport(_)));
}

#[tokio::test]
async fn malformed_group_count_names_the_field() {
    let (transport, connector) = connector();
    transport.push_response(json!({
        "result": {"data": {"@type": "g:List", "@value": ["not-a-map"]}}
    }));

    let err = connector.fetch_vertex_label_counts().await.unwrap_err();
    match err {
        ConnectorError::MalformedResponse { field, .. } => {
            assert_eq!(field, "result.data[0]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_label_set_skips_the_sampling_round_trip() {
    let (transport, connector) = connector();
    let samples = connector.fetch_vertex_attribute_samples(&[]).await.unwrap();
    assert!(samples.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn neighbors_expand_into_vertices_and_edges() {
    let (transport, connector) = connector();
    let vertex = |id: &str, label: &str| {
        json!({"@type": "g:Map", "@value": [
            {"@type": "g:T", "@value": "id"}, id,
            {"@type": "g:T", "@value": "label"}, label
        ]})
    };
    let edge = json!({"@type": "g:Map", "@value": [
        {"@type": "g:T", "@value": "id"}, "e1",
        {"@type": "g:T", "@value": "label"}, "route",
        {"@type": "g:Direction", "@value": "OUT"},
            {"@type": "g:Map", "@value": [{"@type": "g:T", "@value": "id"}, "123"]},
        {"@type": "g:Direction", "@value": "IN"},
            {"@type": "g:Map", "@value": [{"@type": "g:T", "@value": "id"}, "456"]}
    ]});
    transport.push_response(json!({
        "result": {"data": {"@type": "g:List", "@value": [
            {"@type": "g:Map", "@value": [
                "edge", edge,
                "source", vertex("123", "airport"),
                "target", vertex("456", "airport")
            ]}
        ]}}
    }));

    let neighborhood = connector.fetch_neighbors(&"123".into(), 10).await.unwrap();
    assert_eq!(neighborhood.edges.len(), 1);
    assert_eq!(neighborhood.vertices.len(), 2);
    assert_eq!(neighborhood.edges[0].source.as_str(), "123");
    assert_eq!(neighborhood.edges[0].target.as_str(), "456");
}
