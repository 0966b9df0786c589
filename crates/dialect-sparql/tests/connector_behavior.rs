mod common;

use common::MockTransport;
use serde_json::json;
use std::sync::Arc;
use vertiscope_api::ConnectorError;
use vertiscope_connector::{Dialect, GraphConnector};
use vertiscope_sparql::SparqlConnector;

fn connector() -> (Arc<MockTransport>, SparqlConnector) {
    let transport = Arc::new(MockTransport::new());
    let connector = SparqlConnector::new(transport.clone());
    (transport, connector)
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[tokio::test]
async fn class_counts_use_the_canonical_template() {
    let (transport, connector) = connector();
    transport.push_response(json!({
        "head": {"vars": ["class", "instancesCount"]},
        "results": {"bindings": [{
            "class": {"type": "uri", "value": "http://example.org/airport"},
            "instancesCount": {
                "type": "literal", "value": "16",
                "datatype": "http://www.w3.org/2001/XMLSchema#integer"
            }
        }]}
    }));

    let counts = connector.fetch_vertex_label_counts().await.unwrap();
    assert_eq!(counts.total, 16);
    assert_eq!(counts.get("http://example.org/airport"), 16);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].dialect, Dialect::Sparql);
    assert_eq!(
        normalize_ws(&requests[0].query),
        "SELECT ?class (COUNT(?start) AS ?instancesCount) { ?start a ?class } GROUP BY ?class"
    );
}

#[tokio::test]
async fn edge_fetch_resolves_a_synthesized_id_via_ask() {
    let (transport, connector) = connector();
    transport.push_response(json!({"head": {}, "boolean": true}));

    let id = "http://a-[http://p]->http://b".into();
    let edge = connector.fetch_edge(&id).await.unwrap().unwrap();
    assert_eq!(edge.source.as_str(), "http://a");
    assert_eq!(edge.target.as_str(), "http://b");
    assert_eq!(edge.label, "http://p");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query,
        "ASK { <http://a> <http://p> <http://b> }"
    );
}

#[tokio::test]
async fn edge_fetch_with_unparsable_id_skips_the_round_trip() {
    let (transport, connector) = connector();
    let edge = connector.fetch_edge(&"garbage".into()).await.unwrap();
    assert!(edge.is_none());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn edge_samples_never_hit_the_wire() {
    let (transport, connector) = connector();
    let samples = connector
        .fetch_edge_attribute_samples(&["http://p".to_string()])
        .await
        .unwrap();
    assert!(samples["http://p"].is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn vertex_samples_issue_one_query_per_class() {
    let (transport, connector) = connector();
    let empty = json!({"head": {"vars": ["p", "value"]}, "results": {"bindings": []}});
    transport.push_response(empty.clone());
    transport.push_response(empty);

    let labels = vec!["http://c1".to_string(), "http://c2".to_string()];
    let samples = connector
        .fetch_vertex_attribute_samples(&labels)
        .await
        .unwrap();
    assert_eq!(samples.len(), 2);
    assert!(samples["http://c1"].is_empty());

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].query.contains("?start a <http://c1>"));
    assert!(requests[1].query.contains("?start a <http://c2>"));
}

#[tokio::test]
async fn unknown_binding_type_is_malformed() {
    let (transport, connector) = connector();
    transport.push_response(json!({
        "head": {"vars": ["class", "instancesCount"]},
        "results": {"bindings": [{
            "class": {"type": "quad", "value": "x"},
            "instancesCount": {"type": "literal", "value": "1"}
        }]}
    }));

    let err = connector.fetch_vertex_label_counts().await.unwrap_err();
    match err {
        ConnectorError::MalformedResponse { field, .. } => {
            assert_eq!(field, "results.bindings[0].class.type");
        }
        other => panic!("unexpected error: {other}"),
    }
}
