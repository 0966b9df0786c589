//! Gremlin dialect support: query templates, GraphSON response decoding,
//! and the [`GremlinConnector`].

pub mod connector;
pub mod labels;
pub mod normalize;
pub mod response;
pub mod templates;

pub use connector::GremlinConnector;
pub use response::{GEdge, GValue, GVertex, GremlinRawResponse};
