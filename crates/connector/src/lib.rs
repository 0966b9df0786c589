pub mod connector;
pub mod dialect;
pub mod transport;

pub use connector::GraphConnector;
pub use dialect::Dialect;
pub use transport::{QueryRequest, Transport};
