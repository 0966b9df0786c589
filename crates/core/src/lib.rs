pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod logging;
pub mod schema;
pub mod store;

pub use cache::{CacheStats, GraphCache};
pub use config::ConnectionConfig;
pub use engine::{ExplorerEngine, ExplorerEngineBuilder};
pub use error::{ExplorerError, Result};
pub use facade::ExplorerHandle;
pub use schema::SchemaResolver;
pub use store::GraphStore;
