mod commands;

use clap::{Parser, Subcommand};
use std::sync::Arc;
use vertiscope_connector::{Dialect, GraphConnector, Transport};
use vertiscope_core::{ConnectionConfig, ExplorerHandle};
use vertiscope_gremlin::GremlinConnector;
use vertiscope_sparql::SparqlConnector;
use vertiscope_transport::HttpTransport;

#[derive(Parser)]
#[command(
    name = "vertiscope",
    version,
    about = "Browse Gremlin and SPARQL graph databases through one interface",
    long_about = "Vertiscope connects to a graph database (through its reverse proxy) in \
                  either the Gremlin or the SPARQL dialect, discovers its schema, and lets \
                  you browse vertices, edges, and neighborhoods against a local graph cache."
)]
pub struct Cli {
    /// Proxy endpoint that forwards queries to the database
    #[arg(long, global = true, default_value = "http://localhost:8182/query")]
    pub endpoint: String,

    /// Query dialect the database speaks: gremlin or sparql
    #[arg(long, global = true, default_value = "gremlin")]
    pub dialect: Dialect,

    /// Also log to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover and print the database schema
    #[command(
        long_about = "Resolves the connection's schema: vertex and edge labels with counts, \
                      observed label connections, and sampled attribute shapes. The schema is \
                      cached per connection; use --refresh to invalidate it."
    )]
    Schema {
        /// Invalidate the cached schema and resolve again
        #[arg(long)]
        refresh: bool,
    },
    /// Fetch one vertex with all its attributes
    Vertex {
        /// Vertex id (Gremlin id or SPARQL resource IRI)
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Expand the neighbors of a vertex into the cache
    Neighbors {
        /// Vertex id to expand around
        #[arg(value_name = "ID")]
        id: String,
        /// Maximum number of incident edges to fetch
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
    /// Count a vertex's neighbors per label
    Counts {
        /// Vertex id to count around
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List vertices carrying a label
    Search {
        /// Vertex label (composite Gremlin labels and SPARQL class IRIs work)
        #[arg(value_name = "LABEL")]
        label: String,
        /// Maximum number of vertices to fetch
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn build_handle(cli: &Cli) -> anyhow::Result<ExplorerHandle> {
    let config = ConnectionConfig::parse(&cli.endpoint, cli.dialect)?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(
        config.endpoint.clone(),
        config.timeout,
    )?);
    let connector: Arc<dyn GraphConnector> = match cli.dialect {
        Dialect::Gremlin => Arc::new(GremlinConnector::new(transport)),
        Dialect::Sparql => Arc::new(SparqlConnector::new(transport)),
    };
    Ok(ExplorerHandle::new(config, connector)?)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let handle = build_handle(&cli)?;
    tracing::info!(endpoint = %cli.endpoint, dialect = %cli.dialect, "connected");
    let result = match &cli.command {
        Commands::Schema { refresh } => commands::schema::run(&handle, *refresh).await,
        Commands::Vertex { id } => commands::vertex::run(&handle, id).await,
        Commands::Neighbors { id, limit } => commands::neighbors::run(&handle, id, *limit).await,
        Commands::Counts { id } => commands::neighbors::counts(&handle, id).await,
        Commands::Search { label, limit } => commands::search::run(&handle, label, *limit).await,
    };
    handle.shutdown();
    result
}
