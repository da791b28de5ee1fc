use clap::{Parser, Subcommand, ValueEnum};

/// Graphling: builds knowledge graphs from text and serves them over HTTP
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build knowledge graphs from text and query them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a knowledge graph from input text
    Build {
        /// Input text to process (1 to 10000 characters)
        text: String,

        /// Write the graph to a file instead of stdout
        #[arg(long, short)]
        output: Option<String>,

        /// Print build events incrementally instead of the final graph
        #[arg(long)]
        stream: bool,
    },

    /// Run a query against a saved graph file
    Query {
        /// Path to a graph JSON file produced by `build --output`
        graph: String,

        /// The query to run
        #[arg(value_enum)]
        query_type: QueryKind,

        /// Entity id for find-entity and find-relationships
        #[arg(long)]
        entity_id: Option<String>,

        /// Source entity id for find-path
        #[arg(long)]
        from: Option<String>,

        /// Target entity id for find-path
        #[arg(long)]
        to: Option<String>,

        /// Comma-separated entity ids for find-subgraph
        #[arg(long, value_delimiter = ',')]
        ids: Option<Vec<String>>,

        /// Output format (text, json)
        #[arg(long, short, default_value = "text")]
        format: String,
    },

    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, short, default_value = "3000")]
        port: u16,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum QueryKind {
    /// Look up a single entity by id
    FindEntity,

    /// List relationships touching an entity
    FindRelationships,

    /// Find a path between two entities (not implemented; always empty)
    FindPath,

    /// Extract the subgraph induced by a set of entity ids
    FindSubgraph,
}
