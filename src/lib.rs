// Expose modules as public for use by other crates
pub mod builder;
pub mod error;
pub mod graph;
pub mod query;
pub mod schema;
pub mod server;
pub mod store;

// Re-export core types for convenience
pub use error::GraphError;
pub use graph::entity;
pub use graph::knowledge_graph::KnowledgeGraph;
pub use graph::relationship;
