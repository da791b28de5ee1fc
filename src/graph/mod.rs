pub mod entity;
pub mod knowledge_graph;
pub mod relationship;

// Re-export KnowledgeGraph for convenience
pub use crate::graph::knowledge_graph::{GraphMetadata, KnowledgeGraph};
