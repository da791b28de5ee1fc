//! In-process graph registry.
//!
//! Nothing here survives a process boundary: save and delete always
//! succeed regardless of the id, and the map is the only backing store.
//! A real storage backend would replace this type behind the same surface.

use std::collections::HashMap;

use crate::graph::knowledge_graph::KnowledgeGraph;

/// Registry of built graphs, keyed by graph id
#[derive(Debug, Default)]
pub struct GraphStore {
    graphs: HashMap<String, KnowledgeGraph>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a graph under its id. Always succeeds; an existing graph
    /// with the same id is replaced.
    pub fn save(&mut self, graph: KnowledgeGraph) {
        self.graphs.insert(graph.id.clone(), graph);
    }

    /// Fetch a graph by id
    pub fn load(&self, graph_id: &str) -> Option<&KnowledgeGraph> {
        self.graphs.get(graph_id)
    }

    /// Remove a graph by id. Always reports success, whether or not the
    /// id was present.
    pub fn delete(&mut self, graph_id: &str) {
        self.graphs.remove(graph_id);
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
