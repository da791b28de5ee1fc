use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::GraphError;

use super::entity::{Entity, EntityId, EntityType};
use super::relationship::{Relationship, RelationshipStore, RelationshipType};

/// Metadata describing how a graph was produced
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Knowledge graph aggregating entities and relationships
#[derive(Debug, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub id: String,

    // Entity storage
    entities: HashMap<EntityId, Entity>,

    // Relationship indexes, rebuilt from relationship_data on load
    #[serde(skip)]
    relationship_store: RelationshipStore,

    // Serializable relationship data
    relationship_data: Vec<Relationship>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GraphMetadata>,
}

impl KnowledgeGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entities: HashMap::new(),
            relationship_store: RelationshipStore::new(),
            relationship_data: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: GraphMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add an entity to the graph. A duplicate id replaces the original.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Get an entity by its ID
    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get all entities
    pub fn get_all_entities(&self) -> Vec<&Entity> {
        self.entities.values().collect()
    }

    /// Get entities by type
    pub fn get_entities_by_type(&self, entity_type: &EntityType) -> Vec<&Entity> {
        self.entities
            .values()
            .filter(|e| &e.entity_type == entity_type)
            .collect()
    }

    /// Add a relationship between entities
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationship_data.push(relationship.clone());
        self.relationship_store.add_relationship(relationship);
    }

    /// Create and add a relationship between entities.
    ///
    /// Endpoints are not validated against the entity map; edges may
    /// reference entities that are not (yet) in the graph.
    pub fn create_relationship(
        &mut self,
        from: EntityId,
        to: EntityId,
        rel_type: RelationshipType,
    ) -> Relationship {
        let rel_id = Relationship::generate_id(&from, &to, &rel_type);
        let relationship = Relationship::new(rel_id, from, to, rel_type);
        self.add_relationship(relationship.clone());
        relationship
    }

    /// Get relationships by source entity
    pub fn get_outgoing_relationships(&self, from: &EntityId) -> Vec<&Relationship> {
        self.relationship_store.get_outgoing(from)
    }

    /// Get relationships by target entity
    pub fn get_incoming_relationships(&self, to: &EntityId) -> Vec<&Relationship> {
        self.relationship_store.get_incoming(to)
    }

    /// Get relationships touching an entity as either endpoint
    pub fn get_relationships_for_entity(&self, entity_id: &EntityId) -> Vec<&Relationship> {
        self.relationship_store.get_touching(entity_id)
    }

    /// Get all relationships of a specific type
    pub fn get_relationships_by_type(&self, rel_type: &RelationshipType) -> Vec<&Relationship> {
        self.relationship_store.get_by_type(rel_type)
    }

    /// Get the entities one hop away from an entity, following edges in
    /// either direction.
    pub fn get_neighbors(&self, entity_id: &EntityId) -> Vec<&Entity> {
        let mut seen = HashSet::new();
        let mut neighbors = Vec::new();

        for rel in self.relationship_store.get_touching(entity_id) {
            let other = if &rel.from == entity_id {
                &rel.to
            } else {
                &rel.from
            };

            if seen.insert(other.clone()) {
                if let Some(entity) = self.get_entity(other) {
                    neighbors.push(entity);
                }
            }
        }

        neighbors
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationship_data.len()
    }

    /// Get all relationships as owned values
    pub fn get_all_relationships(&self) -> Vec<Relationship> {
        self.relationship_data.clone()
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), GraphError> {
        let json = serde_json::to_string_pretty(&self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path)?;
        let mut graph: Self = serde_json::from_str(&content)?;

        // Rebuild relationship indexes from serialized data
        for rel in &graph.relationship_data {
            graph.relationship_store.add_relationship(rel.clone());
        }

        Ok(graph)
    }
}
