use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::entity::EntityId;

/// Unique identifier for a relationship
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RelationshipId(pub String);

impl RelationshipId {
    pub fn new(id: &str) -> Self {
        RelationshipId(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Relationship type enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    RelatedTo,
    PartOf,
    LocatedIn,
    WorksFor,
    CreatedBy,
    InfluencedBy,
    SimilarTo,
    Custom(String),
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipType::Custom(name) => write!(f, "{}", name),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// A directed, typed edge between two entities. The endpoints are not
/// required to reference entities present in the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub id: RelationshipId,
    pub from: EntityId,
    pub to: EntityId,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    pub fn new(
        id: RelationshipId,
        from: EntityId,
        to: EntityId,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            id,
            from,
            to,
            relationship_type,
            label: None,
            strength: None,
            properties: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the strength score, clamped to [0, 1].
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength.clamp(0.0, 1.0));
        self
    }

    /// Generate a default relationship ID based on endpoints and type
    pub fn generate_id(
        from: &EntityId,
        to: &EntityId,
        rel_type: &RelationshipType,
    ) -> RelationshipId {
        let type_str = match rel_type {
            RelationshipType::Custom(name) => name.clone(),
            _ => format!("{:?}", rel_type),
        };

        RelationshipId::new(&format!("{}->{}::{}", from.as_str(), to.as_str(), type_str))
    }
}

/// A store for efficiently retrieving relationships
#[derive(Debug, Clone, Default)]
pub struct RelationshipStore {
    relationships: HashMap<RelationshipId, Relationship>,
    outgoing: HashMap<EntityId, Vec<RelationshipId>>,
    incoming: HashMap<EntityId, Vec<RelationshipId>>,
    by_type: HashMap<RelationshipType, Vec<RelationshipId>>,
}

impl RelationshipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship to the store
    pub fn add_relationship(&mut self, relationship: Relationship) {
        let rel_id = relationship.id.clone();
        let from = relationship.from.clone();
        let to = relationship.to.clone();
        let rel_type = relationship.relationship_type.clone();

        self.relationships.insert(rel_id.clone(), relationship);

        self.outgoing.entry(from).or_default().push(rel_id.clone());
        self.incoming.entry(to).or_default().push(rel_id.clone());
        self.by_type.entry(rel_type).or_default().push(rel_id);
    }

    /// Get a relationship by ID
    pub fn get_relationship(&self, id: &RelationshipId) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Get all outgoing relationships from an entity
    pub fn get_outgoing(&self, entity_id: &EntityId) -> Vec<&Relationship> {
        match self.outgoing.get(entity_id) {
            Some(rel_ids) => rel_ids
                .iter()
                .filter_map(|id| self.relationships.get(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get all incoming relationships to an entity
    pub fn get_incoming(&self, entity_id: &EntityId) -> Vec<&Relationship> {
        match self.incoming.get(entity_id) {
            Some(rel_ids) => rel_ids
                .iter()
                .filter_map(|id| self.relationships.get(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get all relationships of a specific type
    pub fn get_by_type(&self, rel_type: &RelationshipType) -> Vec<&Relationship> {
        match self.by_type.get(rel_type) {
            Some(rel_ids) => rel_ids
                .iter()
                .filter_map(|id| self.relationships.get(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get relationships touching an entity as either endpoint
    pub fn get_touching(&self, entity_id: &EntityId) -> Vec<&Relationship> {
        let mut rels = self.get_outgoing(entity_id);
        for rel in self.get_incoming(entity_id) {
            // A self-loop appears in both indexes; keep it once.
            if rel.from != rel.to {
                rels.push(rel);
            }
        }
        rels
    }

    /// Get all relationships
    pub fn get_all(&self) -> Vec<&Relationship> {
        self.relationships.values().collect()
    }

    /// Count the number of relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(from: &str, to: &str, rel_type: RelationshipType) -> Relationship {
        let from = EntityId::new(from);
        let to = EntityId::new(to);
        let id = Relationship::generate_id(&from, &to, &rel_type);
        Relationship::new(id, from, to, rel_type)
    }

    #[test]
    fn test_generate_id_is_deterministic() {
        let a = EntityId::new("a");
        let b = EntityId::new("b");
        let id1 = Relationship::generate_id(&a, &b, &RelationshipType::PartOf);
        let id2 = Relationship::generate_id(&a, &b, &RelationshipType::PartOf);
        assert_eq!(id1, id2);
        assert_eq!(id1.as_str(), "a->b::PartOf");

        let custom = Relationship::generate_id(
            &a,
            &b,
            &RelationshipType::Custom("mentors".to_string()),
        );
        assert_eq!(custom.as_str(), "a->b::mentors");
    }

    #[test]
    fn test_store_indexes_both_directions() {
        let mut store = RelationshipStore::new();
        store.add_relationship(rel("a", "b", RelationshipType::RelatedTo));
        store.add_relationship(rel("b", "c", RelationshipType::PartOf));

        let b = EntityId::new("b");
        assert_eq!(store.get_outgoing(&b).len(), 1);
        assert_eq!(store.get_incoming(&b).len(), 1);
        assert_eq!(store.get_touching(&b).len(), 2);
        assert_eq!(store.get_by_type(&RelationshipType::PartOf).len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_touching_counts_self_loop_once() {
        let mut store = RelationshipStore::new();
        store.add_relationship(rel("a", "a", RelationshipType::SimilarTo));

        let a = EntityId::new("a");
        assert_eq!(store.get_touching(&a).len(), 1);
    }

    #[test]
    fn test_strength_is_clamped() {
        let r = rel("a", "b", RelationshipType::RelatedTo).with_strength(2.0);
        assert_eq!(r.strength, Some(1.0));
    }
}
