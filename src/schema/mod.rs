//! Named schemas declaring the entity and relationship types a graph is
//! allowed to use. Creation and listing are real; update is rejected, and
//! lookup/removal and validation are acknowledged stubs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

use crate::error::GraphError;
use crate::graph::knowledge_graph::KnowledgeGraph;

/// An allowed entity type with its optional property list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityTypeDef {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

/// An allowed relationship type with its optional property list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipTypeDef {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

/// A declared set of allowed entity/relationship types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    pub id: String,
    pub name: String,
    pub entity_types: Vec<EntityTypeDef>,
    pub relationship_types: Vec<RelationshipTypeDef>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of validating a graph against a schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// In-memory registry of named schemas
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a schema. Each call gets a fresh unique id.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        entity_types: Vec<EntityTypeDef>,
        relationship_types: Vec<RelationshipTypeDef>,
    ) -> Schema {
        let schema = Schema {
            id: format!("schema-{}", Uuid::new_v4()),
            name: name.into(),
            entity_types,
            relationship_types,
            created_at: Utc::now(),
        };

        self.schemas.insert(schema.id.clone(), schema.clone());
        schema
    }

    /// List all stored schemas
    pub fn list(&self) -> Vec<&Schema> {
        self.schemas.values().collect()
    }

    /// Update is not supported; always fails.
    pub fn update(&mut self, id: &str, _schema: Schema) -> Result<Schema, GraphError> {
        Err(GraphError::Unsupported(format!(
            "schema update is not supported (id: {})",
            id
        )))
    }

    /// Look up a schema by id.
    ///
    /// TODO: wire this up to the registry map; callers currently have no
    /// read path besides `list`.
    pub fn get(&self, _id: &str) -> Option<&Schema> {
        None
    }

    /// Remove a schema by id. Reports success without touching the
    /// registry, regardless of whether the id exists.
    pub fn delete(&mut self, id: &str) -> Result<(), GraphError> {
        warn!(schema_id = id, "schema delete is a stub; nothing removed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Validate a graph against a schema.
///
/// Stub: unconditionally reports success.
pub fn validate_graph(_graph: &KnowledgeGraph, _schema: &Schema) -> ValidationReport {
    ValidationReport {
        valid: true,
        violations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::entity::{Entity, EntityId, EntityType};

    #[test]
    fn test_create_with_empty_type_lists() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.create("X", vec![], vec![]);

        assert!(schema.entity_types.is_empty());
        assert!(schema.relationship_types.is_empty());
        assert_eq!(schema.name, "X");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut registry = SchemaRegistry::new();
        let a = registry.create("X", vec![], vec![]);
        let b = registry.create("X", vec![], vec![]);

        assert_ne!(a.id, b.id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_list_returns_all_schemas() {
        let mut registry = SchemaRegistry::new();
        registry.create("first", vec![], vec![]);
        registry.create(
            "second",
            vec![EntityTypeDef {
                name: "person".to_string(),
                properties: vec!["name".to_string()],
            }],
            vec![],
        );

        let names: Vec<&str> = registry.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"first"));
        assert!(names.contains(&"second"));
    }

    #[test]
    fn test_update_always_fails() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.create("X", vec![], vec![]);

        let err = registry.update(&schema.id.clone(), schema).unwrap_err();
        assert!(matches!(err, GraphError::Unsupported(_)));
    }

    #[test]
    fn test_get_is_a_stub() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.create("X", vec![], vec![]);
        assert!(registry.get(&schema.id).is_none());
    }

    #[test]
    fn test_delete_succeeds_without_removing() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.create("X", vec![], vec![]);

        registry.delete(&schema.id).unwrap();
        registry.delete("no-such-schema").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_validation_always_passes() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.create("strict", vec![], vec![]);

        // A graph using types the schema never declared still validates.
        let mut kg = KnowledgeGraph::new("g");
        kg.add_entity(Entity::new(EntityId::new("e"), "E", EntityType::Event));

        let report = validate_graph(&kg, &schema);
        assert!(report.valid);
        assert!(report.violations.is_empty());
    }
}
