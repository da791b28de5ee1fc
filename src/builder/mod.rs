//! Builds a knowledge graph from free text.
//!
//! Extraction is currently a mock: it produces a fixed pair of concept
//! entities regardless of input content, and infers an all-pairs
//! `related_to` join between them. The module boundary is the seam where a
//! real extraction backend would plug in.

use chrono::Utc;
use futures::channel::mpsc;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::error::GraphError;
use crate::graph::entity::{Entity, EntityId, EntityType};
use crate::graph::relationship::{Relationship, RelationshipType};
use crate::graph::{GraphMetadata, KnowledgeGraph};

/// Maximum accepted input length, in characters.
pub const MAX_TEXT_LEN: usize = 10_000;

/// Strength assigned to every inferred relationship.
const INFERRED_STRENGTH: f32 = 0.85;

/// Length of the source excerpt recorded in graph metadata.
const EXCERPT_LEN: usize = 100;

/// Check that input text is non-empty and within the length bound.
pub fn validate_text(text: &str) -> Result<(), GraphError> {
    let mut errors = Vec::new();

    let len = text.chars().count();
    if len == 0 {
        errors.push("text is required".to_string());
    } else if len > MAX_TEXT_LEN {
        errors.push(format!("text must be at most {} characters", MAX_TEXT_LEN));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(GraphError::Validation(errors))
    }
}

/// Extract entities from text.
///
/// Mock implementation: returns a fixed concept pair independent of the
/// input content.
fn extract_entities(text: &str) -> Vec<Entity> {
    let source_length = serde_json::json!(text.chars().count());

    vec![
        Entity::new(
            EntityId::new(&format!("entity-{}", Uuid::new_v4())),
            "Primary Concept",
            EntityType::Concept,
        )
        .with_description("Main concept extracted from the text")
        .with_confidence(0.9)
        .with_property("source_length", source_length.clone()),
        Entity::new(
            EntityId::new(&format!("entity-{}", Uuid::new_v4())),
            "Secondary Concept",
            EntityType::Concept,
        )
        .with_description("Supporting concept extracted from the text")
        .with_confidence(0.8)
        .with_property("source_length", source_length),
    ]
}

/// Infer relationships between extracted entities: an all-pairs join,
/// each edge typed `related_to` at a fixed strength.
fn infer_relationships(entities: &[Entity]) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for (i, from) in entities.iter().enumerate() {
        for to in entities.iter().skip(i + 1) {
            let rel_id =
                Relationship::generate_id(&from.id, &to.id, &RelationshipType::RelatedTo);
            relationships.push(
                Relationship::new(
                    rel_id,
                    from.id.clone(),
                    to.id.clone(),
                    RelationshipType::RelatedTo,
                )
                .with_strength(INFERRED_STRENGTH),
            );
        }
    }

    relationships
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}

/// Build a knowledge graph from input text.
pub fn build_graph(text: &str) -> Result<KnowledgeGraph, GraphError> {
    validate_text(text)?;

    let entities = extract_entities(text);
    let relationships = infer_relationships(&entities);

    info!(
        entities = entities.len(),
        relationships = relationships.len(),
        "built knowledge graph"
    );

    let mut graph = KnowledgeGraph::new(format!("graph-{}", Uuid::new_v4())).with_metadata(
        GraphMetadata {
            source_excerpt: Some(excerpt(text)),
            processed_at: Some(Utc::now()),
            version: Some("1.0".to_string()),
        },
    );

    for entity in entities {
        graph.add_entity(entity);
    }
    for relationship in relationships {
        graph.add_relationship(relationship);
    }

    Ok(graph)
}

/// Incremental output of the streaming builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildEvent {
    Entity { entity: Entity },
    Relationship { relationship: Relationship },
    Completed { entity_count: usize, relationship_count: usize },
    Failed { errors: Vec<String> },
}

/// Build a graph as an ordered event stream: one event per entity, then
/// one per relationship, then a completion summary. The delay between
/// events is artificial, to demonstrate progressive consumption; pass
/// `Duration::ZERO` to disable it.
pub fn build_graph_stream(text: String, delay: Duration) -> impl Stream<Item = BuildEvent> {
    let (tx, rx) = mpsc::unbounded();

    tokio::spawn(async move {
        if let Err(GraphError::Validation(errors)) = validate_text(&text) {
            let _ = tx.unbounded_send(BuildEvent::Failed { errors });
            return;
        }

        let entities = extract_entities(&text);
        let relationships = infer_relationships(&entities);
        let entity_count = entities.len();
        let relationship_count = relationships.len();

        for entity in entities {
            if tx.unbounded_send(BuildEvent::Entity { entity }).is_err() {
                return;
            }
            tokio::time::sleep(delay).await;
        }

        for relationship in relationships {
            if tx
                .unbounded_send(BuildEvent::Relationship { relationship })
                .is_err()
            {
                return;
            }
            tokio::time::sleep(delay).await;
        }

        let _ = tx.unbounded_send(BuildEvent::Completed {
            entity_count,
            relationship_count,
        });
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn test_empty_text_fails_validation() {
        let err = build_graph("").unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
        assert!(err.to_string().contains("text is required"));
    }

    #[test]
    fn test_oversized_text_fails_validation() {
        let text = "x".repeat(MAX_TEXT_LEN + 1);
        let err = build_graph(&text).unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
    }

    #[test]
    fn test_text_at_length_bound_is_accepted() {
        let text = "x".repeat(MAX_TEXT_LEN);
        assert!(build_graph(&text).is_ok());
    }

    #[test]
    fn test_sample_text_yields_two_entities_one_relationship() {
        let graph = build_graph("Hello world, this is RSC").unwrap();

        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.relationship_count(), 1);

        let rels = graph.get_all_relationships();
        assert_eq!(rels[0].relationship_type, RelationshipType::RelatedTo);
        assert_eq!(rels[0].strength, Some(0.85));
    }

    #[test]
    fn test_relationship_count_is_all_pairs() {
        // C(n, 2) over whatever extraction produced
        let graph = build_graph("some input").unwrap();
        let n = graph.entity_count();
        assert_eq!(graph.relationship_count(), n * (n - 1) / 2);
    }

    #[test]
    fn test_metadata_is_stamped() {
        let text = "a".repeat(500);
        let graph = build_graph(&text).unwrap();

        let metadata = graph.metadata.unwrap();
        assert_eq!(metadata.source_excerpt.unwrap().chars().count(), 100);
        assert!(metadata.processed_at.is_some());
        assert_eq!(metadata.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_graph_ids_are_unique_per_build() {
        let g1 = build_graph("first").unwrap();
        let g2 = build_graph("second").unwrap();
        assert_ne!(g1.id, g2.id);
    }

    #[tokio::test]
    async fn test_stream_emits_entities_then_relationships() {
        let events: Vec<BuildEvent> =
            build_graph_stream("Hello world, this is RSC".to_string(), Duration::ZERO)
                .collect()
                .await;

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], BuildEvent::Entity { .. }));
        assert!(matches!(events[1], BuildEvent::Entity { .. }));
        assert!(matches!(events[2], BuildEvent::Relationship { .. }));
        assert_eq!(
            events[3],
            BuildEvent::Completed {
                entity_count: 2,
                relationship_count: 1
            }
        );
    }

    #[tokio::test]
    async fn test_stream_reports_validation_failure() {
        let events: Vec<BuildEvent> =
            build_graph_stream(String::new(), Duration::ZERO).collect().await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            BuildEvent::Failed { errors } => {
                assert_eq!(errors, &vec!["text is required".to_string()]);
            }
            other => panic!("expected Failed event, got {:?}", other),
        }
    }
}
