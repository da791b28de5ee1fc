use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::warn;

use crate::error::GraphError;
use crate::graph::entity::{Entity, EntityId};
use crate::graph::knowledge_graph::KnowledgeGraph;
use crate::graph::relationship::Relationship;

/// The queries the engine can dispatch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    FindEntity,
    FindRelationships,
    FindPath,
    FindSubgraph,
}

/// Parameters for a query; which fields matter depends on the query type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// A subgraph extracted by id set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subgraph {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

/// Timing and size of a query execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMetadata {
    pub execution_time_ms: u64,
    pub result_count: usize,
}

/// Result envelope; the populated field depends on the query type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<Subgraph>,
    pub metadata: QueryMetadata,
}

impl QueryMetadata {
    fn capture(result_count: usize, started: Instant) -> Self {
        Self {
            execution_time_ms: started.elapsed().as_millis() as u64,
            result_count,
        }
    }
}

/// Execute a query against a graph and return the results.
///
/// All cases run as linear scans over the in-memory graph.
pub fn execute(
    graph: &KnowledgeGraph,
    query_type: QueryType,
    params: &QueryParams,
) -> Result<QueryResult, GraphError> {
    let started = Instant::now();

    match query_type {
        QueryType::FindEntity => {
            let entity_id = params
                .entity_id
                .as_deref()
                .ok_or_else(|| GraphError::validation("entity_id is required for find_entity"))?;

            let entities: Vec<Entity> = graph
                .get_entity(&EntityId::new(entity_id))
                .cloned()
                .into_iter()
                .collect();

            Ok(QueryResult {
                metadata: QueryMetadata::capture(entities.len(), started),
                entities: Some(entities),
                relationships: None,
                subgraph: None,
            })
        }

        QueryType::FindRelationships => {
            let entity_id = params.entity_id.as_deref().ok_or_else(|| {
                GraphError::validation("entity_id is required for find_relationships")
            })?;

            let relationships: Vec<Relationship> = graph
                .get_relationships_for_entity(&EntityId::new(entity_id))
                .into_iter()
                .cloned()
                .collect();

            Ok(QueryResult {
                metadata: QueryMetadata::capture(relationships.len(), started),
                entities: None,
                relationships: Some(relationships),
                subgraph: None,
            })
        }

        QueryType::FindPath => {
            // TODO: implement path search once a real backend replaces the
            // in-memory scan; until then this always reports zero results.
            warn!("find_path is not implemented; returning empty result");

            Ok(QueryResult {
                metadata: QueryMetadata::capture(0, started),
                entities: None,
                relationships: Some(Vec::new()),
                subgraph: None,
            })
        }

        QueryType::FindSubgraph => {
            let ids = params.entity_ids.as_deref().ok_or_else(|| {
                GraphError::validation("entity_ids is required for find_subgraph")
            })?;

            let id_set: HashSet<EntityId> =
                ids.iter().map(|id| EntityId::new(id)).collect();

            let entities: Vec<Entity> = id_set
                .iter()
                .filter_map(|id| graph.get_entity(id))
                .cloned()
                .collect();

            let relationships: Vec<Relationship> = graph
                .get_all_relationships()
                .into_iter()
                .filter(|rel| id_set.contains(&rel.from) && id_set.contains(&rel.to))
                .collect();

            let result_count = entities.len() + relationships.len();
            Ok(QueryResult {
                metadata: QueryMetadata::capture(result_count, started),
                entities: None,
                relationships: None,
                subgraph: Some(Subgraph {
                    entities,
                    relationships,
                }),
            })
        }
    }
}
