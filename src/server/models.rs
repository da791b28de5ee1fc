use serde::{Deserialize, Serialize};

use crate::query::{QueryParams, QueryResult, QueryType};
use crate::schema::{EntityTypeDef, RelationshipTypeDef, Schema};

/// Graph build request
#[derive(Debug, Deserialize)]
pub struct BuildGraphRequest {
    pub text: String,
}

/// Graph build response; `graph` is the serialized KnowledgeGraph
#[derive(Debug, Serialize)]
pub struct BuildGraphResponse {
    pub success: bool,
    pub graph: serde_json::Value,
}

/// Query request
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "graphId")]
    pub graph_id: String,
    #[serde(rename = "queryType")]
    pub query_type: QueryType,
    #[serde(default)]
    pub params: QueryParams,
}

/// Query response
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub result: QueryResult,
}

/// Graph fetch response
#[derive(Debug, Serialize)]
pub struct GetGraphResponse {
    pub success: bool,
    pub graph: serde_json::Value,
}

/// Graph delete response
#[derive(Debug, Serialize)]
pub struct DeleteGraphResponse {
    pub success: bool,
}

/// Schema create request
#[derive(Debug, Deserialize)]
pub struct CreateSchemaRequest {
    pub name: String,
    #[serde(default, rename = "entityTypes")]
    pub entity_types: Vec<EntityTypeDef>,
    #[serde(default, rename = "relationshipTypes")]
    pub relationship_types: Vec<RelationshipTypeDef>,
}

/// Schema create response
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub success: bool,
    pub schema: Schema,
}

/// Schema list response
#[derive(Debug, Serialize)]
pub struct ListSchemasResponse {
    pub success: bool,
    pub schemas: Vec<Schema>,
}

/// Uniform error body for all failure responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}
