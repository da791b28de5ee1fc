use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
};
use futures::{Stream, StreamExt};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tracing::info;

use crate::builder;
use crate::error::GraphError;
use crate::graph::KnowledgeGraph;
use crate::query;
use crate::server::models::*;
use crate::server::AppState;

/// Minimum accepted text length at the HTTP boundary; tighter than the
/// builder's own lower bound.
const MIN_HTTP_TEXT_LEN: usize = 10;

/// Inter-event delay for the SSE build stream.
const STREAM_DELAY: Duration = Duration::from_millis(250);

/// Error type that renders as the uniform `{ success, error, details? }`
/// JSON shape: 400 for validation failures, 500 otherwise.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<Vec<String>>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: message.into(),
            details: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Validation(messages) => Self {
                status: StatusCode::BAD_REQUEST,
                error: messages.join("; "),
                details: Some(messages),
            },
            GraphError::NotFound(message) => Self::not_found(message),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: other.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            success: false,
            error: self.error,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

fn validate_request_text(text: &str) -> Result<(), GraphError> {
    let len = text.chars().count();
    let mut errors = Vec::new();

    if len < MIN_HTTP_TEXT_LEN {
        errors.push(format!(
            "text must be at least {} characters",
            MIN_HTTP_TEXT_LEN
        ));
    } else if len > builder::MAX_TEXT_LEN {
        errors.push(format!(
            "text must be at most {} characters",
            builder::MAX_TEXT_LEN
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(GraphError::Validation(errors))
    }
}

/// Build a graph from text and register it in the store
pub async fn build_graph(
    Extension(state): Extension<AppState>,
    Json(request): Json<BuildGraphRequest>,
) -> Result<Json<BuildGraphResponse>, ApiError> {
    info!(chars = request.text.chars().count(), "building graph from text");

    validate_request_text(&request.text)?;
    let graph = builder::build_graph(&request.text)?;
    let serialized = serde_json::to_value(&graph).map_err(GraphError::from)?;

    state.graphs.write().await.save(graph);

    Ok(Json(BuildGraphResponse {
        success: true,
        graph: serialized,
    }))
}

/// Build a graph as a server-sent event stream, one event per builder item
pub async fn build_graph_stream(
    Extension(_state): Extension<AppState>,
    Json(request): Json<BuildGraphRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    info!("streaming graph build");

    validate_request_text(&request.text)?;

    let stream = builder::build_graph_stream(request.text, STREAM_DELAY).map(|event| {
        let event = match Event::default().json_data(&event) {
            Ok(event) => event,
            Err(err) => Event::default().data(format!("{{\"error\":\"{}\"}}", err)),
        };
        Ok(event)
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Fetch a registered graph by id
pub async fn get_graph(
    Extension(state): Extension<AppState>,
    Path(graph_id): Path<String>,
) -> Result<Json<GetGraphResponse>, ApiError> {
    let graphs = state.graphs.read().await;
    let graph = graphs
        .load(&graph_id)
        .ok_or_else(|| ApiError::not_found(format!("graph not found: {}", graph_id)))?;

    let serialized = serde_json::to_value(graph).map_err(GraphError::from)?;
    Ok(Json(GetGraphResponse {
        success: true,
        graph: serialized,
    }))
}

/// Delete a graph. Always reports success, whether or not the id exists.
pub async fn delete_graph(
    Extension(state): Extension<AppState>,
    Path(graph_id): Path<String>,
) -> Json<DeleteGraphResponse> {
    info!(graph_id = %graph_id, "deleting graph");
    state.graphs.write().await.delete(&graph_id);
    Json(DeleteGraphResponse { success: true })
}

/// Run a query against a registered graph. Unknown graph ids resolve to
/// an empty placeholder, so their results are always empty.
pub async fn run_query(
    Extension(state): Extension<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    info!(graph_id = %request.graph_id, query_type = ?request.query_type, "running query");

    let graphs = state.graphs.read().await;
    let result = match graphs.load(&request.graph_id) {
        Some(graph) => query::execute(graph, request.query_type, &request.params)?,
        None => {
            let placeholder = KnowledgeGraph::new(request.graph_id.clone());
            query::execute(&placeholder, request.query_type, &request.params)?
        }
    };

    Ok(Json(QueryResponse {
        success: true,
        result,
    }))
}

/// Create a schema
pub async fn create_schema(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateSchemaRequest>,
) -> Json<SchemaResponse> {
    info!(name = %request.name, "creating schema");

    let schema = state.schemas.write().await.create(
        request.name,
        request.entity_types,
        request.relationship_types,
    );

    Json(SchemaResponse {
        success: true,
        schema,
    })
}

/// List all schemas
pub async fn list_schemas(Extension(state): Extension<AppState>) -> Json<ListSchemasResponse> {
    let schemas = state.schemas.read().await.list().into_iter().cloned().collect();
    Json(ListSchemasResponse {
        success: true,
        schemas,
    })
}
