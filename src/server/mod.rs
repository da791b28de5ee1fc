pub mod handlers;
pub mod models;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Extension, http::Method, routing::get, Router};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::schema::SchemaRegistry;
use crate::store::GraphStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Graphs built during this process, keyed by graph id
    pub graphs: Arc<RwLock<GraphStore>>,
    /// Schemas created during this process
    pub schemas: Arc<RwLock<SchemaRegistry>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            graphs: Arc::new(RwLock::new(GraphStore::new())),
            schemas: Arc::new(RwLock::new(SchemaRegistry::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router with the given state
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .nest("/api", routes::api_router())
        .route("/health", get(handlers::health_check))
        .layer(Extension(state))
        .layer(cors)
}

/// Run the HTTP server on the specified host and port
pub async fn run_server(host: &str, port: u16) -> Result<()> {
    let state = AppState::new();
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("graphling server starting on http://{}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Extension, Json, Path};
    use axum::http::StatusCode;

    use crate::server::models::*;

    fn state() -> AppState {
        AppState::new()
    }

    #[tokio::test]
    async fn test_build_graph_rejects_short_text() {
        let request = BuildGraphRequest {
            text: "too short".to_string(), // 9 chars
        };

        let err = handlers::build_graph(Extension(state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_build_graph_rejects_oversized_text() {
        let request = BuildGraphRequest {
            text: "x".repeat(10_001),
        };

        let err = handlers::build_graph(Extension(state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_build_graph_returns_graph_and_registers_it() {
        let state = state();
        let request = BuildGraphRequest {
            text: "Hello world, this is RSC".to_string(),
        };

        let Json(response) = handlers::build_graph(Extension(state.clone()), Json(request))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.graph["entities"].as_object().unwrap().len(), 2);
        assert_eq!(
            response.graph["relationship_data"].as_array().unwrap().len(),
            1
        );

        let graph_id = response.graph["id"].as_str().unwrap();
        assert!(state.graphs.read().await.load(graph_id).is_some());
    }

    #[tokio::test]
    async fn test_query_unknown_graph_returns_empty_result() {
        let request = QueryRequest {
            graph_id: "no-such-graph".to_string(),
            query_type: crate::query::QueryType::FindEntity,
            params: crate::query::QueryParams {
                entity_id: Some("anything".to_string()),
                ..Default::default()
            },
        };

        let Json(response) = handlers::run_query(Extension(state()), Json(request))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.result.metadata.result_count, 0);
        assert!(response.result.entities.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_registered_graph_finds_entities() {
        let state = state();

        let Json(built) = handlers::build_graph(
            Extension(state.clone()),
            Json(BuildGraphRequest {
                text: "Hello world, this is RSC".to_string(),
            }),
        )
        .await
        .unwrap();

        let graph_id = built.graph["id"].as_str().unwrap().to_string();
        let entity_id = built.graph["entities"]
            .as_object()
            .unwrap()
            .keys()
            .next()
            .unwrap()
            .clone();

        let Json(response) = handlers::run_query(
            Extension(state),
            Json(QueryRequest {
                graph_id,
                query_type: crate::query::QueryType::FindEntity,
                params: crate::query::QueryParams {
                    entity_id: Some(entity_id),
                    ..Default::default()
                },
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.result.metadata.result_count, 1);
    }

    #[tokio::test]
    async fn test_query_missing_params_is_bad_request() {
        let request = QueryRequest {
            graph_id: "g".to_string(),
            query_type: crate::query::QueryType::FindEntity,
            params: Default::default(),
        };

        let err = handlers::run_query(Extension(state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_graph_not_found() {
        let err = handlers::get_graph(Extension(state()), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_graph_always_succeeds() {
        let Json(response) =
            handlers::delete_graph(Extension(state()), Path("never-existed".to_string())).await;
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_schema_create_and_list() {
        let state = state();

        let Json(created) = handlers::create_schema(
            Extension(state.clone()),
            Json(CreateSchemaRequest {
                name: "X".to_string(),
                entity_types: vec![],
                relationship_types: vec![],
            }),
        )
        .await;

        assert!(created.success);
        assert!(created.schema.entity_types.is_empty());
        assert!(created.schema.relationship_types.is_empty());

        let Json(listed) = handlers::list_schemas(Extension(state)).await;
        assert_eq!(listed.schemas.len(), 1);
        assert_eq!(listed.schemas[0].name, "X");
    }
}
