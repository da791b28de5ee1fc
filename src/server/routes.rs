use axum::{
    routing::{get, post},
    Router,
};

use crate::server::handlers;

/// Create the API router
pub fn api_router() -> Router {
    Router::new()
        .route("/graphs", post(handlers::build_graph))
        .route("/graphs/stream", post(handlers::build_graph_stream))
        .route(
            "/graphs/:id",
            get(handlers::get_graph).delete(handlers::delete_graph),
        )
        .route("/query", post(handlers::run_query))
        .route(
            "/schemas",
            post(handlers::create_schema).get(handlers::list_schemas),
        )
}
