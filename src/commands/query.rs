use anyhow::Result;

use crate::cli::QueryKind;
use crate::graph::KnowledgeGraph;
use crate::query::{self, OutputFormat, QueryParams, QueryType, ResultFormatter};

/// Load a saved graph and run one query against it
pub fn run(
    graph_path: &str,
    query_kind: QueryKind,
    entity_id: Option<String>,
    from: Option<String>,
    to: Option<String>,
    ids: Option<Vec<String>>,
    format: &str,
) -> Result<()> {
    let graph = KnowledgeGraph::load_from_file(graph_path)?;

    let query_type = match query_kind {
        QueryKind::FindEntity => QueryType::FindEntity,
        QueryKind::FindRelationships => QueryType::FindRelationships,
        QueryKind::FindPath => QueryType::FindPath,
        QueryKind::FindSubgraph => QueryType::FindSubgraph,
    };

    let params = QueryParams {
        entity_id,
        from,
        to,
        entity_ids: ids,
        max_depth: None,
    };

    let result = query::execute(&graph, query_type, &params)?;

    let formatter = ResultFormatter::new(format.parse::<OutputFormat>()?);
    println!("{}", formatter.format(&result)?);

    Ok(())
}
