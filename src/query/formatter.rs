use crate::error::GraphError;

use super::engine::QueryResult;

/// Output format for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(GraphError::validation(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

/// Formatter for query results
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a query result as a string
    pub fn format(&self, result: &QueryResult) -> Result<String, GraphError> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Text => {
                let mut out = String::new();

                if let Some(entities) = &result.entities {
                    out.push_str(&format!("Found {} entities:\n\n", entities.len()));
                    for (i, entity) in entities.iter().enumerate() {
                        out.push_str(&format!("{}. {}\n", i + 1, entity.label));
                        out.push_str(&format!("   Id: {}\n", entity.id.as_str()));
                        out.push_str(&format!("   Type: {}\n", entity.entity_type));
                        if let Some(description) = &entity.description {
                            out.push_str(&format!("   Description: {}\n", description));
                        }
                        out.push('\n');
                    }
                }

                if let Some(relationships) = &result.relationships {
                    out.push_str(&format!(
                        "Found {} relationships:\n\n",
                        relationships.len()
                    ));
                    for (i, rel) in relationships.iter().enumerate() {
                        out.push_str(&format!(
                            "{}. {} -> {} ({})\n",
                            i + 1,
                            rel.from.as_str(),
                            rel.to.as_str(),
                            rel.relationship_type
                        ));
                    }
                    if !relationships.is_empty() {
                        out.push('\n');
                    }
                }

                if let Some(subgraph) = &result.subgraph {
                    out.push_str(&format!(
                        "Subgraph: {} entities, {} relationships\n",
                        subgraph.entities.len(),
                        subgraph.relationships.len()
                    ));
                }

                out.push_str(&format!(
                    "({} results in {}ms)\n",
                    result.metadata.result_count, result.metadata.execution_time_ms
                ));

                Ok(out)
            }
        }
    }
}
