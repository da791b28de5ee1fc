use anyhow::Result;
use futures::StreamExt;
use std::time::Duration;
use tracing::info;

use crate::builder::{self, BuildEvent};

/// Inter-event delay when printing a streamed build.
const STREAM_DELAY: Duration = Duration::from_millis(250);

/// Build a graph from text and print or save it
pub async fn run(text: &str, output: Option<&str>, stream: bool) -> Result<()> {
    if stream {
        return run_streaming(text).await;
    }

    let graph = builder::build_graph(text)?;
    info!(
        entities = graph.entity_count(),
        relationships = graph.relationship_count(),
        "graph built"
    );

    match output {
        Some(path) => {
            graph.save_to_file(path)?;
            println!("Graph {} written to {}", graph.id, path);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
    }

    Ok(())
}

async fn run_streaming(text: &str) -> Result<()> {
    let mut events = builder::build_graph_stream(text.to_string(), STREAM_DELAY);

    while let Some(event) = events.next().await {
        match event {
            BuildEvent::Entity { entity } => {
                println!("entity: {} ({})", entity.label, entity.id.as_str());
            }
            BuildEvent::Relationship { relationship } => {
                println!(
                    "relationship: {} -> {} ({})",
                    relationship.from.as_str(),
                    relationship.to.as_str(),
                    relationship.relationship_type
                );
            }
            BuildEvent::Completed {
                entity_count,
                relationship_count,
            } => {
                println!(
                    "done: {} entities, {} relationships",
                    entity_count, relationship_count
                );
            }
            BuildEvent::Failed { errors } => {
                anyhow::bail!("build failed: {}", errors.join("; "));
            }
        }
    }

    Ok(())
}
