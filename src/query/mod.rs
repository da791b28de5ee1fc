mod engine;
mod formatter;

pub use engine::{execute, QueryMetadata, QueryParams, QueryResult, QueryType, Subgraph};
pub use formatter::{OutputFormat, ResultFormatter};
