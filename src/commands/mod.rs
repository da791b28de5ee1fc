pub mod build;
pub mod query;
pub mod serve;
