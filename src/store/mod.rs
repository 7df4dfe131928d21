// Linter allowance for functions that might have many arguments,
// often seen in builder patterns or comprehensive configuration methods.
#![allow(clippy::too_many_arguments)]

/// Module defining the document model and Serde object mapping.
mod document_models;
pub use document_models::*;

/// Module defining models used in queries (predicates, orders, etc.).
mod query_models;
pub use query_models::*;

/// Module for query execution.
mod query;
pub use query::*;

/// Module for document retrieval operations (get).
mod get;
pub use get::*;

/// Module for document creation operations.
mod create;
pub use create::*;

/// Module for document update operations.
mod update;
pub use update::*;

/// Module for document deletion operations.
mod delete;
pub use delete::*;

/// Module for aggregated (average) query execution.
mod aggregated_query;
pub use aggregated_query::*;
