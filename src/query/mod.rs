/// Module defining the raw, untrusted query-parameter map.
mod raw_query;
pub use raw_query::*;

/// Module compiling raw parameters into a structured predicate.
mod filter_compiler;
pub use filter_compiler::*;

/// Module computing page windows and next/prev descriptors.
mod pagination;
pub use pagination::*;

/// Module assembling complete view requests (filter + select + sort + window).
mod view_request;
pub use view_request::*;

/// Module executing a view request end to end against a store.
mod list_view;
pub use list_view::*;

/// Module defining the response envelopes for listing and item endpoints.
mod response_models;
pub use response_models::*;
