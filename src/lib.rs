//! # Campdir, the directory backend core
//!
//! Library provides the storage-facing core of a bootcamp directory service:
//! - Compiles untrusted HTTP query parameters into a structured filter
//!   predicate with a closed, allow-listed operator set;
//! - Builds complete view requests: field projection, signed sort keys and a
//!   page window with next/prev descriptors;
//! - Maintains derived aggregates (average course tuition, average review
//!   rating) on parent documents as child records are created, updated or
//!   deleted;
//! - Narrow async storage facade (query / get / create / update / delete /
//!   average) with an in-memory implementation for tests and embedding;
//! - Full async based on Tokio runtime; documents map to Rust structures with
//!   Serde.
//!
//! ## Example
//!
//! ```rust,no_run
//!use campdir::*;
//!
//!#[tokio::main]
//!async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!    let db = CampdirMemoryStore::new();
//!
//!    let bootcamp = Bootcamp::new("Devworks".to_string(), "Full stack in 12 weeks".to_string());
//!    let bootcamp_doc = db
//!        .create_doc("bootcamps", to_document(None, &bootcamp)?)
//!        .await?;
//!
//!    let course = Course::new(
//!        "Front End Web Development".to_string(),
//!        "HTML/CSS/JavaScript".to_string(),
//!        "8".to_string(),
//!        8000.0,
//!        bootcamp_doc.id.clone(),
//!    );
//!
//!    // Persisting through the child-write helpers keeps `averageCost`
//!    // on the parent bootcamp up to date.
//!    let rule = CampdirAggregateRule::average_cost();
//!    create_child_obj::<_, Course>(&db, &rule, None, &course).await?;
//!
//!    // Translate raw query parameters into one safe read.
//!    let raw: CampdirRawQuery = [
//!        ("tuition[gte]", "500"),
//!        ("sort", "-tuition"),
//!        ("select", "title,tuition"),
//!        ("page", "1"),
//!        ("limit", "10"),
//!    ]
//!    .into_iter()
//!    .collect();
//!
//!    let listing = run_list_view(&db, "courses", &raw).await?;
//!    println!("{}", serde_json::to_string_pretty(&listing)?);
//!
//!    Ok(())
//!}
//! ```
//!
//! HTTP routing, authentication and geocoding are deliberately not here: this
//! crate ends at the storage facade and the query/aggregate semantics above.

#![allow(clippy::new_without_default)]
#![forbid(unsafe_code)]

pub mod errors;
mod campdir_value;
pub use campdir_value::*;

mod store;
pub use store::*;

mod query;
pub use query::*;

mod aggregates;
pub use aggregates::*;

mod memory;
pub use memory::*;

mod models;
pub use models::*;

use crate::errors::CampdirError;

pub type CampdirResult<T> = std::result::Result<T, CampdirError>;

mod campdir_document_functions;
pub use campdir_document_functions::*;
