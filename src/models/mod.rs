//! Directory entities: the documents this system actually stores. The
//! query-translation and aggregate layers are schema-agnostic; these types
//! give callers (and the tests) the concrete shapes, field names and
//! defaults of the directory's collections.

mod bootcamp;
pub use bootcamp::*;

mod course;
pub use course::*;

mod review;
pub use review::*;
