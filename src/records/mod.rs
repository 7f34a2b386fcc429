//! Loading of the two tabular exports.
//!
//! Both sources are headerless, comma-separated and addressed purely by
//! column position.

mod loader;

pub use loader::{load_edges, load_projects, parse_edges, parse_projects};
