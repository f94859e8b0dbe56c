//! Catalog storage.
//!
//! The in-memory store backs development runs and tests; it owns flowers,
//! products, events and the two composition tables, and serves the read
//! interface the packaging planner consumes.

pub mod in_memory;

pub use in_memory::InMemoryCatalog;
