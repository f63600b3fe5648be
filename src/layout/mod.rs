//! Persistent entity positions and the force solver that relaxes them.

/// Force-directed solver.
pub mod force;
/// Id-keyed position store.
pub mod store;
