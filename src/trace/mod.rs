//! Step traces: the input model, its per-family state, validation and a builder.

/// Builder for assembling traces in code.
pub mod dsl;
mod entities;
/// Trace, step and input types.
pub mod model;
pub(crate) mod schema;
/// Per-family step state.
pub mod state;
