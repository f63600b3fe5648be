//! Per-step semantic categories.
//!
//! The engine compares a step with its predecessor and tags every drawn entity with the
//! categories that explain what happened. Categories carry no color.

/// Category vocabulary and assignments.
pub mod category;
/// Category inference for every algorithm family.
pub mod engine;
