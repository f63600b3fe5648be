//! Diagram drawing.
//!
//! Adapters turn styled entities into [`frame::Frame`]s. Frames are presented to a retained
//! [`surface::DrawSurface`], which updates only what changed.

/// Adapter trait and the shared per-step driving loop.
pub mod adapter;
/// Bar-chart adapter for array families.
pub mod bars;
/// Drawable frame model.
pub mod frame;
/// Node-link adapter for graph families.
pub mod graph;
/// Box-and-arrow adapter for linked lists.
pub mod list;
/// SVG to RGBA rasterization.
pub mod raster;
/// Retained drawing surface trait.
pub mod surface;
/// In-memory SVG surface.
pub mod svg;
/// Recursion-tree adapter for merge sort.
pub mod tree;
