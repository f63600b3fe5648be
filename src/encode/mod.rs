//! Category to style encoding.

/// Per-family category tables.
pub mod family;
/// Theme palettes.
pub mod palette;
/// Style resolution.
pub mod style;
