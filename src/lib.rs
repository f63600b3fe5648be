//! stepviz plays back recorded algorithm traces as annotated diagrams.
//!
//! A trace is an ordered list of steps, each carrying a typed snapshot of algorithm state and
//! narration text. For the current step the engine:
//!
//! - Diffs it against its predecessor into semantic categories ([`diff_step`])
//! - Maps categories to colors through a per-family table and a theme ([`encode_step`])
//! - Draws the diagram at stable, draggable positions ([`render_step`])
//! - Narrates the step at the chosen detail level
//!
//! [`Player`] ties these together behind next/prev/seek controls.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Per-step semantic categories.
pub mod diff;
/// Category to style encoding.
pub mod encode;
/// Persistent layout.
pub mod layout;
/// Interactive playback.
pub mod playback;
/// Diagram drawing.
pub mod render;
/// Step-trace model.
pub mod trace;

pub use crate::foundation::core::{Canvas, Color, Point, Rect, Vec2};
pub use crate::foundation::error::{VizError, VizResult};
pub use crate::foundation::ids::EntityId;

pub use crate::diff::category::{
    Category, CategoryAssignment, CategoryTag, Provenance, RoleAssignment, StaticRole, UpdatedKey,
};
pub use crate::diff::engine::{diff_step, roles};
pub use crate::encode::family::FamilyConfig;
pub use crate::encode::palette::{Palette, Theme};
pub use crate::encode::style::{Style, StyleMap, encode_step, encode_style};
pub use crate::layout::force::{ForceDirected, ForceOpts, LayoutSolver};
pub use crate::layout::store::{LayoutHint, LayoutOpts, LayoutStore, Placement};
pub use crate::playback::control::Control;
pub use crate::playback::controller::{Player, PlayerOpts};
pub use crate::playback::narration::{LogNarrator, NarrationSession, Narrator, SilentNarrator};
pub use crate::render::adapter::{DiagramAdapter, Scene, adapter_for, build_frame, render_step};
pub use crate::render::frame::{Element, Frame, Shape};
pub use crate::render::raster::{FrameRGBA, rasterize_svg};
pub use crate::render::surface::{DrawSurface, PresentStats, present};
pub use crate::render::svg::SvgSurface;
pub use crate::trace::dsl::TraceBuilder;
pub use crate::trace::model::{
    Algorithm, DetailLevel, Diagram, EdgeDef, Family, ListNodeDef, Step, StepTrace, TraceInput,
};
pub use crate::trace::state::{
    Distance, GraphSearchState, ListState, MatrixState, SearchState, ShortestPathState,
    SortState, SpanningTreeState, StepState,
};
