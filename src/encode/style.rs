use std::collections::BTreeMap;

use crate::{
    diff::category::{Category, CategoryAssignment, Provenance, RoleAssignment, StaticRole},
    encode::family::FamilyConfig,
    encode::palette::Palette,
    foundation::core::Color,
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    trace::model::StepTrace,
};

use Category as C;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Resolved look of one entity at one step.
///
/// Fill and stroke are independent channels. Categories paint the fill of bodies; the
/// next-suggestion hint and inferred updates paint the stroke.
pub struct Style {
    /// Body fill. Transparent for connectors.
    pub fill: Color,
    /// Outline for bodies, line color for connectors.
    pub stroke: Color,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Dashed stroke, used for inferred changes.
    pub dashed: bool,
    /// Role caption drawn next to the entity.
    pub label: Option<&'static str>,
    /// Overall opacity in `[0, 1]`.
    pub opacity: f64,
}

const BODY_STROKE: f64 = 1.5;
const EDGE_STROKE: f64 = 2.0;
const STRONG_STROKE: f64 = 3.5;
const NEXT_STROKE: f64 = 4.0;
const DIMMED_OPACITY: f64 = 0.45;

/// Style for `entity` given its categories, role and next-suggestion flag.
///
/// Fails with [`VizError::UnstyledCategory`] when the entity has no category, carries one
/// outside its family's vocabulary, or holds a role the family does not define.
pub fn encode_style(
    entity: &EntityId,
    assignment: &CategoryAssignment,
    role: Option<StaticRole>,
    is_next: bool,
    palette: &Palette,
) -> VizResult<Style> {
    let cfg = FamilyConfig::for_family(assignment.family());
    let tags = assignment.tags(entity);
    if tags.is_empty() {
        return Err(VizError::unstyled(cfg.family, format!("<none> on {entity}")));
    }
    if let Some(bad) = tags.iter().find(|t| !cfg.allows(t.category)) {
        return Err(VizError::unstyled(cfg.family, bad.category));
    }
    if let Some(r) = role
        && !cfg.allows_role(r)
    {
        return Err(VizError::unstyled(cfg.family, r));
    }

    let primary = tags
        .iter()
        .filter_map(|t| cfg.rank(t.category).map(|rank| (rank, t.category)))
        .min()
        .map(|(_, c)| c)
        .ok_or_else(|| VizError::unstyled(cfg.family, format!("no fill category on {entity}")))?;
    let inferred = tags.iter().any(|t| {
        t.provenance == Provenance::Inferred || cfg.overlays.contains(&t.category)
    });

    let mut style = if entity.is_connector() {
        connector_style(primary, palette)
    } else {
        body_style(primary, palette)
    };

    if let Some(r) = role {
        style.label = Some(r.name());
        if cfg.role_fill && !entity.is_connector() && !cfg.role_yields_to.contains(&primary) {
            style.fill = role_fill(r, palette);
            style.opacity = 1.0;
        }
    }
    if inferred {
        style.dashed = true;
        style.stroke = palette.updated;
        style.stroke_width = style.stroke_width.max(3.0);
    }
    if is_next {
        style.stroke = palette.next;
        style.stroke_width = NEXT_STROKE;
    }
    Ok(style)
}

/// Resolved styles keyed by entity.
pub type StyleMap = BTreeMap<EntityId, Style>;

/// Styles for every entity drawn at step `index`.
pub fn encode_step(
    trace: &StepTrace,
    index: usize,
    assignment: &CategoryAssignment,
    roles: &RoleAssignment,
    palette: &Palette,
) -> VizResult<StyleMap> {
    let next = trace.step(index)?.next_suggestion.as_ref();
    trace
        .entities_at(index)?
        .into_iter()
        .map(|id| {
            let style = encode_style(&id, assignment, roles.get(&id), next == Some(&id), palette)?;
            Ok((id, style))
        })
        .collect()
}

fn body_style(category: Category, p: &Palette) -> Style {
    let (fill, opacity) = match category {
        C::Visited | C::Settled | C::InTree => (p.done, 1.0),
        C::Frontier | C::Candidate | C::InWindow => (p.frontier, 1.0),
        C::Current | C::RelaxedEndpoint | C::Active | C::Working => (p.current, 1.0),
        C::Comparing => (p.compare, 1.0),
        C::Swapped => (p.swap, 1.0),
        C::Sorted | C::Merged => (p.sorted, 1.0),
        C::Found => (p.found, 1.0),
        C::Inactive | C::Eliminated => (p.dimmed, DIMMED_OPACITY),
        C::Unvisited | C::Unsettled | C::Unsorted | C::Pending | C::Idle => (p.neutral, 1.0),
        C::JustUpdated => (p.updated, 1.0),
        C::TreeEdge | C::PathEdge | C::CurrentEdge | C::MstEdge | C::CandidateEdge => {
            (p.neutral, 1.0)
        }
    };
    Style {
        fill,
        stroke: p.outline,
        stroke_width: BODY_STROKE,
        dashed: false,
        label: None,
        opacity,
    }
}

fn connector_style(category: Category, p: &Palette) -> Style {
    let (stroke, stroke_width) = match category {
        C::TreeEdge | C::PathEdge | C::MstEdge | C::Merged => (p.edge_strong, STRONG_STROKE),
        C::CurrentEdge | C::CandidateEdge | C::Working => (p.edge_active, STRONG_STROKE),
        _ => (p.edge, EDGE_STROKE),
    };
    Style {
        fill: Color::TRANSPARENT,
        stroke,
        stroke_width,
        dashed: false,
        label: None,
        opacity: 1.0,
    }
}

fn role_fill(role: StaticRole, p: &Palette) -> Color {
    match role {
        StaticRole::Low | StaticRole::High => p.bound,
        StaticRole::Pivot
        | StaticRole::Key
        | StaticRole::Min
        | StaticRole::Mid
        | StaticRole::Via
        | StaticRole::Head
        | StaticRole::Start => p.role,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/style.rs"]
mod tests;
