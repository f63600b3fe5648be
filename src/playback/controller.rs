use crate::{
    diff::category::{CategoryAssignment, RoleAssignment},
    diff::engine::{diff_step, roles},
    encode::palette::{Palette, Theme},
    encode::style::{StyleMap, encode_step},
    foundation::core::{Canvas, Point, Vec2},
    foundation::error::VizResult,
    foundation::ids::EntityId,
    layout::force::ForceDirected,
    layout::store::{LayoutOpts, LayoutStore},
    playback::control::Control,
    playback::narration::{NarrationSession, Narrator},
    render::adapter::{DiagramAdapter, Scene, adapter_for, render_step},
    render::frame::Frame,
    render::surface::DrawSurface,
    render::svg::SvgSurface,
    trace::model::{DetailLevel, Step, StepTrace},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Player configuration. Every field is optional in JSON.
pub struct PlayerOpts {
    /// Initial theme.
    pub theme: Theme,
    /// Initial narration detail level.
    pub detail: DetailLevel,
    /// Drawing area.
    pub canvas: Canvas,
    /// Solver iterations run by each [`Player::tick`]. Zero disables relaxation.
    pub relax_iterations_per_tick: u32,
    /// Layout tuning.
    pub layout: LayoutOpts,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            detail: DetailLevel::Beginner,
            canvas: Canvas::default(),
            relax_iterations_per_tick: 4,
            layout: LayoutOpts::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Drag {
    id: EntityId,
    grab: Vec2,
}

/// Playback state machine over one trace.
///
/// Holds the step index, detail level and theme. Each transition that changes the step or the
/// detail level recomputes categories and styles, redraws the surface and issues exactly one
/// narration call. Transitions that clamp to the current step do nothing.
pub struct Player<S: DrawSurface = SvgSurface> {
    trace: StepTrace,
    opts: PlayerOpts,
    canvas: Canvas,
    adapter: Box<dyn DiagramAdapter>,
    solver: ForceDirected,
    layout: LayoutStore,
    narration: NarrationSession,
    surface: S,
    index: usize,
    detail: DetailLevel,
    theme: Theme,
    assignment: CategoryAssignment,
    roles: RoleAssignment,
    styles: StyleMap,
    frame: Frame,
    drag: Option<Drag>,
}

impl<S: DrawSurface> std::fmt::Debug for Player<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("algorithm", &self.trace.algorithm())
            .field("index", &self.index)
            .field("detail", &self.detail)
            .field("theme", &self.theme)
            .field("narration", &self.narration)
            .finish_non_exhaustive()
    }
}

impl<S: DrawSurface> Player<S> {
    /// Lay out the trace, draw step 0 on `surface` and narrate it.
    pub fn new(
        trace: StepTrace,
        opts: PlayerOpts,
        narrator: Box<dyn Narrator>,
        mut surface: S,
    ) -> VizResult<Self> {
        let canvas = Canvas::new(opts.canvas.width, opts.canvas.height)?;
        let adapter = adapter_for(&trace, canvas, &opts.layout);
        let mut layout = LayoutStore::new();
        layout.initialize(&trace.all_entities()?, adapter.layout_hint())?;

        let (index, detail, theme) = (0, opts.detail, opts.theme);
        let (assignment, roles, styles) = evaluate(&trace, index, theme)?;
        let frame = draw(
            adapter.as_ref(),
            &trace,
            index,
            &styles,
            &layout,
            canvas,
            theme,
            &mut surface,
        )?;
        tracing::debug!(
            algorithm = ?trace.algorithm(),
            steps = trace.len(),
            bodies = layout.len(),
            "player ready"
        );

        let mut player = Self {
            solver: ForceDirected::new(opts.layout.force),
            trace,
            opts,
            canvas,
            adapter,
            layout,
            narration: NarrationSession::new(narrator),
            surface,
            index,
            detail,
            theme,
            assignment,
            roles,
            styles,
            frame,
            drag: None,
        };
        player.narrate();
        Ok(player)
    }

    /// Advance one step. No-op at the last step.
    pub fn next(&mut self) -> VizResult<bool> {
        let target = (self.index + 1).min(self.trace.last_index());
        self.go_to(target)
    }

    /// Go back one step. No-op at step 0.
    pub fn prev(&mut self) -> VizResult<bool> {
        self.go_to(self.index.saturating_sub(1))
    }

    /// Jump to `index`, clamped to `[0, len - 1]`.
    #[tracing::instrument(skip(self), fields(from = self.index))]
    pub fn seek(&mut self, index: i64) -> VizResult<bool> {
        let last = self.trace.last_index() as i64;
        self.go_to(index.clamp(0, last) as usize)
    }

    /// Switch narration detail level, redraw and narrate the current step again.
    pub fn toggle_detail(&mut self) -> VizResult<()> {
        self.show(self.index, self.theme)?;
        self.detail = self.detail.toggled();
        self.narrate();
        Ok(())
    }

    /// Switch palette and redraw. Categories and narration are untouched.
    pub fn toggle_theme(&mut self) -> VizResult<()> {
        self.show(self.index, self.theme.toggled())
    }

    /// Forget every position, lay the diagram out from scratch and redraw.
    pub fn reset_layout(&mut self) -> VizResult<()> {
        self.drag = None;
        self.layout.reset();
        self.layout
            .initialize(&self.trace.all_entities()?, self.adapter.layout_hint())?;
        self.redraw()
    }

    /// Dispatch a UI control. Returns true if the step, detail level, theme or layout changed.
    pub fn apply(&mut self, control: Control) -> VizResult<bool> {
        match control {
            Control::Prev => self.prev(),
            Control::Next => self.next(),
            Control::Seek(i) => self.seek(i),
            Control::ToggleDetail => self.toggle_detail().map(|()| true),
            Control::ToggleTheme => self.toggle_theme().map(|()| true),
            Control::ResetLayout => self.reset_layout().map(|()| true),
        }
    }

    /// Grab the body under `at` and pin it. Returns the grabbed entity, if any.
    pub fn begin_drag(&mut self, at: Point) -> VizResult<Option<EntityId>> {
        let Some(id) = self.frame.hit_test(at).cloned() else {
            return Ok(None);
        };
        let pos = self.layout.get(&id)?;
        self.layout.pin(&id, pos)?;
        self.drag = Some(Drag {
            id: id.clone(),
            grab: at - pos,
        });
        tracing::debug!(%id, "drag started");
        Ok(Some(id))
    }

    /// Move the grabbed body so it follows the pointer. No-op without an active drag.
    pub fn drag_to(&mut self, at: Point) -> VizResult<()> {
        let Some(drag) = &self.drag else {
            return Ok(());
        };
        self.layout.pin(&drag.id, at - drag.grab)?;
        self.redraw()
    }

    /// Release the grabbed body. It keeps its position; relaxation may move it again.
    pub fn end_drag(&mut self) -> VizResult<()> {
        if let Some(drag) = self.drag.take() {
            self.layout.unpin(&drag.id)?;
            tracing::debug!(id = %drag.id, "drag ended");
        }
        Ok(())
    }

    /// One animation frame: a bounded number of solver iterations, then a redraw if anything
    /// moved. Returns whether anything moved.
    pub fn tick(&mut self) -> VizResult<bool> {
        let iterations = self.opts.relax_iterations_per_tick;
        if !self.adapter.relaxes() || iterations == 0 {
            return Ok(false);
        }
        let moved = self.layout.relax(
            &mut self.solver,
            &self.trace.links(),
            self.canvas.rect(),
            iterations,
        );
        if moved {
            self.redraw()?;
        }
        Ok(moved)
    }

    /// Trace being played.
    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }

    /// Current step index.
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// Current step.
    pub fn step(&self) -> VizResult<&Step> {
        self.trace.step(self.index)
    }

    /// Current detail level.
    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Categories of the current step.
    pub fn assignment(&self) -> &CategoryAssignment {
        &self.assignment
    }

    /// Roles of the current step.
    pub fn roles(&self) -> &RoleAssignment {
        &self.roles
    }

    /// Styles of the current step.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Last drawn frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Persistent positions.
    pub fn layout(&self) -> &LayoutStore {
        &self.layout
    }

    /// Narration session.
    pub fn narration(&self) -> &NarrationSession {
        &self.narration
    }

    /// Entity being dragged.
    pub fn dragging(&self) -> Option<&EntityId> {
        self.drag.as_ref().map(|d| &d.id)
    }

    /// Drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn go_to(&mut self, target: usize) -> VizResult<bool> {
        if target == self.index {
            return Ok(false);
        }
        tracing::debug!(from = self.index, to = target, "step change");
        self.show(target, self.theme)?;
        self.narrate();
        Ok(true)
    }

    /// Evaluate and draw `index` under `theme`. Player state changes only once both succeed.
    fn show(&mut self, index: usize, theme: Theme) -> VizResult<()> {
        let (assignment, roles, styles) = evaluate(&self.trace, index, theme)?;
        let frame = draw(
            self.adapter.as_ref(),
            &self.trace,
            index,
            &styles,
            &self.layout,
            self.canvas,
            theme,
            &mut self.surface,
        )?;
        self.index = index;
        self.theme = theme;
        self.assignment = assignment;
        self.roles = roles;
        self.styles = styles;
        self.frame = frame;
        Ok(())
    }

    fn redraw(&mut self) -> VizResult<()> {
        self.frame = draw(
            self.adapter.as_ref(),
            &self.trace,
            self.index,
            &self.styles,
            &self.layout,
            self.canvas,
            self.theme,
            &mut self.surface,
        )?;
        Ok(())
    }

    fn narrate(&mut self) {
        match self.trace.step(self.index) {
            Ok(step) => self.narration.say(step.action(self.detail)),
            Err(err) => tracing::warn!(error = %err, "no step to narrate"),
        }
    }
}

fn evaluate(
    trace: &StepTrace,
    index: usize,
    theme: Theme,
) -> VizResult<(CategoryAssignment, RoleAssignment, StyleMap)> {
    let assignment = diff_step(trace, index)?;
    let roles = roles(trace, index)?;
    let styles = encode_step(trace, index, &assignment, &roles, &Palette::for_theme(theme))?;
    Ok((assignment, roles, styles))
}

#[allow(clippy::too_many_arguments)]
fn draw(
    adapter: &dyn DiagramAdapter,
    trace: &StepTrace,
    index: usize,
    styles: &StyleMap,
    layout: &LayoutStore,
    canvas: Canvas,
    theme: Theme,
    surface: &mut dyn DrawSurface,
) -> VizResult<Frame> {
    let entities = trace.entities_at(index)?;
    let scene = Scene {
        trace,
        index,
        entities: &entities,
        styles,
        layout,
        canvas,
        background: Palette::for_theme(theme).background,
    };
    render_step(adapter, &scene, surface)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
