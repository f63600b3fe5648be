use crate::{
    foundation::error::{VizError, VizResult},
    trace::model::{Algorithm, Diagram, StepTrace, TraceInput},
    trace::schema::{StepDef, TraceDef},
};

/// Programmatic trace construction, validated on [`TraceBuilder::build`].
///
/// Step numbers are assigned in push order starting at 1.
pub struct TraceBuilder {
    algorithm: Algorithm,
    diagram: Option<Diagram>,
    title: Option<String>,
    input: TraceInput,
    steps: Vec<StepDef>,
}

impl TraceBuilder {
    /// Start a trace for `algorithm` with an empty input.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            diagram: None,
            title: None,
            input: TraceInput::default(),
            steps: Vec::new(),
        }
    }

    /// Override the default diagram.
    pub fn diagram(mut self, diagram: Diagram) -> Self {
        self.diagram = Some(diagram);
        self
    }

    /// Display title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the problem instance.
    pub fn input(mut self, input: TraceInput) -> Self {
        self.input = input;
        self
    }

    /// Append a step with beginner/advanced narration and a serializable state.
    pub fn step(
        self,
        beginner: impl Into<String>,
        advanced: impl Into<String>,
        state: impl serde::Serialize,
    ) -> VizResult<Self> {
        self.step_with_suggestion(beginner, advanced, state, serde_json::Value::Null)
    }

    /// Append a step carrying a next-suggestion hint (label, index or `[lo, hi]`).
    pub fn step_with_suggestion(
        mut self,
        beginner: impl Into<String>,
        advanced: impl Into<String>,
        state: impl serde::Serialize,
        next_suggestion: serde_json::Value,
    ) -> VizResult<Self> {
        let state = serde_json::to_value(state).map_err(|e| VizError::serde(e.to_string()))?;
        let step_number = i64::try_from(self.steps.len() + 1)
            .map_err(|_| VizError::schema("too many steps"))?;
        self.steps.push(StepDef {
            step_number,
            actions: vec![beginner.into(), advanced.into()],
            state,
            next_suggestion,
        });
        Ok(self)
    }

    /// Validate and freeze the trace.
    pub fn build(self) -> VizResult<StepTrace> {
        StepTrace::from_def(TraceDef {
            algorithm: self.algorithm,
            diagram: self.diagram,
            title: self.title,
            input: self.input,
            steps: self.steps,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/dsl.rs"]
mod tests;
