#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "control", content = "index", rename_all = "snake_case")]
/// User-facing playback control, for wiring buttons, keys and sliders to a player.
pub enum Control {
    /// Previous step.
    Prev,
    /// Next step.
    Next,
    /// Jump to a step; out-of-range values clamp.
    Seek(i64),
    /// Switch between beginner and advanced narration.
    ToggleDetail,
    /// Switch between light and dark palettes.
    ToggleTheme,
    /// Forget all positions and lay the diagram out again.
    ResetLayout,
}

#[cfg(test)]
#[path = "../../tests/unit/playback/control.rs"]
mod tests;
