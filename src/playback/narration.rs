use crate::foundation::error::VizResult;

/// Speech collaborator. Implementations may fail; failures never stop playback.
pub trait Narrator {
    /// Start speaking `text`.
    fn speak(&mut self, text: &str) -> VizResult<()>;

    /// Interrupt the current utterance, if any.
    fn stop(&mut self) -> VizResult<()>;
}

/// Narrator that says nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str) -> VizResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> VizResult<()> {
        Ok(())
    }
}

/// Narrator that emits each utterance as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNarrator;

impl Narrator for LogNarrator {
    fn speak(&mut self, text: &str) -> VizResult<()> {
        tracing::info!(target: "stepviz::narration", text, "speak");
        Ok(())
    }

    fn stop(&mut self) -> VizResult<()> {
        tracing::debug!(target: "stepviz::narration", "stop");
        Ok(())
    }
}

/// Owns the narrator and guarantees at most one active utterance.
///
/// Every [`NarrationSession::say`] cancels the running utterance before starting the next one.
/// Narrator errors are logged and swallowed.
pub struct NarrationSession {
    narrator: Box<dyn Narrator>,
    active: bool,
    spoken: u64,
    failures: u64,
}

impl std::fmt::Debug for NarrationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationSession")
            .field("active", &self.active)
            .field("spoken", &self.spoken)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

impl NarrationSession {
    /// Session over `narrator`.
    pub fn new(narrator: Box<dyn Narrator>) -> Self {
        Self {
            narrator,
            active: false,
            spoken: 0,
            failures: 0,
        }
    }

    /// Cancel any running utterance, then speak `text`.
    pub fn say(&mut self, text: &str) {
        self.cancel();
        match self.narrator.speak(text) {
            Ok(()) => {
                self.active = true;
                self.spoken += 1;
            }
            Err(err) => {
                self.failures += 1;
                tracing::warn!(error = %err, "narration failed; continuing without speech");
            }
        }
    }

    /// Stop the running utterance, if any.
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        tracing::debug!("narration cancelled");
        if let Err(err) = self.narrator.stop() {
            self.failures += 1;
            tracing::warn!(error = %err, "stopping narration failed");
        }
    }

    /// True while an utterance started by this session has not been cancelled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Utterances started successfully.
    pub fn spoken(&self) -> u64 {
        self.spoken
    }

    /// Narrator calls that failed.
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/narration.rs"]
mod tests;
