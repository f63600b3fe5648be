//! Interactive playback: navigation, narration and drag handling.

/// UI control vocabulary.
pub mod control;
/// Player state machine.
pub mod controller;
/// Speech collaborator and session.
pub mod narration;
