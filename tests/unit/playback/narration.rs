use super::*;
use crate::VizError;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Script {
    log: Rc<RefCell<Vec<String>>>,
    fail_speak: bool,
}

impl Narrator for Script {
    fn speak(&mut self, text: &str) -> VizResult<()> {
        if self.fail_speak {
            return Err(VizError::narration("speech engine unavailable"));
        }
        self.log.borrow_mut().push(format!("speak {text}"));
        Ok(())
    }

    fn stop(&mut self) -> VizResult<()> {
        self.log.borrow_mut().push("stop".to_owned());
        Ok(())
    }
}

#[test]
fn each_say_cancels_the_previous_utterance() {
    let script = Script::default();
    let log = script.log.clone();
    let mut session = NarrationSession::new(Box::new(script));

    session.say("one");
    session.say("two");
    session.say("three");

    assert_eq!(
        *log.borrow(),
        vec!["speak one", "stop", "speak two", "stop", "speak three"]
    );
    assert!(session.is_active());
    assert_eq!(session.spoken(), 3);
}

#[test]
fn cancel_without_active_utterance_does_not_call_stop() {
    let script = Script::default();
    let log = script.log.clone();
    let mut session = NarrationSession::new(Box::new(script));
    session.cancel();
    assert!(log.borrow().is_empty());
}

#[test]
fn failures_are_swallowed() {
    let script = Script {
        fail_speak: true,
        ..Script::default()
    };
    let mut session = NarrationSession::new(Box::new(script));
    session.say("lost");
    session.say("also lost");
    assert_eq!(session.failures(), 2);
    assert_eq!(session.spoken(), 0);
    assert!(!session.is_active());
}

#[test]
fn built_in_narrators_never_fail() {
    let mut session = NarrationSession::new(Box::new(LogNarrator));
    session.say("hello");
    let mut silent = NarrationSession::new(Box::new(SilentNarrator));
    silent.say("hello");
    assert_eq!(session.failures() + silent.failures(), 0);
}
