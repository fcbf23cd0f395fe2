// src/wizard/mod.rs
//! Wizard step state machine.
//!
//! All progress lives in one [`WizardState`] value. [`transition()`] is a
//! pure function from `(state, event)` to an outcome; anything asynchronous
//! or outward-facing is handed back as an [`Effect`] for the caller to run.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

pub use effect::{ConceptRequest, Effect};
pub use event::Event;
pub use state::{CustomizeTarget, Step, WizardState};
pub use transition::transition;
