// Workflow layer - the complaint lifecycle state machine
//
// `role_gate` answers who may do what, `engine` validates and applies
// status transitions, `timeline` is the read-side projection of history.
pub mod engine;
pub mod role_gate;
pub mod timeline;

pub use engine::TransitionEngine;
