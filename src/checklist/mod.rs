// Work Order Checklist - four-stage technician procedure
//
// The state machine owns stage progression; the session wraps it with the
// view-local concerns of the detail screen (panels, lock checks, closeout).

pub mod session;
pub mod state_machine;

#[cfg(test)]
pub mod tests;

pub use session::{ChecklistError, ChecklistSession, IndicatorMode, Notice, StageState, StageView};
pub use state_machine::{Checklist, ChecklistEvent, ChecklistStage, Closeout, Progress};
