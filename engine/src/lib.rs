//! Branching wizard state machine for Herbwise.
//!
//! The wizard walks a bounded step sequence whose length is fixed by the
//! question configuration: category selection, sub-goal selection, one step
//! per personal question, then a terminal confirmation that snapshots
//! everything into an immutable [`herbwise_types::Report`].
//!
//! All transitions are client-local and synchronous; the only failure mode
//! is calling an operation at the wrong step or with a value outside the
//! configured tables, which surfaces as a [`WizardError`] rather than a
//! panic.

mod wizard;

pub use wizard::{Wizard, WizardError, WizardStep};
