//! Headless testing support: recording collaborators and snapshot helpers.
//!
//! Drive a [`Context`](crate::context::Context) with a [`ScriptedInput`] and a
//! [`RecordingPainter`], then turn the painter's command log into text with
//! [`commands_to_string`] for snapshot-style assertions.

pub mod recorder;
pub mod snapshot;

pub use recorder::{PaintCommand, RecordingPainter, ScriptedInput};
pub use snapshot::{commands_to_string, draws_to_string};
