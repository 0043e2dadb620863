//! CLI command implementations.

pub mod check;
pub mod run;
pub mod seen;

pub use check::CheckCommand;
pub use run::{RunCommand, RunReport, SourceFailure};
pub use seen::SeenCommand;
