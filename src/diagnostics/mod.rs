//! Operability diagnostics served at `/test`.

pub mod probe;
pub mod report;

pub use probe::{DatabaseConnection, DatabaseProbe, ProbeError, UnconfiguredProbe};
pub use report::{run_diagnostics, run_diagnostics_blocking, DiagnosticsReport};
