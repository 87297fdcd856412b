//! Database probe seam.
//!
//! No database driver ships with the backend. Deployments that have one
//! implement [`DatabaseProbe`] and hand it to the server.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// No driver is wired into this build.
    #[error("database module not installed")]
    NotInstalled,
    #[error("{0}")]
    Backend(String),
}

/// An open database handle.
pub trait DatabaseConnection: Send {
    /// Database name, when the driver knows it.
    fn name(&self) -> Option<String>;

    fn list_collections(&self) -> Result<Vec<String>, ProbeError>;
}

/// Opens a connection on demand. `Ok(None)` means a driver is present but
/// not initialized.
pub trait DatabaseProbe: Send + Sync {
    fn connect(&self) -> Result<Option<Box<dyn DatabaseConnection>>, ProbeError>;
}

/// The default probe: reports that no driver is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredProbe;

impl DatabaseProbe for UnconfiguredProbe {
    fn connect(&self) -> Result<Option<Box<dyn DatabaseConnection>>, ProbeError> {
        Err(ProbeError::NotInstalled)
    }
}
