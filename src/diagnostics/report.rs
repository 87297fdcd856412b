//! Backend and database reachability report for `/test`.
//!
//! Every probe failure is folded into a status string. Nothing here returns
//! an error to the caller.

use std::sync::Arc;

use serde::Serialize;

use crate::config::DatabaseConfig;
use crate::diagnostics::probe::{DatabaseProbe, ProbeError};

const MAX_ERROR_CHARS: usize = 50;
const MAX_COLLECTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".into(),
            database: "❌ Not Available".into(),
            database_url: String::new(),
            database_name: String::new(),
            connection_status: "Not Connected".into(),
            collections: Vec::new(),
        }
    }
}

/// Probe the database and describe what happened.
pub fn run_diagnostics(probe: &dyn DatabaseProbe, database: &DatabaseConfig) -> DiagnosticsReport {
    let mut report = DiagnosticsReport::default();

    match probe.connect() {
        Ok(Some(conn)) => {
            tracing::debug!(name = ?conn.name(), "Database connection opened");
            report.database = "✅ Available".into();
            report.connection_status = "Connected".into();
            match conn.list_collections() {
                Ok(mut collections) => {
                    collections.truncate(MAX_COLLECTIONS);
                    report.collections = collections;
                    report.database = "✅ Connected & Working".into();
                }
                Err(e) => {
                    report.database = format!("⚠️  Connected but Error: {}", truncate(&e));
                }
            }
        }
        Ok(None) => report.database = "⚠️  Available but not initialized".into(),
        Err(ProbeError::NotInstalled) => {
            report.database = "❌ Database module not found (run enable-database first)".into();
        }
        Err(e) => report.database = format!("❌ Error: {}", truncate(&e)),
    }

    report.database_url = presence(database.url.is_some());
    report.database_name = presence(database.name.is_some());
    report
}

/// Run [`run_diagnostics`] on the blocking pool. A panicking probe is
/// reported, not propagated.
pub async fn run_diagnostics_blocking(
    probe: Arc<dyn DatabaseProbe>,
    database: DatabaseConfig,
) -> DiagnosticsReport {
    let fallback = database.clone();
    match tokio::task::spawn_blocking(move || run_diagnostics(probe.as_ref(), &database)).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Database probe task failed");
            DiagnosticsReport {
                database: format!("❌ Error: {}", truncate(&e)),
                database_url: presence(fallback.url.is_some()),
                database_name: presence(fallback.name.is_some()),
                ..DiagnosticsReport::default()
            }
        }
    }
}

fn presence(set: bool) -> String {
    let status = if set { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

fn truncate(error: &impl ToString) -> String {
    error.to_string().chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::probe::{DatabaseConnection, UnconfiguredProbe};

    struct FakeConnection {
        collections: Result<Vec<String>, ProbeError>,
    }

    impl DatabaseConnection for FakeConnection {
        fn name(&self) -> Option<String> {
            Some("shop".into())
        }

        fn list_collections(&self) -> Result<Vec<String>, ProbeError> {
            self.collections.clone()
        }
    }

    enum FakeProbe {
        Connected(Result<Vec<String>, ProbeError>),
        Uninitialized,
        Failing(String),
        Panicking,
    }

    impl DatabaseProbe for FakeProbe {
        fn connect(&self) -> Result<Option<Box<dyn DatabaseConnection>>, ProbeError> {
            match self {
                FakeProbe::Connected(collections) => Ok(Some(Box::new(FakeConnection {
                    collections: collections.clone(),
                }))),
                FakeProbe::Uninitialized => Ok(None),
                FakeProbe::Failing(msg) => Err(ProbeError::Backend(msg.clone())),
                FakeProbe::Panicking => panic!("driver exploded"),
            }
        }
    }

    #[test]
    fn test_unconfigured_probe() {
        let report = run_diagnostics(&UnconfiguredProbe, &DatabaseConfig::default());
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Database module not found (run enable-database first)");
        assert_eq!(report.connection_status, "Not Connected");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn test_connected_and_working_caps_collections() {
        let names: Vec<String> = (0..15).map(|i| format!("c{i}")).collect();
        let database = DatabaseConfig {
            url: Some("mongodb://db".into()),
            name: Some("shop".into()),
        };
        let report = run_diagnostics(&FakeProbe::Connected(Ok(names)), &database);
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), 10);
        assert_eq!(report.collections[9], "c9");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "✅ Set");
    }

    #[test]
    fn test_connected_but_listing_fails() {
        let probe = FakeProbe::Connected(Err(ProbeError::Backend("x".repeat(80))));
        let report = run_diagnostics(&probe, &DatabaseConfig::default());
        assert_eq!(report.database, format!("⚠️  Connected but Error: {}", "x".repeat(50)));
        assert_eq!(report.connection_status, "Connected");
    }

    #[test]
    fn test_uninitialized_and_failing() {
        let report = run_diagnostics(&FakeProbe::Uninitialized, &DatabaseConfig::default());
        assert_eq!(report.database, "⚠️  Available but not initialized");

        let report = run_diagnostics(&FakeProbe::Failing("connection refused".into()), &DatabaseConfig::default());
        assert_eq!(report.database, "❌ Error: connection refused");
        assert_eq!(report.connection_status, "Not Connected");
    }

    #[tokio::test]
    async fn test_panicking_probe_is_reported() {
        let database = DatabaseConfig {
            url: Some("mongodb://db".into()),
            name: None,
        };
        let report = run_diagnostics_blocking(Arc::new(FakeProbe::Panicking), database).await;
        assert!(report.database.starts_with("❌ Error: "));
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "❌ Not Set");
    }
}
