use chrono::NaiveDate;
use loan_advisor::workflows::mortgage::{CatalogError, ProgramCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads a CSV catalog when a path is configured, otherwise the built-in programs.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ProgramCatalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = ProgramCatalog::from_path(path)?;
            info!(path = %path.display(), programs = catalog.len(), "loaded program catalog");
            Ok(catalog)
        }
        None => Ok(ProgramCatalog::standard()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
