//! Desk configuration.
//!
//! Loaded from an optional data directory:
//!   {data_dir}/desk.json      storage path, autosave interval, report dir
//!   {data_dir}/services.json  price list override
//! Missing files mean defaults. Malformed files are an error.
//! In tests, use DeskConfig::default_test().

use crate::{
    autosave::DEFAULT_AUTOSAVE_INTERVAL,
    catalog::{ServiceCatalog, ServiceEntry},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STORAGE_PATH: &str = "carwash.db";

#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub storage_path: String,
    pub autosave_interval: Duration,
    pub report_dir: PathBuf,
    pub catalog: ServiceCatalog,
}

#[derive(Debug, Default, Deserialize)]
struct DeskFile {
    storage_path: Option<String>,
    autosave_secs: Option<u64>,
    report_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ServicesFile {
    services: Vec<ServiceEntry>,
}

impl DeskConfig {
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        let desk_path = Path::new(data_dir).join("desk.json");
        if let Some(content) = read_optional(&desk_path)? {
            let file: DeskFile = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", desk_path.display()))?;
            if let Some(path) = file.storage_path {
                config.storage_path = path;
            }
            if let Some(secs) = file.autosave_secs {
                anyhow::ensure!(secs > 0, "autosave_secs must be positive");
                config.autosave_interval = Duration::from_secs(secs);
            }
            if let Some(dir) = file.report_dir {
                config.report_dir = dir;
            }
        }

        let services_path = Path::new(data_dir).join("services.json");
        if let Some(content) = read_optional(&services_path)? {
            let file: ServicesFile = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", services_path.display()))?;
            config.catalog = ServiceCatalog::from_entries(file.services)?;
            log::info!(
                "loaded {} services from {}",
                config.catalog.len(),
                services_path.display()
            );
        }
        Ok(config)
    }

    /// In-memory storage, one-second autosave, standard prices.
    pub fn default_test() -> Self {
        Self {
            storage_path: ":memory:".into(),
            autosave_interval: Duration::from_secs(1),
            report_dir: std::env::temp_dir(),
            catalog: ServiceCatalog::standard(),
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            storage_path: DEFAULT_STORAGE_PATH.into(),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            report_dir: PathBuf::from("."),
            catalog: ServiceCatalog::standard(),
        }
    }
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::anyhow!("Cannot read {}: {e}", path.display())),
    }
}
