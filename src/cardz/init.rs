use crate::api::{CardzApi, CardzPaths};
use crate::config::CardzConfig;
use crate::error::{CardzError, Result};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "CARDZ_DATA";

pub struct CardzContext {
    pub api: CardzApi<FsBackend>,
    pub config: CardzConfig,
}

/// Picks the data directory: explicit flag, then `CARDZ_DATA`, then the OS data dir.
pub fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "cardz", "cardz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CardzError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(explicit_data_dir: Option<PathBuf>) -> Result<CardzContext> {
    let data = data_dir(explicit_data_dir)?;
    log::debug!("data directory: {}", data.display());

    let config = match CardzConfig::load(&data) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring unreadable config: {}", e);
            CardzConfig::default()
        }
    };
    let backend = FsBackend::new(data.clone());
    let api = CardzApi::new(backend, CardzPaths { data });
    Ok(CardzContext { api, config })
}
