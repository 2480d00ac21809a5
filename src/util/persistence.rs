//! On-disk storage for the marketplace fee schedule: one JSON file in the
//! platform config directory, with the built-in defaults as the fallback
//! when it is absent or unreadable.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::FeeSchedule;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ListingInsights";
const APP_NAME: &str = "ListingInsights";

fn fee_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("fees.json"))
}

/// Loads the stored fee schedule. `None` means "use the defaults": either
/// nothing was saved yet or the file could not be read back.
pub fn load_fee_schedule() -> Option<FeeSchedule> {
    let path = fee_file()?;
    let data = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(fees) => Some(fees),
        Err(err) => {
            log::warn!("ignoring unreadable fee schedule at {}: {err}", path.display());
            None
        }
    }
}

pub fn save_fee_schedule(fees: &FeeSchedule) -> Result<(), PersistSaveError> {
    let path = fee_file().ok_or(PersistSaveError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(fees)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
