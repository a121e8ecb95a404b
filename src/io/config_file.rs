//! Batch configuration file loading
//!
//! The configuration is a JSON document mirroring [`BatchConfig`]:
//!
//! ```json
//! {
//!   "effective_date": "2024-03-15",
//!   "file_creation": "2024-03-14T09:30:00",
//!   "company_name": "Acme Rentals",
//!   "company_id": "1234567890",
//!   "entry_description": "RENT",
//!   "destination_routing": "091000019",
//!   "destination_name": "First National Bank",
//!   "origin_id": "123456789",
//!   "origin_name": "Acme Rentals LLC",
//!   "originating_dfi_id": "09100001"
//! }
//! ```

use crate::types::{AchError, BatchConfig};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load and validate a batch configuration file
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `ConfigParse` if it is not a valid
/// configuration document, and `InvalidConfig` if a field has the wrong shape.
pub fn load_batch_config(path: &Path) -> Result<BatchConfig, AchError> {
    let content = fs::read_to_string(path).map_err(|e| AchError::Io {
        message: format!("Failed to read config '{}': {}", path.display(), e),
    })?;

    let config: BatchConfig = serde_json::from_str(&content)?;
    config.validate()?;

    debug!(
        company_id = %config.company_id,
        effective_date = %config.effective_date,
        "Loaded batch configuration from {}",
        path.display()
    );
    Ok(config)
}
