//! JSON configuration for the command-line runner.
//!
//! - `runtime`: search parameters and output locations.
//! - `event`: hits and view directions of one event.

pub mod event;
pub mod runtime;

pub use event::{load_event, EventInput};
pub use runtime::{load_config, OutputConfig, RuntimeConfig};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {what} {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse {what} {}: {e}", path.display()))
}
