use super::read_json;
use crate::geometry::ViewDirections;
use crate::types::Hit;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hits of one event together with the view geometry they were recorded in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventInput {
    pub directions: ViewDirections,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

pub fn load_event(path: &Path) -> Result<EventInput, String> {
    read_json(path, "event")
}
