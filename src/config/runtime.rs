use super::read_json;
use crate::VertexParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Report with the vertex and the search trace.
    pub result_json: PathBuf,
    /// When set, heat maps of both passes are written here as PNGs.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Event file with hits and view directions.
    pub input: PathBuf,
    #[serde(default)]
    pub params: VertexParams,
    pub output: OutputConfig,
}

impl RuntimeConfig {
    /// Parameters with heat-map retention switched on when dumps are requested.
    pub fn effective_params(&self) -> VertexParams {
        let mut params = self.params.clone();
        params.keep_heatmaps |= self.output.debug_dir.is_some();
        params
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    read_json(path, "config")
}
