//! File output for the runner.
//!
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `save_heatmap_png`: render a heat map as an 8-bit grayscale PNG.
//! - `dump_heatmaps`: write the retained maps of both passes.
use crate::diagnostics::{PassStage, SearchTrace};
use crate::heatmap::HeatMap;
use image::{GrayImage, ImageBuffer};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Save a heat map as a grayscale PNG scaled so its maximum is white.
///
/// Rows follow the transverse axis and columns the drift axis.
pub fn save_heatmap_png(hm: &HeatMap, path: &Path) -> Result<(), String> {
    if hm.is_empty() {
        return Err(format!("Refusing to save empty heat map to {}", path.display()));
    }
    ensure_parent_dir(path)?;
    let max = hm.max_weight();
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    let pixels: Vec<u8> = hm
        .as_slice()
        .iter()
        .map(|&w| (w * scale).clamp(0.0, 255.0) as u8)
        .collect();
    let out: GrayImage = ImageBuffer::from_raw(hm.nx as u32, hm.nz as u32, pixels)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Writes `view{n}_coarse.png` and `view{n}_zoom.png` for every retained map.
///
/// Returns the written paths; passes without maps are skipped.
pub fn dump_heatmaps(trace: &SearchTrace, dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut written = Vec::new();
    for (label, pass) in [("coarse", &trace.coarse), ("zoom", &trace.zoom)] {
        let Some(maps) = pass.as_ref().and_then(|p: &PassStage| p.maps.as_ref()) else {
            continue;
        };
        for (k, hm) in maps.iter().enumerate() {
            if hm.is_empty() {
                continue;
            }
            let path = dir.join(format!("view{k}_{label}.png"));
            save_heatmap_png(hm, &path)?;
            written.push(path);
        }
    }
    info!("wrote {} heat map images to {}", written.len(), dir.display());
    Ok(written)
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quad-vertex-io-{}-{name}", std::process::id()))
    }

    #[test]
    fn heatmap_png_has_map_dimensions() {
        let mut hm = HeatMap::new(6, 0.0, 6.0, 4, 0.0, 4.0);
        hm.fill(2.5, 1.5, 3.0);
        hm.fill(4.5, 3.5, 1.5);
        let dir = scratch_dir("png");
        let path = dir.join("nested/map.png");
        save_heatmap_png(&hm, &path).expect("save");
        let img = image::open(&path).expect("open").into_luma8();
        assert_eq!(img.dimensions(), (4, 6));
        assert_eq!(img.get_pixel(1, 2)[0], 255);
        assert_eq!(img.get_pixel(3, 4)[0], 127);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn empty_heatmap_is_not_saved() {
        let hm = HeatMap::new(0, 0.0, 0.0, 0, 0.0, 0.0);
        assert!(save_heatmap_png(&hm, &scratch_dir("empty").join("x.png")).is_err());
    }

    #[test]
    fn json_is_written_with_parent_dirs() {
        let dir = scratch_dir("json");
        let path = dir.join("a/b/out.json");
        write_json_file(&path, &vec![1, 2, 3]).expect("write");
        let text = fs::read_to_string(&path).expect("read");
        let back: Vec<i32> = serde_json::from_str(&text).expect("parse");
        assert_eq!(back, vec![1, 2, 3]);
        let _ = fs::remove_dir_all(dir);
    }
}
