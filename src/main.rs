use quad_vertex::config::{load_config, load_event};
use quad_vertex::io::{dump_heatmaps, write_json_file};
use quad_vertex::VertexFinder;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let event = load_event(&config.input)?;

    let finder = VertexFinder::new(config.effective_params());
    let report = finder.find_with_diagnostics(&event.hits, &event.directions);

    write_json_file(&config.output.result_json, &report)?;
    if let Some(dir) = &config.output.debug_dir {
        dump_heatmaps(&report.trace, dir)?;
    }

    println!("{}", report.trace.summary());
    match report.result.vertex {
        Some(v) => println!("vertex: drift={:.3} y={:.3} z={:.3}", v.x, v.y, v.z),
        None => println!("vertex: none"),
    }
    println!("report saved to {}", config.output.result_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: quad-vertex <config.json>".to_string()
}
