//! Builds a bridge model and writes it to STEP and native files.
//!
//! ```text
//! steelspan [params.json] [output-stem]
//! ```
//!
//! Without a parameter file the default bridge is built. Output goes to
//! `<output-stem>.step` and `<output-stem>.brep`, `bridge_model` by default.

use std::path::PathBuf;

use steelspan::export::{export_compound, ExportFormat};
use steelspan::{BridgeAssembly, BridgeParams};

const DEFAULT_STEM: &str = "bridge_model";

fn main() -> steelspan::Result<()> {
    // Default: WARN for everything, INFO for steelspan.
    // Override with RUST_LOG env var (e.g. RUST_LOG=steelspan=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("steelspan=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => BridgeParams::from_path(path)?,
        None => BridgeParams::default(),
    };
    let stem = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_STEM.to_owned()));

    let mut assembly = BridgeAssembly::new(params);
    assembly.build()?;

    let Some(compound) = assembly.compound() else {
        return Ok(());
    };
    for format in [ExportFormat::Step, ExportFormat::Native] {
        export_compound(compound, format, stem.with_extension(format.extension()))?;
    }

    if let Some(layout) = assembly.layout() {
        println!("deck width:       {:.1} mm", layout.deck_width());
        println!("girder positions: {:?} mm", layout.girder_positions());
    }
    println!("members:          {}", compound.len());
    println!("total volume:     {:.3} m3", compound.volume()? * 1e-9);
    Ok(())
}
