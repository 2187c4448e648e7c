//! Voxel viewer entry point
//!
//! Usage: `voxel-game [config.json]`. Without a path the built-in defaults are
//! used.

use std::path::PathBuf;
use tracing::info;
use voxel_engine::prelude::*;

fn main() -> Result<(), EngineError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ViewerConfig::load_or_default(config_path.as_deref())?;

    voxel_engine::init_logging(config.log_filter.as_deref());
    info!("Starting voxel viewer");

    ViewerApp::new(config).run()?;

    info!("Viewer exited");
    Ok(())
}
