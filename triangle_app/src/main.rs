//! Hello triangle
//!
//! Opens an 800x600 window and draws a single orange triangle until the
//! window is closed or Escape is released. Settings can be overridden with
//! an optional `triangle.toml` (or `triangle.ron`) in the working directory.

use std::path::{Path, PathBuf};

use gl_engine::core::config::ConfigError;
use gl_engine::prelude::*;

const CONFIG_CANDIDATES: [&str; 2] = ["triangle.toml", "triangle.ron"];

/// Config file read before the logger exists
///
/// The log level comes from the file itself, so load problems are held
/// here and reported by [`PendingConfig::resolve`] after `logging::init`.
struct PendingConfig {
    path: Option<PathBuf>,
    result: Result<ApplicationConfig, ConfigError>,
}

impl PendingConfig {
    /// Load the first candidate that exists; no file means defaults
    fn read(candidates: &[&str]) -> Self {
        match candidates.iter().map(Path::new).find(|path| path.exists()) {
            Some(path) => Self {
                path: Some(path.to_path_buf()),
                result: ApplicationConfig::load(path),
            },
            None => Self {
                path: None,
                result: Ok(ApplicationConfig::default()),
            },
        }
    }

    /// Level to install the logger with
    fn log_level(&self) -> String {
        self.result.as_ref().map_or_else(
            |_| EngineConfig::default().log_level,
            |config| config.engine.log_level.clone(),
        )
    }

    /// Report the load outcome and settle on a config
    fn resolve(self) -> ApplicationConfig {
        match self.path {
            Some(path) => ApplicationConfig::from_load_result(&path, self.result),
            None => {
                log::debug!("No config file found, using defaults");
                ApplicationConfig::default()
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pending = PendingConfig::read(&CONFIG_CANDIDATES);
    logging::init(&pending.log_level());
    let config = pending.resolve();

    println!("Hello GLFW {}!", GlfwWindow::version_string());

    let mut engine = Engine::new(config).map_err(|e| {
        log::error!("Initialization failed: {}", e);
        e
    })?;

    let info = engine.context_info();
    println!("Vendor: {}", info.vendor);
    println!("Renderer: {}", info.renderer);

    let summary = engine.run();
    log::debug!("Rendered {} frames", summary.frames);

    engine.shutdown();
    Ok(())
}
