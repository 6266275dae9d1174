//! iterscope binary
//!
//! Starts a debugging session against the built-in probe system. Attaching
//! a native solver means constructing the shell with a different
//! [`IterativeSystem`](iterscope::IterativeSystem) handle.

use std::cell::RefCell;
use std::rc::Rc;

use iterscope::config::AppConfig;
use iterscope::probe::ProbeSystem;
use iterscope::shell::DebuggerShell;
use iterscope::PropertySchema;

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting iterscope");

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // The settings schema is required; without it there is no property grid
    // to offer, so failure is fatal.
    let schema = PropertySchema::load(&config.schema.resource).unwrap_or_else(|e| {
        panic!("Failed to load schema '{}': {}", config.schema.resource, e);
    });

    let system = Rc::new(RefCell::new(ProbeSystem::from_config(&config.probe)));
    let context = schema
        .create_property_context(&config.schema.settings_type, system.clone())
        .unwrap_or_else(|e| panic!("Failed to bind settings: {}", e));

    log::info!(
        "Bound {} settings properties for {}",
        context.len(),
        config.schema.settings_type
    );

    let shell = DebuggerShell::new(config, system, context);
    if let Err(e) = shell.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
