//! # Logging
//!
//! On Android `log` records go to logcat under [`LOG_TAG`]. Elsewhere they
//! are routed through a `tracing` fmt subscriber writing to stderr.

use std::sync::Once;

/// Logcat tag
pub const LOG_TAG: &str = "TextureRendererPlugIn";

static INIT: Once = Once::new();

/// Install the logger once per process
pub fn init() {
    INIT.call_once(|| {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Trace)
                .with_tag(LOG_TAG),
        );

        #[cfg(not(target_os = "android"))]
        {
            use tracing_subscriber::fmt;
            use tracing_subscriber::prelude::*;

            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }

        set_level(log::LevelFilter::Info);
    });
}

/// Change the maximum level of `log` records
pub fn set_level(level: log::LevelFilter) {
    log::set_max_level(level);
}
