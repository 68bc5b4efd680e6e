use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

pub fn setup_logging(debug: bool, quiet: bool) {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .init();
}
