use chrono::Local;
use eyre::Result;
use fern::Dispatch;

/// Sets up the application logger.
///
/// Log lines go to stderr so that command output on stdout stays machine readable.
///
/// # Errors
/// * If a logger is already installed
pub fn setup_logger() -> Result<()> {
    Dispatch::new()
        // Set logging level from RUST_LOG env var or default to Info
        .level(
            std::env::var("RUST_LOG")
                .map(|level| level.parse().unwrap_or(log::LevelFilter::Info))
                .unwrap_or(log::LevelFilter::Info),
        )
        // Keep dependency chatter down
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stderr())
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
