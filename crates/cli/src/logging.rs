use log::LevelFilter;

use crate::error::CliError;

/// Sends log records to stderr so stdout carries only command output.
///
/// Should be called once at the start of `main()`.
pub fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {}",
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| CliError::Logging(e.to_string()))
}
