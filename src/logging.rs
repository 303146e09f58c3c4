// logging.rs

use crate::constants::LOG_FILE_BASENAME;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts the file-backed logger. The TUI owns the terminal, so nothing
/// may write to stdout/stderr after startup.
pub fn init_logging() -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    Logger::try_with_str("info")?
        .log_to_file(
            FileSpec::default()
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .start()
}
