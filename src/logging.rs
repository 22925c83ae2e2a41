use std::fs::File;
use std::path::Path;

use crate::error::StatementError;

/// Log to stderr, and to `logfile` as well when given
pub fn init_logger(
    filter_level: log::LevelFilter,
    logfile: Option<&Path>,
) -> Result<(), StatementError> {
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) as Box<dyn simplelog::SharedLogger>];
    if let Some(filename) = logfile {
        loggers.push(simplelog::WriteLogger::new(
            filter_level,
            simplelog::Config::default(),
            File::create(filename)?,
        ));
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}
