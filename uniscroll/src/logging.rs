use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::error::Result;

/// Send log output to a file.
///
/// Terminal hosts own stdout and stderr, so logs go to a file instead. Fails
/// if the file cannot be created or a logger is already installed.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
