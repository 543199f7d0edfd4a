// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program setup functions.

use std::{
  fs,
  io::Write,
  path::{Path, PathBuf},
};

use env_logger::Builder;
use log::LevelFilter;

/// File under `XDG_CONFIG_HOME` holding the last library path.
const LIBRARY_CONFIG: &str = "msort";

/// Sets up `env_logger` with the format "LEVEL message" (e.g. "WARN something
/// went wrong").
///
/// Log levels:
/// Error: Files that could not be placed.
/// Warn: Quarantined duplicates.
/// Info: General program flow and the final tally.
/// Debug: Individual file operations.
/// Trace: Hashing and metadata details.
pub fn configure_logging(verbosity: u8) {
  let level = match verbosity {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  Builder::new()
    .filter_level(level)
    .format(|buf, record| {
      let style = buf.default_level_style(record.level());
      writeln!(buf, "{style}{}{style:#}\t{}", record.level(), record.args())
    })
    .init();
}

/// Get library root from provided arg, if present, and write to
/// `XDG_CONFIG_HOME/msort`. Else, read library root from there.
pub fn get_or_update_library(path: Option<PathBuf>) -> Result<PathBuf, String> {
  let xdg_dirs = xdg::BaseDirectories::new();

  match path {
    Some(path) => {
      if !path.is_dir() {
        return Err(format!("{}: Library is not a directory.", path.display()));
      }
      let path = path
        .canonicalize()
        .map_err(|e| format!("{}: Unable to resolve library ({e}).", path.display()))?;

      let config_path = xdg_dirs
        .place_config_file(LIBRARY_CONFIG)
        .map_err(|e| format!("Failed to create config directory ({e})."))?;
      let value = path.to_str().ok_or("Library path is not valid UTF-8.")?;
      fs::write(&config_path, value)
        .map_err(|e| format!("{}: Failed to write library path ({e}).", config_path.display()))?;

      Ok(path)
    }
    None => {
      let config_path = xdg_dirs
        .get_config_file(LIBRARY_CONFIG)
        .ok_or("No library set. Pass one with -l.")?;
      let value = fs::read_to_string(&config_path)
        .map_err(|e| format!("{}: Failed to read library path ({e}).", config_path.display()))?;

      Ok(PathBuf::from(value.trim()))
    }
  }
}

/// Source and library must be existing, distinct directories, and the source
/// must not lie inside the library.
pub fn validate_roots(dir_src: &Path, dir_dst: &Path) -> Result<(), String> {
  for (name, dir) in [("Source", dir_src), ("Library", dir_dst)] {
    if !dir.is_dir() {
      return Err(format!("{}: {name} is not a directory.", dir.display()));
    }
  }

  let canonical = |dir: &Path| {
    dir
      .canonicalize()
      .map_err(|e| format!("{}: Unable to resolve ({e}).", dir.display()))
  };

  let (src, dst) = (canonical(dir_src)?, canonical(dir_dst)?);

  if src == dst {
    return Err(format!(
      "{}: Source and library are the same directory.",
      dir_src.display()
    ));
  }

  if src.starts_with(&dst) {
    return Err(format!(
      "{}: Source is inside library {}.",
      dir_src.display(),
      dir_dst.display()
    ));
  }

  Ok(())
}
