// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Failures while organizing a source tree.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can go wrong for a single file, plus the one failure that
/// stops a run before it starts (`Enumerate`).
#[derive(Debug, Error)]
pub enum Error {
  /// Source tree could not be listed. Fatal.
  #[error("{}: Unable to read source directory ({source}).", path.display())]
  Enumerate { path: PathBuf, source: io::Error },

  /// Content could not be hashed, so nothing can be verified against it.
  #[error("{}: Unable to read file contents.", path.display())]
  Read { path: PathBuf },

  /// Copy finished but does not match the source. The copy was discarded.
  #[error("{}: Copy to {} failed verification. Source kept.", src.display(), dst.display())]
  Integrity { src: PathBuf, dst: PathBuf },

  #[error("{}: Failed to {op} ({source}).", path.display())]
  Filesystem {
    op:     &'static str,
    path:   PathBuf,
    source: io::Error,
  },

  #[error("{}: No free name after {max} collisions. Source kept.", path.display())]
  ProbeExhausted { path: PathBuf, max: u32 },

  #[error("ExifTool: {0}")]
  ExifTool(String),
}

impl Error {
  /// Helper for `map_err` on `std::fs` calls.
  pub fn fs(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Filesystem { op, path, source }
  }
}
