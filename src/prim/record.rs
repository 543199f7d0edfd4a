// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Per-file working state while a source tree is being organized.

use std::{
  cell::OnceCell,
  fmt::{self, Display, Formatter},
  path::{Path, PathBuf},
};

use super::{CaptureTime, Category, canonical_name};
use crate::{
  config::constants,
  io::{self, Fingerprint},
};

/// A source file, its category and, for media, its capture time. The content
/// fingerprint is computed on first comparison and reused after that.
pub struct FileRecord {
  path:        PathBuf,
  category:    Category,
  captured:    Option<CaptureTime>,
  fingerprint: OnceCell<Option<Fingerprint>>,
}

impl FileRecord {
  /// `captured` is required for media and ignored for `Category::Other`.
  pub fn new(path: impl Into<PathBuf>, category: Category, captured: Option<CaptureTime>) -> Self {
    Self {
      path: path.into(),
      category,
      captured: captured.filter(|_| category.is_media()),
      fingerprint: OnceCell::new(),
    }
  }

  pub fn category(&self) -> Category {
    self.category
  }

  pub fn captured(&self) -> Option<CaptureTime> {
    self.captured
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Where this file belongs under `dst_root`:
  /// - Media: `YYYY/MM/<category>/YYYYMMDD_HHMMSS.ext`.
  /// - Everything else: `Other/<path relative to src_root>`.
  pub fn destination(&self, src_root: impl AsRef<Path>, dst_root: impl AsRef<Path>) -> PathBuf {
    let dst_root = dst_root.as_ref();

    match self.captured {
      Some(captured) if self.category.is_media() => dst_root
        .join(captured.when.format("%Y").to_string())
        .join(captured.when.format("%m").to_string())
        .join(self.category.dir_name())
        .join(canonical_name(&captured.when, &self.path)),
      _ => dst_root
        .join(constants::DIR_OTHER)
        .join(self.relative_to(src_root)),
    }
  }

  /// Path below `src_root`, or just the file name if the file lies elsewhere.
  pub fn relative_to(&self, src_root: impl AsRef<Path>) -> PathBuf {
    self.path.strip_prefix(src_root).map_or_else(
      |_| PathBuf::from(self.path.file_name().unwrap_or(self.path.as_os_str())),
      Path::to_path_buf,
    )
  }

  /// Content hash of the source, or `None` if it couldn't be read.
  pub fn fingerprint(&self) -> Option<Fingerprint> {
    *self.fingerprint.get_or_init(|| io::fingerprint(&self.path))
  }

  /// Whether `other` holds exactly this file's bytes.
  pub fn is_identical_to(&self, other: impl AsRef<Path>) -> bool {
    io::are_identical(&self.path, || self.fingerprint(), other)
  }
}

impl Display for FileRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path.display())
  }
}
