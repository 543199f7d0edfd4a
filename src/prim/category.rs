// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! File categories and canonical media file names.

use std::{
  ffi::OsString,
  fmt::{self, Display, Formatter},
  path::Path,
};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::{ExtensionMap, constants};

/// What a file is, decided purely by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
  Raw,
  Processed,
  Other,
}

impl Category {
  /// Name of the directory this category lands in under the destination.
  pub fn dir_name(self) -> &'static str {
    match self {
      Self::Raw => constants::DIR_RAW,
      Self::Processed => constants::DIR_PROCESSED,
      Self::Other => constants::DIR_OTHER,
    }
  }

  /// RAW and processed files are renamed by capture time; others keep their
  /// relative path.
  pub fn is_media(self) -> bool {
    !matches!(self, Self::Other)
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.dir_name())
  }
}

/// Decides the `Category` of files from an injected `ExtensionMap`.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
  extensions: ExtensionMap,
}

impl Classifier {
  pub fn new(extensions: ExtensionMap) -> Self {
    Self { extensions }
  }

  pub fn category_of(&self, extension: &str) -> Category {
    self.extensions.get(extension)
  }

  /// Files without an extension, or with one that isn't UTF-8, are `Other`.
  pub fn category_of_path(&self, path: impl AsRef<Path>) -> Category {
    path
      .as_ref()
      .extension()
      .and_then(|e| e.to_str())
      .map_or(Category::Other, |e| self.category_of(e))
  }
}

/// Builds `YYYYMMDD_HHMMSS.ext` from `timestamp`, keeping the extension of
/// `original` exactly as written. The original stem is discarded.
pub fn canonical_name(timestamp: &NaiveDateTime, original: impl AsRef<Path>) -> OsString {
  let mut name = OsString::from(timestamp.format(constants::CANONICAL_STEM_FORMAT).to_string());

  if let Some(ext) = original.as_ref().extension() {
    name.push(".");
    name.push(ext);
  }

  name
}
