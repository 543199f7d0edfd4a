// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Capture timestamp resolution.
//!
//! Embedded capture time is trusted first, embedded modification time second,
//! and the filesystem's modification time last, as the latter changes when
//! files are copied between systems.

use std::{
  fmt::{self, Display, Formatter},
  fs,
  path::Path,
};

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::config::constants;

/// EXIF tag holding when the shutter fired.
pub const FIELD_ORIGINAL: &str = "DateTimeOriginal";

/// EXIF tag holding when the file was last written by software.
pub const FIELD_MODIFIED: &str = "DateTime";

/// Source of embedded date and time fields.
pub trait MetadataReader {
  /// Returns `(field name, raw value)` pairs for whichever of `FIELD_ORIGINAL`
  /// and `FIELD_MODIFIED` are present, or `None` if metadata can't be read.
  fn read_capture_time(&self, path: &Path) -> Option<Vec<(String, String)>>;
}

/// Which link of the fallback chain produced a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
  Original,
  Modified,
  FileSystem,
  /// Not even the filesystem could say. Unix epoch is used.
  Unknown,
}

impl Display for TimeSource {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Original => FIELD_ORIGINAL,
      Self::Modified => FIELD_MODIFIED,
      Self::FileSystem => "file modification time",
      Self::Unknown => "unknown",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTime {
  pub when:   NaiveDateTime,
  pub source: TimeSource,
}

/// Resolves the best-known capture time of a file. Never fails.
pub struct CaptureResolver {
  reader: Box<dyn MetadataReader>,
}

impl CaptureResolver {
  pub fn new(reader: Box<dyn MetadataReader>) -> Self {
    Self { reader }
  }

  pub fn resolve(&self, path: impl AsRef<Path>) -> CaptureTime {
    let path = path.as_ref();

    if let Some(fields) = self.reader.read_capture_time(path) {
      for (field, source) in [
        (FIELD_ORIGINAL, TimeSource::Original),
        (FIELD_MODIFIED, TimeSource::Modified),
      ] {
        let Some((_, value)) = fields.iter().find(|(name, _)| name == field) else {
          continue;
        };

        match parse_exif_datetime(value) {
          Some(when) => return CaptureTime { when, source },
          None => log::trace!("{}: Unparseable {field} `{value}`.", path.display()),
        }
      }
    } else {
      log::trace!("{}: No embedded metadata.", path.display());
    }

    match file_modify_date(path) {
      Some(when) => CaptureTime {
        when,
        source: TimeSource::FileSystem,
      },
      None => {
        log::warn!(
          "{}: No usable timestamp, falling back to Unix epoch.",
          path.display()
        );
        CaptureTime {
          when:   DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
          source: TimeSource::Unknown,
        }
      }
    }
  }
}

/// Parses `YYYY:MM:DD HH:MM:SS`, tolerating surrounding whitespace and the
/// trailing NUL some writers leave in place.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
  let trimmed = value.trim_matches(|c: char| c.is_whitespace() || c == '\0' || c == '"');
  NaiveDateTime::parse_from_str(trimmed, constants::EXIF_DATETIME_FORMAT).ok()
}

/// Filesystem modification time, in local time.
fn file_modify_date(path: &Path) -> Option<NaiveDateTime> {
  let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
  Some(DateTime::<Local>::from(modified).naive_local())
}
