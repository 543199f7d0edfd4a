// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Readers for embedded date and time metadata.

use std::{
  ffi::OsStr,
  fs::File,
  io::BufReader,
  path::Path,
  process::Command,
};

use exif::{In, Tag, Value};
use serde::Deserialize;

use crate::{
  error::Error,
  prim::{FIELD_MODIFIED, FIELD_ORIGINAL, MetadataReader},
};

/// Reads EXIF in-process. Handles JPEG, TIFF-based RAW, HEIF, PNG and WebP.
#[derive(Debug, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
  fn read_capture_time(&self, path: &Path) -> Option<Vec<(String, String)>> {
    let file = File::open(path).ok()?;
    let exif = match exif::Reader::new().read_from_container(&mut BufReader::new(file)) {
      Ok(exif) => exif,
      Err(e) => {
        log::trace!("{}: No EXIF ({e}).", path.display());
        return None;
      }
    };

    let fields = [
      (FIELD_ORIGINAL, Tag::DateTimeOriginal),
      (FIELD_MODIFIED, Tag::DateTime),
    ]
    .into_iter()
    .filter_map(|(name, tag)| {
      let field = exif.get_field(tag, In::PRIMARY)?;
      // `display_value` quotes ASCII, so read the raw bytes.
      let Value::Ascii(values) = &field.value else {
        return None;
      };
      let value = String::from_utf8_lossy(values.first()?).into_owned();
      Some((name.to_string(), value))
    })
    .collect();

    Some(fields)
  }
}

/// `ExifTool` tags matching `FIELD_ORIGINAL` and `FIELD_MODIFIED`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExifToolDates {
  date_time_original: Option<String>,
  modify_date:        Option<String>,
}

/// Reads metadata through an external `exiftool` on `PATH`. Slower, but
/// understands far more containers (e.g. QuickTime video).
#[derive(Debug, Default)]
pub struct ExifToolReader;

impl ExifToolReader {
  /// Check that `ExifTool` can be run at all.
  pub fn check() -> Result<String, Error> {
    let stdout = run_exiftool(["-ver"])?;
    Ok(String::from_utf8_lossy(&stdout).trim().to_string())
  }
}

impl MetadataReader for ExifToolReader {
  fn read_capture_time(&self, path: &Path) -> Option<Vec<(String, String)>> {
    let args = [
      OsStr::new("-json"),
      OsStr::new("-DateTimeOriginal"),
      OsStr::new("-ModifyDate"),
      path.as_os_str(),
    ];

    let stdout = run_exiftool(args)
      .map_err(|e| log::debug!("{}: {e}", path.display()))
      .ok()?;

    let dates = parse_dates(&stdout)
      .map_err(|e| log::debug!("{}: {e}", path.display()))
      .ok()?;

    let fields = [
      (FIELD_ORIGINAL, dates.date_time_original),
      (FIELD_MODIFIED, dates.modify_date),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
    .collect();

    Some(fields)
  }
}

/// Runs `ExifTool` with `args`, returning stdout.
fn run_exiftool<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(args: I) -> Result<Vec<u8>, Error> {
  let mut cmd = Command::new("exiftool");
  cmd.args(args);

  let output = cmd
    .output()
    .map_err(|e| Error::ExifTool(format!("Failed to run ({e}).")))?;

  if !output.status.success() {
    return Err(Error::ExifTool(format!(
      "Did not run successfully.\nArgs:\n{}\nstderr:\n{}",
      cmd
        .get_args()
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" "),
      String::from_utf8_lossy(&output.stderr)
    )));
  }

  Ok(output.stdout)
}

/// Parses `ExifTool`'s JSON output for a single file.
fn parse_dates(stdout: &[u8]) -> Result<ExifToolDates, Error> {
  serde_json::from_slice::<Vec<ExifToolDates>>(stdout)
    .map_err(|e| {
      Error::ExifTool(format!(
        "Failed to parse output ({e}).\nstdout:\n{}",
        String::from_utf8_lossy(stdout)
      ))
    })?
    .into_iter()
    .next()
    .ok_or_else(|| Error::ExifTool("No output for file.".to_string()))
}
