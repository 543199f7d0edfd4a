// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Walking a source tree and organizing every file in it.

use std::path::{Path, PathBuf};

use super::{Progress, Relocator};
use crate::{
  config::constants::MAX_PROBE,
  error::Error,
  io::{self, Removal},
  prim::{CaptureResolver, Classifier, FileRecord, MetadataReader, RunTally},
};

/// Moves every file under a source directory into a destination library:
/// - Media to `YYYY/MM/{RAW,Processed}/YYYYMMDD_HHMMSS.ext`.
/// - Everything else to `Other/<relative path>`.
/// - Duplicates of anything already in place to `_QUARANTINE/<relative path>`.
///
/// Holds no state between runs.
pub struct Organizer {
  classifier: Classifier,
  resolver:   CaptureResolver,
}

impl Organizer {
  pub fn new(classifier: Classifier, reader: Box<dyn MetadataReader>) -> Self {
    Self {
      classifier,
      resolver: CaptureResolver::new(reader),
    }
  }

  /// Organizes all of `dir_src` into `dir_dst`, then removes directories in
  /// `dir_src` left empty. Both must be existing, distinct directories.
  ///
  /// Per-file failures are collected in the returned tally and never stop the
  /// run. Only failing to read `dir_src` itself returns `Err`.
  pub fn organize(
    &self,
    dir_src: impl AsRef<Path>,
    dir_dst: impl AsRef<Path>,
    mut progress: Option<&mut dyn Progress>,
  ) -> Result<RunTally, Error> {
    let (dir_src, dir_dst, dir_exclude) = resolve_roots(dir_src, dir_dst)?;
    log::info!("Organizing {} into {}.", dir_src.display(), dir_dst.display());

    let listing = io::list_files(&dir_src, dir_exclude.as_ref())?;
    let total = listing.files.len();
    log::info!("Found {total} files.");

    let mut tally = RunTally::default();
    for e in listing.errors {
      tally.push_error(e);
    }

    let relocator = Relocator::new(&dir_src, &dir_dst, MAX_PROBE);

    for (i, path) in listing.files.iter().enumerate() {
      let record = self.record(path);
      let target = record.destination(&dir_src, &dir_dst);

      tally.record(path, relocator.relocate(&record, target));

      if let Some(progress) = progress.as_deref_mut() {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        progress.report(i + 1, total, &name);
      }
    }

    log::info!("Removing empty directories.");
    for (dir, removal) in io::remove_empty_dirs(&dir_src, dir_exclude.as_ref()) {
      match removal {
        Removal::Removed => log::debug!("{}: Removed empty directory.", dir.display()),
        Removal::Retained(kind) => log::trace!("{}: Kept ({kind}).", dir.display()),
      }
    }

    log::info!("Done: {tally}.");
    Ok(tally)
  }

  /// Where each file under `dir_src` would go, without touching anything.
  /// Collisions aren't predicted, so these are the intended paths only.
  pub fn plan(
    &self,
    dir_src: impl AsRef<Path>,
    dir_dst: impl AsRef<Path>,
  ) -> Result<Vec<(PathBuf, PathBuf)>, Error> {
    let (dir_src, dir_dst, dir_exclude) = resolve_roots(dir_src, dir_dst)?;

    let listing = io::list_files(&dir_src, dir_exclude.as_ref())?;
    for e in &listing.errors {
      log::error!("{e}");
    }

    Ok(
      listing
        .files
        .into_iter()
        .map(|path| {
          let record = self.record(&path);
          if let Some(captured) = record.captured() {
            log::debug!("{record}: {} from {}.", captured.when, captured.source);
          }
          let target = record.destination(&dir_src, &dir_dst);
          (path, target)
        })
        .collect(),
    )
  }

  fn record(&self, path: &Path) -> FileRecord {
    let category = self.classifier.category_of_path(path);
    let captured = category.is_media().then(|| self.resolver.resolve(path));
    FileRecord::new(path, category, captured)
  }
}

/// Canonical source and destination roots, plus the destination again if it
/// lies inside the source and must not be walked.
fn resolve_roots(
  dir_src: impl AsRef<Path>,
  dir_dst: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf, Option<PathBuf>), Error> {
  let dir_src = dir_src.as_ref();
  let dir_src = dir_src.canonicalize().map_err(|source| Error::Enumerate {
    path: dir_src.to_path_buf(),
    source,
  })?;

  let dir_dst = dir_dst.as_ref();
  let dir_dst = dir_dst
    .canonicalize()
    .unwrap_or_else(|_| dir_dst.to_path_buf());

  let dir_exclude = dir_dst.starts_with(&dir_src).then(|| dir_dst.clone());

  Ok((dir_src, dir_dst, dir_exclude))
}
