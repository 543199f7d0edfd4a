// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Deciding, and carrying out, where a single file ends up.

use std::path::{Path, PathBuf};

use crate::{
  config::constants::DIR_QUARANTINE,
  error::Error,
  io,
  prim::{Category, FileRecord, Outcome},
};

/// Moves files from a source tree into a destination tree, one at a time.
///
/// For each file and its intended path:
/// 1. Nothing there: move it there.
/// 2. Same bytes there: it's a duplicate, quarantine it.
/// 3. Different bytes there: try `_01`, `_02`, ... applying 1 and 2 at each,
///    until one resolves.
///
/// Every move is copy, verify, then delete, so a failure at any point leaves
/// the source where it was. A source that already is the file at one of these
/// paths is left alone.
pub struct Relocator<'a> {
  dir_src:        &'a Path,
  dir_quarantine: PathBuf,
  max_probe:      u32,
}

impl<'a> Relocator<'a> {
  /// `max_probe` bounds the `_NN` counter tried before giving up on a file.
  pub fn new(dir_src: &'a Path, dir_dst: impl AsRef<Path>, max_probe: u32) -> Self {
    Self {
      dir_src,
      dir_quarantine: dir_dst.as_ref().join(DIR_QUARANTINE),
      max_probe,
    }
  }

  pub fn relocate(&self, record: &FileRecord, target: impl AsRef<Path>) -> Result<Outcome, Error> {
    let target = target.as_ref();

    if io::is_same_file(record.path(), target) {
      return Ok(in_place(record, target));
    }

    if !io::occupied(target) {
      io::move_verified(record, target)?;
      return Ok(placed(record.category(), target));
    }

    if record.is_identical_to(target) {
      return self.quarantine(record);
    }

    log::debug!(
      "{record}: {} holds different content, renaming.",
      target.display()
    );

    for counter in 1..=self.max_probe {
      let candidate = io::with_counter(target, counter);

      if io::is_same_file(record.path(), &candidate) {
        return Ok(in_place(record, &candidate));
      }

      if !io::occupied(&candidate) {
        io::move_verified(record, &candidate)?;
        return Ok(Outcome::CollisionRenamed(candidate));
      }

      if record.is_identical_to(&candidate) {
        return self.quarantine(record);
      }
    }

    Err(Error::ProbeExhausted {
      path: target.to_path_buf(),
      max:  self.max_probe,
    })
  }

  fn quarantine(&self, record: &FileRecord) -> Result<Outcome, Error> {
    io::quarantine(record, self.dir_src, &self.dir_quarantine).map(Outcome::Quarantined)
  }
}

fn in_place(record: &FileRecord, path: &Path) -> Outcome {
  log::debug!("{record}: Already in place.");
  Outcome::InPlace(path.to_path_buf())
}

fn placed(category: Category, path: &Path) -> Outcome {
  if category.is_media() {
    Outcome::MovedNew(path.to_path_buf())
  } else {
    Outcome::OtherMoved(path.to_path_buf())
  }
}
