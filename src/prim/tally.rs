// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Per-run counters and per-file outcomes.

use std::{
  fmt::{self, Display, Formatter},
  path::{Path, PathBuf},
};

use serde::Serialize;

use crate::error::Error;

/// What happened to one file. Holds where it ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Media placed at its canonical name.
  MovedNew(PathBuf),
  /// Non-media placed at its mirrored path.
  OtherMoved(PathBuf),
  /// Placed at a `_NN` name because different content held the usual one.
  CollisionRenamed(PathBuf),
  /// Identical content already existed. Moved under quarantine.
  Quarantined(PathBuf),
  /// Source already is the file at its intended path. Left untouched.
  InPlace(PathBuf),
}

impl Outcome {
  pub fn path(&self) -> &Path {
    match self {
      Self::MovedNew(p)
      | Self::OtherMoved(p)
      | Self::CollisionRenamed(p)
      | Self::Quarantined(p)
      | Self::InPlace(p) => p,
    }
  }
}

/// Summary of one `organize` call. Zero `errors` means every file was placed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTally {
  pub processed:              usize,
  pub moved_new:              usize,
  pub collisions_renamed:     usize,
  pub duplicates_quarantined: usize,
  pub others_moved:           usize,
  pub errors:                 Vec<String>,
}

impl RunTally {
  /// Counts one processed file.
  pub fn record(&mut self, path: impl AsRef<Path>, result: Result<Outcome, Error>) {
    self.processed += 1;

    match result {
      Ok(outcome) => {
        log::debug!("{}: -> {}", path.as_ref().display(), outcome.path().display());
        match outcome {
          Outcome::MovedNew(_) => self.moved_new += 1,
          Outcome::OtherMoved(_) => self.others_moved += 1,
          Outcome::CollisionRenamed(_) => self.collisions_renamed += 1,
          Outcome::Quarantined(_) => self.duplicates_quarantined += 1,
          Outcome::InPlace(_) => {}
        }
      }
      Err(e) => self.push_error(e),
    }
  }

  /// Adds an error without counting a processed file.
  pub fn push_error(&mut self, e: Error) {
    log::error!("{e}");
    self.errors.push(e.to_string());
  }

  pub fn is_clean(&self) -> bool {
    self.errors.is_empty()
  }
}

impl Display for RunTally {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} processed, {} moved, {} renamed after collision, {} quarantined, {} other, {} errors",
      self.processed,
      self.moved_new,
      self.collisions_renamed,
      self.duplicates_quarantined,
      self.others_moved,
      self.errors.len()
    )
  }
}
