// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Functions for hashing, comparing, and moving files.
//!
//! Nothing here deletes a source file unless an identical copy has been
//! confirmed at its new location first.

use std::{
  ffi::OsStr,
  fs::{self, File},
  io::{self, ErrorKind, Read},
  path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
  config::constants::{HASH_CHUNK_SIZE, MAX_PROBE},
  error::Error,
  prim::FileRecord,
};

/// Content hash of a file.
pub type Fingerprint = blake3::Hash;

/// Hashes `path` in fixed-size chunks. Returns `None` if the file can't be
/// read, in which case nothing should be verified against it.
pub fn fingerprint(path: impl AsRef<Path>) -> Option<Fingerprint> {
  let path = path.as_ref();

  match hash_file(path) {
    Ok(hash) => {
      log::trace!("{}: {hash}", path.display());
      Some(hash)
    }
    Err(e) => {
      log::debug!("{}: Unable to hash ({e}).", path.display());
      None
    }
  }
}

/// Whether `a` and `b` hold the same bytes. False if either is missing or
/// unreadable.
///
/// Compares in increasing order of cost: existence, size, then content.
/// `hash_a` supplies the fingerprint of `a`, and is only called once both
/// sizes agree.
pub fn are_identical(
  a: impl AsRef<Path>,
  hash_a: impl FnOnce() -> Option<Fingerprint>,
  b: impl AsRef<Path>,
) -> bool {
  let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(a), fs::metadata(&b)) else {
    return false;
  };

  if !meta_a.is_file() || !meta_b.is_file() || meta_a.len() != meta_b.len() {
    return false;
  }

  match (hash_a(), fingerprint(b)) {
    (Some(hash_a), Some(hash_b)) => hash_a == hash_b,
    _ => false,
  }
}

/// Whether `a` and `b` resolve to the same file on disk.
pub fn is_same_file(a: impl AsRef<Path>, b: impl AsRef<Path>) -> bool {
  match (a.as_ref().canonicalize(), b.as_ref().canonicalize()) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}

/// Whether anything, even a dangling symlink, sits at `path`.
pub fn occupied(path: impl AsRef<Path>) -> bool {
  fs::symlink_metadata(path).is_ok()
}

/// `dir/name.ext` -> `dir/name_NN.ext`.
pub fn with_counter(path: impl AsRef<Path>, counter: u32) -> PathBuf {
  let path = path.as_ref();

  let mut name = path.file_stem().map(OsStr::to_os_string).unwrap_or_default();
  name.push(format!("_{counter:02}"));
  if let Some(ext) = path.extension() {
    name.push(".");
    name.push(ext);
  }

  path.with_file_name(name)
}

/// Copies `record` to `dst`, confirms the copy, and only then deletes the
/// source. On any failure the source is left in place and a partial or bad
/// copy is removed.
pub fn move_verified(record: &FileRecord, dst: impl AsRef<Path>) -> Result<(), Error> {
  let src = record.path();
  let dst = dst.as_ref();

  if let Some(parent) = dst.parent() {
    fs::create_dir_all(parent).map_err(Error::fs("create directory", parent))?;
  }

  log::trace!("{}: Copying to {}.", src.display(), dst.display());
  if let Err(e) = fs::copy(src, dst) {
    discard(dst);
    return Err(Error::fs("copy", src)(e));
  }

  if let Err(e) = copy_modify_date(src, dst) {
    log::debug!("{}: Unable to keep modification time ({e}).", dst.display());
  }

  if !record.is_identical_to(dst) {
    discard(dst);
    return Err(match record.fingerprint() {
      Some(_) => Error::Integrity {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
      },
      None => Error::Read {
        path: src.to_path_buf(),
      },
    });
  }

  fs::remove_file(src).map_err(Error::fs("remove source", src))
}

/// Moves `record` to `dir_quarantine`, mirroring its path relative to
/// `dir_src`. Never overwrites: if that path is taken, a `_NN` name is used.
/// Returns the new path.
pub fn quarantine(
  record: &FileRecord,
  dir_src: impl AsRef<Path>,
  dir_quarantine: impl AsRef<Path>,
) -> Result<PathBuf, Error> {
  let target = first_free(dir_quarantine.as_ref().join(record.relative_to(dir_src)))?;

  if let Some(parent) = target.parent() {
    fs::create_dir_all(parent).map_err(Error::fs("create directory", parent))?;
  }

  log::warn!(
    "{record}: Duplicate of existing file, quarantining to {}.",
    target.display()
  );

  match fs::rename(record.path(), &target) {
    Ok(()) => Ok(target),
    Err(e) => {
      // Likely a different filesystem.
      log::debug!("{record}: Rename failed ({e}), copying instead.");
      move_verified(record, &target).map(|()| target)
    }
  }
}

/// `path` if free, else the first free `_NN` variant of it.
pub fn first_free(path: impl AsRef<Path>) -> Result<PathBuf, Error> {
  let path = path.as_ref();

  if !occupied(path) {
    return Ok(path.to_path_buf());
  }

  (1..=MAX_PROBE)
    .map(|n| with_counter(path, n))
    .find(|p| !occupied(p))
    .ok_or_else(|| Error::ProbeExhausted {
      path: path.to_path_buf(),
      max:  MAX_PROBE,
    })
}

/// Regular, non-hidden files found under a root, plus whatever couldn't be
/// read on the way.
#[derive(Debug, Default)]
pub struct Listing {
  pub files:  Vec<PathBuf>,
  pub errors: Vec<Error>,
}

/// Lists regular files under `dir_root` recursively, sorted by name within
/// each directory, skipping hidden files and anything under `dir_exclude`.
/// Fails only if `dir_root` itself can't be read.
pub fn list_files(
  dir_root: impl AsRef<Path>,
  dir_exclude: Option<impl AsRef<Path>>,
) -> Result<Listing, Error> {
  let dir_root = dir_root.as_ref();

  fs::read_dir(dir_root).map_err(|source| Error::Enumerate {
    path: dir_root.to_path_buf(),
    source,
  })?;

  let mut listing = Listing::default();

  let walker = WalkDir::new(dir_root)
    .min_depth(1)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| !is_excluded(e.path(), dir_exclude.as_ref()));

  for entry in walker {
    match entry {
      Ok(entry) if entry.file_type().is_file() => {
        if is_hidden(entry.file_name()) {
          log::trace!("{}: Hidden, skipping.", entry.path().display());
        } else {
          listing.files.push(entry.into_path());
        }
      }
      Ok(entry) if entry.file_type().is_symlink() => {
        log::debug!("{}: Symlink, skipping.", entry.path().display());
      }
      Ok(_) => {}
      Err(e) => {
        let path = e.path().unwrap_or(dir_root).to_path_buf();
        listing
          .errors
          .push(Error::fs("list directory", path)(io::Error::from(e)));
      }
    }
  }

  Ok(listing)
}

/// Result of trying to remove one directory during cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
  Removed,
  /// Not empty, or not removable. Left in place.
  Retained(ErrorKind),
}

/// Removes every empty directory below `dir_root`, deepest first, so parents
/// emptied along the way go too. `dir_root` itself and anything under
/// `dir_exclude` are kept.
pub fn remove_empty_dirs(
  dir_root: impl AsRef<Path>,
  dir_exclude: Option<impl AsRef<Path>>,
) -> Vec<(PathBuf, Removal)> {
  let dirs = WalkDir::new(dir_root)
    .min_depth(1)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| !is_excluded(e.path(), dir_exclude.as_ref()))
    .filter_map(Result::ok)
    .filter(|e| e.file_type().is_dir())
    .map(walkdir::DirEntry::into_path)
    .collect::<Vec<_>>();

  // Pre-order reversed: every directory comes after all of its descendants.
  dirs
    .into_iter()
    .rev()
    .map(|dir| {
      let removal = match fs::remove_dir(&dir) {
        Ok(()) => Removal::Removed,
        Err(err) => Removal::Retained(err.kind()),
      };
      (dir, removal)
    })
    .collect()
}

fn hash_file(path: &Path) -> io::Result<Fingerprint> {
  let mut file = File::open(path)?;
  let mut hasher = blake3::Hasher::new();
  let mut buf = vec![0; HASH_CHUNK_SIZE];

  loop {
    match file.read(&mut buf) {
      Ok(0) => break,
      Ok(n) => {
        hasher.update(&buf[..n]);
      }
      Err(e) if e.kind() == ErrorKind::Interrupted => {}
      Err(e) => return Err(e),
    }
  }

  Ok(hasher.finalize())
}

fn copy_modify_date(src: &Path, dst: &Path) -> io::Result<()> {
  let modified = fs::metadata(src)?.modified()?;
  File::options().write(true).open(dst)?.set_modified(modified)
}

/// Best-effort removal of a copy that must not survive.
fn discard(path: &Path) {
  if occupied(path) {
    if let Err(e) = fs::remove_file(path) {
      log::error!("{}: Unable to remove bad copy ({e}).", path.display());
    }
  }
}

fn is_excluded(path: &Path, dir_exclude: Option<impl AsRef<Path>>) -> bool {
  dir_exclude.is_some_and(|x| path.starts_with(x))
}

fn is_hidden(name: &OsStr) -> bool {
  name.as_encoded_bytes().starts_with(b".")
}
