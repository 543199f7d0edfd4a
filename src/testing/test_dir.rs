// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Helper for setting up source and destination directories for tests.

use std::{
  collections::{HashSet, VecDeque},
  env,
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

static TEST_ROOT: LazyLock<PathBuf> =
  LazyLock::new(|| env::temp_dir().join(format!("{}_tests", env!("CARGO_PKG_NAME"))));

/// Helper for creating directories for tests needing actual files. Holds an
/// unorganized `src/` and an initially empty `dst/`.
pub struct TestDir {
  src: PathBuf,
  dst: PathBuf,
}

impl TestDir {
  /// Creates a new directory under `TEST_ROOT`, filling `src/` with `files`
  /// as `(relative path, contents)`. Note: Prefer using `test_dir!()` macro.
  pub fn new(test_path: PathBuf, files: Vec<(&'static str, &'static str)>) -> Self {
    let root_rel = TEST_ROOT.join(test_path);
    if root_rel.exists() {
      fs::remove_dir_all(&root_rel).unwrap();
    }
    fs::create_dir_all(root_rel.join("src")).unwrap();
    fs::create_dir_all(root_rel.join("dst")).unwrap();

    let root = root_rel.canonicalize().unwrap();
    let d = Self {
      src: root.join("src"),
      dst: root.join("dst"),
    };

    for (file, contents) in files {
      d.add_src(file, contents);
    }

    d
  }

  pub fn add_src(&self, file: impl AsRef<Path>, contents: &str) -> PathBuf {
    create_file(&self.src, file, contents.as_bytes())
  }

  pub fn add_src_bytes(&self, file: impl AsRef<Path>, contents: &[u8]) -> PathBuf {
    create_file(&self.src, file, contents)
  }

  pub fn add_dst(&self, file: impl AsRef<Path>, contents: &str) -> PathBuf {
    create_file(&self.dst, file, contents.as_bytes())
  }

  pub fn files_src(&self) -> HashSet<PathBuf> {
    traverse_dir(&self.src)
  }

  pub fn files_dst(&self) -> HashSet<PathBuf> {
    traverse_dir(&self.dst)
  }

  pub fn get_src(&self, file: impl AsRef<Path>) -> PathBuf {
    self.src.join(file)
  }

  pub fn get_dst(&self, file: impl AsRef<Path>) -> PathBuf {
    self.dst.join(file)
  }

  pub fn src(&self) -> &Path {
    &self.src
  }

  pub fn dst(&self) -> &Path {
    &self.dst
  }
}

fn create_file(working_dir: impl AsRef<Path>, path: impl AsRef<Path>, contents: &[u8]) -> PathBuf {
  let full_path = working_dir.as_ref().join(path.as_ref());

  assert!(!full_path.exists(), "File already exists: {full_path:?}");
  fs::create_dir_all(full_path.parent().unwrap()).unwrap();
  fs::write(&full_path, contents).unwrap();

  full_path
}

fn traverse_dir(root: impl AsRef<Path>) -> HashSet<PathBuf> {
  let mut dirs = VecDeque::from([root.as_ref().to_owned()]);
  let mut files = HashSet::new();

  while let Some(dir) = dirs.pop_front() {
    let Ok(entries) = fs::read_dir(&dir) else {
      continue;
    };

    for entry in entries.map(Result::unwrap) {
      let file_type = entry.file_type().unwrap();
      if file_type.is_dir() {
        dirs.push_back(entry.path());
      } else if file_type.is_file() {
        files.insert(entry.path());
      } else {
        panic!("Unexpected file type: {file_type:?}");
      }
    }
  }

  files
}

#[macro_export]
macro_rules! test_path {
  () => {{
    // HACK: Get module hierarchy for caller.
    let mut function = $crate::testing::type_of(|| ()).rsplit("::");
    // 0th element is `{closure}`.
    let case = function.nth(1).unwrap();
    let suite = function.next().unwrap();
    let module = function.next().unwrap();

    std::path::PathBuf::from(format!("{module}/{suite}/{case}"))
  }};
}

#[macro_export]
macro_rules! test_dir {
  ($($file:literal: $contents:literal),* $(,)?) => {{
    let files: Vec<(&'static str, &'static str)> = vec![$(($file, $contents)),*];
    $crate::testing::TestDir::new($crate::test_path!(), files)
  }};
}
