// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

mod asserts;
mod dates;
mod stub;
mod test_dir;
mod tiff;

use std::{fs, path::Path};

pub use dates::*;
pub use stub::*;
pub use test_dir::*;
pub use tiff::*;

pub use crate::{assert_dst, assert_err, assert_src, test_dir, test_path};

/// Reads a test file as UTF-8.
pub fn read(path: impl AsRef<Path>) -> String {
  fs::read_to_string(path.as_ref())
    .unwrap_or_else(|e| panic!("{}: Unable to read ({e}).", path.as_ref().display()))
}

pub fn type_of<T>(_: T) -> &'static str {
  std::any::type_name::<T>()
}
