// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Metadata reader returning fixed values, keyed by file name.

use std::{collections::HashMap, path::Path};

use crate::prim::MetadataReader;

#[derive(Debug, Default, Clone)]
pub struct StubReader {
  fields: HashMap<String, Vec<(String, String)>>,
}

impl StubReader {
  /// Any file named `file_name`, in any directory, reports `field` as `value`.
  pub fn with(mut self, file_name: &str, field: &str, value: &str) -> Self {
    self
      .fields
      .entry(file_name.to_string())
      .or_default()
      .push((field.to_string(), value.to_string()));
    self
  }
}

impl MetadataReader for StubReader {
  fn read_capture_time(&self, path: &Path) -> Option<Vec<(String, String)>> {
    let name = path.file_name()?.to_str()?;
    self.fields.get(name).cloned()
  }
}
