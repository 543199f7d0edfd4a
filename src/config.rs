// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Immutable configuration injected into the classifier.

use std::collections::HashMap;

use crate::prim::Category;

pub mod constants;

/// Maps upper-cased file extensions to their `Category`.
///
/// Extensions are compared case-insensitively. Anything not present is
/// `Category::Other`.
#[derive(Debug, Clone)]
pub struct ExtensionMap {
  extensions: HashMap<String, Category>,
}

impl ExtensionMap {
  /// Builds a map from `(extension, category)` pairs. Leading dots are
  /// stripped. Once an extension is RAW, a later pair cannot demote it.
  pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, Category)>) -> Self {
    let mut extensions = HashMap::new();

    for (extension, category) in pairs {
      let key = normalize(extension);
      if key.is_empty() {
        continue;
      }

      match extensions.get(&key) {
        Some(Category::Raw) => {
          log::trace!("{key}: Already RAW, ignoring {category}.");
        }
        _ => {
          extensions.insert(key, category);
        }
      }
    }

    Self { extensions }
  }

  /// Returns the category for `extension`, defaulting to `Other`.
  pub fn get(&self, extension: &str) -> Category {
    self
      .extensions
      .get(&normalize(extension))
      .copied()
      .unwrap_or(Category::Other)
  }
}

impl Default for ExtensionMap {
  fn default() -> Self {
    Self::new(
      constants::RAW_EXTENSIONS
        .iter()
        .map(|e| (*e, Category::Raw))
        .chain(
          constants::PROCESSED_EXTENSIONS
            .iter()
            .map(|e| (*e, Category::Processed)),
        ),
    )
  }
}

fn normalize(extension: &str) -> String {
  extension.trim_start_matches('.').to_uppercase()
}
