// Copyright 2023-5 Seth Pendergrass. See LICENSE.

/// Receives `(done, total, file name)` after each file is handled.
pub trait Progress {
  fn report(&mut self, done: usize, total: usize, name: &str);
}

impl<F: FnMut(usize, usize, &str)> Progress for F {
  fn report(&mut self, done: usize, total: usize, name: &str) {
    self(done, total, name);
  }
}

/// Logs every file at debug level, and a running count every `every` files.
pub struct LogProgress {
  every: usize,
}

impl Default for LogProgress {
  fn default() -> Self {
    Self { every: 100 }
  }
}

impl Progress for LogProgress {
  fn report(&mut self, done: usize, total: usize, name: &str) {
    log::debug!("[{done}/{total}] {name}");

    if done == total || (self.every > 0 && done % self.every == 0) {
      log::info!("{done} of {total} files handled.");
    }
  }
}
