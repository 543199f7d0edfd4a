// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Organizing a source tree into a dated destination library.

mod organizer;
mod progress;
mod relocation;

pub use organizer::Organizer;
pub use progress::{LogProgress, Progress};
pub use relocation::Relocator;
