// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Primitive types describing a file on its way from source to destination.

mod capture;
mod category;
mod record;
mod tally;

pub use capture::*;
pub use category::*;
pub use record::*;
pub use tally::*;
