#![forbid(unsafe_code)]

mod collect;
mod error;
mod format;
mod ops;
mod read;
mod write;

pub use error::{ArchiveError, ArchiveResult};

pub use ops::{entries, list, pack, unpack};
