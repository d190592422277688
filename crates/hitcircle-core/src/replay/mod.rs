//! Binary replay header decoding.
//!
//! The compressed input stream is captured as an opaque byte range; frames
//! are not decompressed here.

mod decoder;
mod reader;
mod summary;

pub use decoder::{decode, read_file};
pub use reader::{ByteReader, STRING_EMPTY, STRING_PRESENT};
pub use summary::*;
