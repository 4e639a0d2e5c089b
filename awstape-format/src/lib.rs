//! Reading and writing of AWS virtual tape images, plus the single-byte
//! EBCDIC/ASCII transliteration tables commonly needed to make sense of them.
//!
//! An AWS tape image is a sequence of variable-length blocks, each prefixed
//! by a 6-byte header describing the length of the block and the one
//! before it. See [`TapeBlock`] for the wire layout.

mod block;
pub mod codepage;
mod de;
mod error;
mod header;
pub mod io;
mod ser;
#[cfg(feature = "reader")]
mod tape;

pub use block::TapeBlock;
pub use codepage::{
    Codepage, Progress, TransformWriter, Transformer, Transliterator, ASCII_TO_EBCDIC,
    EBCDIC_TO_ASCII,
};
pub use error::{DecodeError, TransformError};
pub use header::{BlockFlags, BlockHeader, HEADER_LEN};
#[cfg(feature = "reader")]
pub use tape::reader::{TapeEntry, TapeReader};
#[cfg(feature = "writer")]
pub use tape::writer::TapeWriter;
