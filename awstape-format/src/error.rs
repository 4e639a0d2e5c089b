/// Failure to decode a block from a stream.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes were available than the header or payload requires. This
    /// is also how the end of a tape shows up; `read == 0` at a block
    /// boundary is the usual case.
    #[error("Unexpected end of input (wanted {expected} bytes, got {read}).")]
    UnexpectedEof { expected: usize, read: usize },

    #[error("Reading from the underlying stream failed.")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    #[inline(always)]
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, DecodeError::UnexpectedEof { .. })
    }
}

/// Failure of a single [`Transformer::transform`](crate::Transformer::transform) call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The destination filled up before the source was drained. The counts
    /// say how far the call got; resume with `src[consumed..]`.
    #[error("Destination buffer full after {written} bytes.")]
    DestinationFull { written: usize, consumed: usize },
}
