//! Stream adapters.

use std::io::{ErrorKind, Read, Result};

/// Satisfies every read in full unless the inner reader runs dry.
///
/// Block decoding treats a short read as the end of input. Plain files behind
/// a `BufReader`, pipes and sockets all return short reads in the middle of a
/// stream, so wrap them in this before handing them to the decoder.
#[derive(Debug)]
pub struct ExactReader<R> {
    inner: R,
}

impl<R: Read> ExactReader<R> {
    pub fn new(inner: R) -> ExactReader<R> {
        ExactReader { inner }
    }
}

impl<R: Read> Read for ExactReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}
