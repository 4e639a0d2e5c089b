use std::io::{Result, Write};

use super::Transformer;
use crate::TransformError;

const DEFAULT_BUF_SIZE: usize = 8 * 1024;

/// Passes everything written to it through a [`Transformer`] on its way to
/// the inner writer, using a fixed-size staging buffer.
pub struct TransformWriter<W: Write, T: Transformer> {
    inner: W,
    transformer: T,
    buf: Box<[u8]>,
}

impl<W: Write, T: Transformer> TransformWriter<W, T> {
    pub fn new(inner: W, transformer: T) -> TransformWriter<W, T> {
        TransformWriter::with_capacity(DEFAULT_BUF_SIZE, inner, transformer)
    }

    pub fn with_capacity(capacity: usize, inner: W, transformer: T) -> TransformWriter<W, T> {
        TransformWriter {
            inner,
            transformer,
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write, T: Transformer> Write for TransformWriter<W, T> {
    fn write(&mut self, src: &[u8]) -> Result<usize> {
        let mut rest = src;

        loop {
            match self.transformer.transform(&mut self.buf, rest, false) {
                Ok(progress) => {
                    self.inner.write_all(&self.buf[..progress.written])?;
                    return Ok(src.len());
                }
                Err(TransformError::DestinationFull { written, consumed }) => {
                    if written == 0 && consumed == 0 {
                        return Err(std::io::Error::new(
                            std::io::ErrorKind::Other,
                            TransformError::DestinationFull { written, consumed },
                        ));
                    }
                    self.inner.write_all(&self.buf[..written])?;
                    rest = &rest[consumed..];
                }
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ASCII_TO_EBCDIC, EBCDIC_TO_ASCII};

    #[test]
    fn small_buffer_resumes() {
        let mut writer = TransformWriter::with_capacity(3, vec![], &ASCII_TO_EBCDIC);
        writer.write_all(b"HELLO, WORLD").unwrap();
        let out = writer.into_inner().unwrap();

        let back = EBCDIC_TO_ASCII.transform_bytes(&out).unwrap();
        assert_eq!(back, b"HELLO, WORLD");
        assert_eq!(&out[..5], &[0xc8, 0xc5, 0xd3, 0xd3, 0xd6]);
    }

    #[test]
    fn copy_through() {
        let src = b"line one\nline two\n".to_vec();
        let mut writer = TransformWriter::new(vec![], EBCDIC_TO_ASCII);
        std::io::copy(&mut &src[..], &mut writer).unwrap();
        assert_eq!(writer.get_ref().len(), src.len());
    }
}
