use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Result, Write};
use std::path::Path;

use crate::{BlockFlags, TapeBlock};

/// Writes records and tape marks as a chain of blocks, filling in
/// `previous_length` along the way.
#[derive(Debug)]
pub struct TapeWriter<W: Write> {
    writer: W,
    block_size: u16,
    previous_length: u16,
    bytes_written: u64,
    blocks_written: u64,
}

impl TapeWriter<BufWriter<File>> {
    /// This will create a new tape image, and error if the file already exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path.as_ref())?;
        Ok(TapeWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> TapeWriter<W> {
    pub fn new(writer: W) -> TapeWriter<W> {
        TapeWriter {
            writer,
            block_size: u16::MAX,
            previous_length: 0,
            bytes_written: 0,
            blocks_written: 0,
        }
    }

    /// Largest amount of record data put into a single block.
    pub fn with_block_size(mut self, block_size: u16) -> Result<Self> {
        if block_size == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "block size must not be zero",
            ));
        }
        self.block_size = block_size;
        Ok(self)
    }

    #[inline(always)]
    pub fn block_size(&self) -> u16 {
        self.block_size
    }

    #[inline(always)]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[inline(always)]
    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    /// Write `block` as is, apart from remembering its length for the next one.
    pub fn write_block(&mut self, block: &TapeBlock) -> Result<()> {
        block.write_to(&mut self.writer)?;
        self.previous_length = block.current_length;
        self.bytes_written += block.encoded_len() as u64;
        self.blocks_written += 1;
        Ok(())
    }

    /// Write one logical record, split over as many blocks as needed.
    pub fn write_record(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            let block = TapeBlock::new(
                self.previous_length,
                BlockFlags::RECORD_START | BlockFlags::RECORD_END,
                vec![],
            )?;
            return self.write_block(&block);
        }

        let chunks = data.chunks(self.block_size as usize);
        let last = chunks.len() - 1;

        for (i, chunk) in chunks.enumerate() {
            let mut flags = BlockFlags::empty();
            if i == 0 {
                flags |= BlockFlags::RECORD_START;
            }
            if i == last {
                flags |= BlockFlags::RECORD_END;
            }

            let block = TapeBlock::new(self.previous_length, flags, chunk.to_vec())?;
            self.write_block(&block)?;
        }

        tracing::debug!(
            length = data.len(),
            blocks = last + 1,
            "wrote record"
        );

        Ok(())
    }

    pub fn write_tape_mark(&mut self) -> Result<()> {
        let block = TapeBlock::tape_mark(self.previous_length);
        self.write_block(&block)
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        tracing::debug!(
            bytes = self.bytes_written,
            blocks = self.blocks_written,
            "finished tape"
        );
        Ok(self.writer)
    }
}
