use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read};
use std::path::Path;

use crate::io::ExactReader;
use crate::{DecodeError, TapeBlock};

/// What a tape holds once blocks are grouped back together.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TapeEntry {
    /// The concatenated data of one logical record.
    Record(Vec<u8>),
    TapeMark,
}

/// Sequential reader over the blocks of a tape image.
#[derive(Debug)]
pub struct TapeReader<R> {
    reader: R,
    offset: u64,
    blocks_read: u64,
    finished: bool,
    pending: Option<TapeBlock>,
}

impl TapeReader<ExactReader<BufReader<File>>> {
    /// Open a tape image on disk for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new().read(true).open(path.as_ref())?;
        Ok(TapeReader::new(ExactReader::new(BufReader::new(file))))
    }
}

impl<R: Read> TapeReader<R> {
    /// `reader` must deliver full reads; see [`ExactReader`].
    pub fn new(reader: R) -> TapeReader<R> {
        TapeReader {
            reader,
            offset: 0,
            blocks_read: 0,
            finished: false,
            pending: None,
        }
    }

    /// Byte offset of the next block to be read.
    #[inline(always)]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[inline(always)]
    pub fn blocks_read(&self) -> u64 {
        self.blocks_read
    }

    /// Read the next block, or `None` once the input runs out.
    ///
    /// Running out of input is reported the same way whether it happens
    /// cleanly between blocks or halfway through one; the latter is only
    /// logged.
    pub fn next_block(&mut self) -> Result<Option<TapeBlock>, DecodeError> {
        if self.finished {
            return Ok(None);
        }

        match TapeBlock::read_from(&mut self.reader) {
            Ok(block) => {
                self.offset += block.encoded_len() as u64;
                self.blocks_read += 1;
                Ok(Some(block))
            }
            Err(DecodeError::UnexpectedEof { expected, read }) => {
                self.finished = true;
                if read > 0 {
                    tracing::warn!(
                        offset = format_args!("{:#x}", self.offset),
                        expected,
                        read,
                        "tape ends in the middle of a block"
                    );
                } else {
                    tracing::debug!(
                        offset = format_args!("{:#x}", self.offset),
                        blocks = self.blocks_read,
                        "end of tape"
                    );
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn next_pending(&mut self) -> Result<Option<TapeBlock>, DecodeError> {
        match self.pending.take() {
            Some(block) => Ok(Some(block)),
            None => self.next_block(),
        }
    }

    /// Read the next logical record or tape mark.
    ///
    /// A record runs from a block flagged as record start through the next
    /// block flagged as record end. Data blocks without a start flag open a
    /// record of their own. If a tape mark, a new record start or the end of
    /// the tape arrives before the record is closed, what was gathered so far
    /// is returned as the record. A tape mark carrying data yields that data
    /// as a record, followed by the mark.
    pub fn next_entry(&mut self) -> Result<Option<TapeEntry>, DecodeError> {
        let mut record: Option<Vec<u8>> = None;

        loop {
            let block = match self.next_pending()? {
                Some(block) => block,
                None => return Ok(record.map(TapeEntry::Record)),
            };

            let interrupts = block.is_tape_mark() || block.is_record_start();
            if interrupts && record.is_some() {
                tracing::debug!(
                    offset = format_args!("{:#x}", self.offset),
                    "record closed without an end flag"
                );
                self.pending = Some(block);
                return Ok(record.map(TapeEntry::Record));
            }

            if block.is_tape_mark() {
                if block.data.is_empty() {
                    return Ok(Some(TapeEntry::TapeMark));
                }

                // Data on a tape mark comes out as a record of its own, then the mark.
                tracing::warn!(
                    offset = format_args!("{:#x}", self.offset),
                    length = block.data.len(),
                    "tape mark carries data"
                );
                let mut mark = block;
                let data = std::mem::take(&mut mark.data);
                mark.current_length = 0;
                self.pending = Some(mark);
                return Ok(Some(TapeEntry::Record(data)));
            }

            record
                .get_or_insert_with(Vec::new)
                .extend_from_slice(&block.data);

            if block.is_record_end() {
                return Ok(record.map(TapeEntry::Record));
            }
        }
    }

    pub fn entries(&mut self) -> impl Iterator<Item = Result<TapeEntry, DecodeError>> + '_ {
        std::iter::from_fn(move || self.next_entry().transpose())
    }
}

impl<R: Read> Iterator for TapeReader<R> {
    type Item = Result<TapeBlock, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}
