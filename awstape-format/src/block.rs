use std::io::{Read, Write};

use crate::{de::DeserializeOwned, ser::Serialize};
use crate::{BlockFlags, BlockHeader, DecodeError, HEADER_LEN};

/// A single block of an AWS tape image.
///
/// `current_length` is expected to match `data.len()`. When a block is built
/// by hand the field is trusted and written as given; use [`TapeBlock::new`]
/// to have it derived from the data.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TapeBlock {
    /// Length of this block's data.
    pub current_length: u16,

    /// Length of the block before this one. Never checked against the tape;
    /// keeping the chain consistent is up to whoever writes the image.
    pub previous_length: u16,

    pub flags1: BlockFlags,

    /// Reserved for future flags.
    pub flags2: u8,

    pub data: Vec<u8>,
}

impl TapeBlock {
    /// Build a block around `data`, deriving `current_length` from it.
    pub fn new(
        previous_length: u16,
        flags1: BlockFlags,
        data: Vec<u8>,
    ) -> std::io::Result<TapeBlock> {
        if data.len() > u16::MAX as usize {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "block data of {} bytes exceeds the maximum of {}",
                    data.len(),
                    u16::MAX
                ),
            ));
        }

        Ok(TapeBlock {
            current_length: data.len() as u16,
            previous_length,
            flags1,
            flags2: 0,
            data,
        })
    }

    #[inline(always)]
    pub fn tape_mark(previous_length: u16) -> TapeBlock {
        TapeBlock {
            current_length: 0,
            previous_length,
            flags1: BlockFlags::TAPE_MARK,
            flags2: 0,
            data: vec![],
        }
    }

    #[inline(always)]
    pub(crate) fn from_parts(header: BlockHeader, data: Vec<u8>) -> TapeBlock {
        TapeBlock {
            current_length: header.current_length,
            previous_length: header.previous_length,
            flags1: header.flags1,
            flags2: header.flags2,
            data,
        }
    }

    #[inline(always)]
    pub fn header(&self) -> BlockHeader {
        BlockHeader {
            current_length: self.current_length,
            previous_length: self.previous_length,
            flags1: self.flags1,
            flags2: self.flags2,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.current_length as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.current_length == 0
    }

    /// Number of bytes this block occupies on tape, header included.
    #[inline(always)]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.data.len()
    }

    #[inline(always)]
    pub fn is_tape_mark(&self) -> bool {
        self.flags1.contains(BlockFlags::TAPE_MARK)
    }

    #[inline(always)]
    pub fn is_record_start(&self) -> bool {
        self.flags1.contains(BlockFlags::RECORD_START)
    }

    #[inline(always)]
    pub fn is_record_end(&self) -> bool {
        self.flags1.contains(BlockFlags::RECORD_END)
    }

    /// The on-tape representation: header immediately followed by the data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(&self.header().to_bytes());
        buf.extend_from_slice(&self.data);
        buf
    }

    #[inline(always)]
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.write(writer)
    }

    /// Read one block. Each field is fetched with a single read, and a short
    /// read of either the header or the data is [`DecodeError::UnexpectedEof`],
    /// which is also what the end of a tape looks like.
    #[inline(always)]
    pub fn read_from<R: Read>(reader: &mut R) -> Result<TapeBlock, DecodeError> {
        TapeBlock::deserialize_owned(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const VALID_DATA: &[u8] = b"testing 1, 2, 3";

    fn tape_mark_block() -> TapeBlock {
        TapeBlock {
            current_length: 0,
            previous_length: 0,
            flags1: BlockFlags::TAPE_MARK,
            flags2: 0,
            data: vec![],
        }
    }

    fn valid_data_block() -> TapeBlock {
        TapeBlock {
            current_length: 15,
            previous_length: 0,
            flags1: BlockFlags::RECORD_START | BlockFlags::RECORD_END,
            flags2: 0,
            data: VALID_DATA.to_vec(),
        }
    }

    fn valid_data_binary() -> Vec<u8> {
        let mut v = vec![0x0f, 0, 0, 0, 0xa0, 0];
        v.extend_from_slice(VALID_DATA);
        v
    }

    fn decode(bytes: &[u8]) -> Result<TapeBlock, DecodeError> {
        TapeBlock::read_from(&mut Cursor::new(bytes))
    }

    #[test]
    fn encode_tape_mark() {
        assert_eq!(tape_mark_block().to_bytes(), vec![0, 0, 0, 0, 0x40, 0]);
        assert_eq!(TapeBlock::tape_mark(0), tape_mark_block());
    }

    #[test]
    fn decode_tape_mark() {
        let block = decode(&[0, 0, 0, 0, 0x40, 0]).unwrap();
        assert_eq!(block, tape_mark_block());
        assert!(block.is_tape_mark());
        assert!(block.data.is_empty());
    }

    #[test]
    fn encode_valid_data() {
        assert_eq!(valid_data_block().to_bytes(), valid_data_binary());
    }

    #[test]
    fn decode_valid_data() {
        let block = decode(&valid_data_binary()).unwrap();
        assert_eq!(block, valid_data_block());
        assert!(block.is_record_start());
        assert!(block.is_record_end());
        assert!(!block.is_tape_mark());
    }

    #[test]
    fn write_to_matches_to_bytes() {
        let block = valid_data_block();
        let mut out = vec![];
        block.write_to(&mut out).unwrap();
        assert_eq!(out, block.to_bytes());
        assert_eq!(out.len(), block.encoded_len());
    }

    #[test]
    fn short_header() {
        let err = decode(&[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEof {
                expected: 6,
                read: 4
            }
        ));
    }

    #[test]
    fn empty_input() {
        let err = decode(&[]).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof { read: 0, .. }));
    }

    #[test]
    fn missing_data() {
        let err = decode(&[0x0a, 0, 0, 0, 0xa0, 0]).unwrap_err();
        assert!(err.is_unexpected_eof());
    }

    #[test]
    fn short_data() {
        let err = decode(&[0x55, 0xaa, 0, 0, 0xa0, 0, 1, 2, 3, 4]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEof {
                expected: 0xaa55,
                read: 4
            }
        ));
    }

    #[test]
    fn reserved_fields_survive() {
        let block = TapeBlock {
            current_length: 3,
            previous_length: 0xbeef,
            flags1: BlockFlags::from_bits(0x9f),
            flags2: 0x5a,
            data: vec![1, 2, 3],
        };
        let decoded = decode(&block.to_bytes()).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(decoded.to_bytes(), block.to_bytes());
    }

    #[test]
    fn trailing_bytes_are_left_alone() {
        let mut bytes = valid_data_binary();
        bytes.extend_from_slice(&[0, 0, 0x0f, 0, 0x40, 0]);
        let mut cursor = Cursor::new(bytes);

        TapeBlock::read_from(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 21);

        let mark = TapeBlock::read_from(&mut cursor).unwrap();
        assert!(mark.is_tape_mark());
        assert_eq!(mark.previous_length, 15);
    }

    #[test]
    fn new_derives_length() {
        let block = TapeBlock::new(7, BlockFlags::RECORD_START, b"abc".to_vec()).unwrap();
        assert_eq!(block.current_length, 3);
        assert_eq!(block.previous_length, 7);
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn new_rejects_oversized_data() {
        let err = TapeBlock::new(0, BlockFlags::empty(), vec![0u8; 65536]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn io_errors_propagate() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "broken"))
            }
        }

        let err = TapeBlock::read_from(&mut Broken).unwrap_err();
        match err {
            DecodeError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::Other),
            e => panic!("unexpected error: {:?}", e),
        }
    }
}
