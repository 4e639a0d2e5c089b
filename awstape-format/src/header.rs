use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use byteorder::{ByteOrder, LittleEndian};

/// Size of the header preceding every block on the tape.
pub const HEADER_LEN: usize = 6;

/// The `flags1` bitmask of a block header.
///
/// Undefined bits are carried through untouched, so a header read from an
/// image always re-encodes to the same byte.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct BlockFlags(u8);

impl BlockFlags {
    /// First block of a logical record.
    pub const RECORD_START: BlockFlags = BlockFlags(0x80);
    /// Tape mark; carries no data.
    pub const TAPE_MARK: BlockFlags = BlockFlags(0x40);
    /// Last block of a logical record.
    pub const RECORD_END: BlockFlags = BlockFlags(0x20);

    #[inline(always)]
    pub const fn empty() -> BlockFlags {
        BlockFlags(0)
    }

    #[inline(always)]
    pub const fn from_bits(bits: u8) -> BlockFlags {
        BlockFlags(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn contains(self, other: BlockFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub fn insert(&mut self, other: BlockFlags) {
        self.0 |= other.0;
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for BlockFlags {
    type Output = BlockFlags;

    fn bitor(self, rhs: BlockFlags) -> BlockFlags {
        BlockFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for BlockFlags {
    fn bitor_assign(&mut self, rhs: BlockFlags) {
        self.insert(rhs)
    }
}

impl fmt::Display for BlockFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        let known = [
            (BlockFlags::RECORD_START, "START"),
            (BlockFlags::TAPE_MARK, "MARK"),
            (BlockFlags::RECORD_END, "END"),
        ];

        let mut names = known
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name.to_string())
            .collect::<Vec<_>>();

        let unknown = self.0 & !0xe0;
        if unknown != 0 {
            names.push(format!("{:#04x}", unknown));
        }

        write!(f, "{}", names.join("|"))
    }
}

impl fmt::Debug for BlockFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockFlags({:#04x}: {})", self.0, self)
    }
}

/// The fixed 6-byte header in front of each block. Multi-byte fields are
/// little-endian.
///
/// | Offset | Size | Field             |
/// |--------|------|-------------------|
/// | 0      | 2    | `current_length`  |
/// | 2      | 2    | `previous_length` |
/// | 4      | 1    | `flags1`          |
/// | 5      | 1    | `flags2`          |
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct BlockHeader {
    pub current_length: u16,
    pub previous_length: u16,
    pub flags1: BlockFlags,
    /// Reserved, currently unused. Preserved as read.
    pub flags2: u8,
}

impl BlockHeader {
    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> BlockHeader {
        BlockHeader {
            current_length: LittleEndian::read_u16(&buf[0..2]),
            previous_length: LittleEndian::read_u16(&buf[2..4]),
            flags1: BlockFlags::from_bits(buf[4]),
            flags2: buf[5],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        LittleEndian::write_u16(&mut buf[0..2], self.current_length);
        LittleEndian::write_u16(&mut buf[2..4], self.previous_length);
        buf[4] = self.flags1.bits();
        buf[5] = self.flags2;
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_compose() {
        let flags = BlockFlags::RECORD_START | BlockFlags::RECORD_END;
        assert_eq!(flags.bits(), 0xa0);
        assert!(flags.contains(BlockFlags::RECORD_START));
        assert!(flags.contains(BlockFlags::RECORD_END));
        assert!(!flags.contains(BlockFlags::TAPE_MARK));
    }

    #[test]
    fn undefined_bits_are_kept() {
        let mut flags = BlockFlags::from_bits(0x41);
        assert!(flags.contains(BlockFlags::TAPE_MARK));
        flags |= BlockFlags::RECORD_END;
        assert_eq!(flags.bits(), 0x61);
        assert_eq!(flags.to_string(), "MARK|END|0x01");
    }

    #[test]
    fn header_layout_is_little_endian() {
        let header = BlockHeader {
            current_length: 0x0102,
            previous_length: 0xa0b0,
            flags1: BlockFlags::TAPE_MARK,
            flags2: 0x7f,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes, [0x02, 0x01, 0xb0, 0xa0, 0x40, 0x7f]);
        assert_eq!(BlockHeader::from_bytes(&bytes), header);
    }

    #[test]
    fn display_empty() {
        assert_eq!(BlockFlags::empty().to_string(), "-");
    }
}
