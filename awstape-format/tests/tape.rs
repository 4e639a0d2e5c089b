//! End-to-end checks over the public API: blocks written by hand, read back
//! through the tape reader, with record data passing through the codepage
//! tables on the way in and out.

use std::io::Cursor;

use awstape_format::{
    BlockFlags, DecodeError, TapeBlock, TapeEntry, TapeReader, TapeWriter, Transformer,
    ASCII_TO_EBCDIC, EBCDIC_TO_ASCII,
};

#[test]
fn round_trip_preserves_every_field() {
    let blocks = vec![
        TapeBlock {
            current_length: 4,
            previous_length: 0,
            flags1: BlockFlags::RECORD_START,
            flags2: 0,
            data: b"abcd".to_vec(),
        },
        TapeBlock {
            current_length: 2,
            previous_length: 4,
            flags1: BlockFlags::RECORD_END | BlockFlags::from_bits(0x01),
            flags2: 0xff,
            data: b"ef".to_vec(),
        },
        TapeBlock::tape_mark(2),
    ];

    let mut image = vec![];
    for block in blocks.iter() {
        image.extend(block.to_bytes());
    }

    let read = TapeReader::new(Cursor::new(image))
        .collect::<Result<Vec<_>, DecodeError>>()
        .unwrap();
    assert_eq!(read, blocks);
}

#[test]
fn zero_length_block_is_just_a_header() {
    let block = TapeBlock {
        current_length: 0,
        previous_length: 80,
        flags1: BlockFlags::RECORD_START | BlockFlags::RECORD_END,
        flags2: 0,
        data: vec![],
    };
    let bytes = block.to_bytes();
    assert_eq!(bytes, vec![0, 0, 80, 0, 0xa0, 0]);

    let decoded = TapeBlock::read_from(&mut Cursor::new(bytes)).unwrap();
    assert!(decoded.data.is_empty());
    assert!(decoded.flags1.contains(BlockFlags::RECORD_START));
    assert!(decoded.flags1.contains(BlockFlags::RECORD_END));
}

#[test]
fn ebcdic_records_through_tape() {
    let cards = ["HELLO TAPE", "//JOB CARD", ""];

    let mut writer = TapeWriter::new(vec![]).with_block_size(4).unwrap();
    for card in cards.iter() {
        let data = ASCII_TO_EBCDIC.transform_bytes(card.as_bytes()).unwrap();
        writer.write_record(&data).unwrap();
    }
    writer.write_tape_mark().unwrap();
    writer.write_tape_mark().unwrap();
    let image = writer.finish().unwrap();

    let mut reader = TapeReader::new(Cursor::new(image));
    let mut found = vec![];
    let mut marks = 0;
    for entry in reader.entries() {
        match entry.unwrap() {
            TapeEntry::Record(data) => {
                let text = EBCDIC_TO_ASCII.transform_bytes(&data).unwrap();
                found.push(String::from_utf8(text).unwrap());
            }
            TapeEntry::TapeMark => marks += 1,
        }
    }

    assert_eq!(found, cards);
    assert_eq!(marks, 2);
}

#[test]
fn declared_length_is_trusted_on_encode() {
    let block = TapeBlock {
        current_length: 10,
        previous_length: 0,
        flags1: BlockFlags::RECORD_START,
        flags2: 0,
        data: b"abc".to_vec(),
    };
    let bytes = block.to_bytes();
    assert_eq!(bytes.len(), 9);
    assert_eq!(&bytes[..2], &[10, 0]);

    let err = TapeBlock::read_from(&mut Cursor::new(bytes)).unwrap_err();
    assert!(err.is_unexpected_eof());
}
