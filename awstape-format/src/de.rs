use std::io::{ErrorKind, Read};

use crate::{BlockHeader, DecodeError, TapeBlock, HEADER_LEN};

/// Issue one read for the whole of `buf`. Anything short of a full buffer
/// is an error; looping over short reads is left to [`crate::io::ExactReader`].
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), DecodeError> {
    let read = loop {
        match reader.read(buf) {
            Ok(n) => break n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecodeError::Io(e)),
        }
    };

    if read < buf.len() {
        return Err(DecodeError::UnexpectedEof {
            expected: buf.len(),
            read,
        });
    }

    Ok(())
}

pub(crate) trait DeserializeOwned {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

impl DeserializeOwned for BlockHeader {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
        let mut buf = [0u8; HEADER_LEN];
        read_full(reader, &mut buf)?;

        // No sanity checks: images with odd flags or broken chains must still load.
        Ok(BlockHeader::from_bytes(&buf))
    }
}

impl DeserializeOwned for TapeBlock {
    fn deserialize_owned<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
        let header = BlockHeader::deserialize_owned(reader)?;

        let mut data = vec![0u8; header.current_length as usize];
        if !data.is_empty() {
            read_full(reader, &mut data)?;
        }

        tracing::debug!(
            current_length = header.current_length,
            previous_length = header.previous_length,
            flags = %header.flags1,
            flags2 = header.flags2,
            "deserialized TapeBlock"
        );

        Ok(TapeBlock::from_parts(header, data))
    }
}
